use log::{debug, trace};

use crate::env::Env;
use crate::error::FlagError;
use crate::flags::FlagSet;
use crate::mapper::{compose, Chain, Mapper};
use crate::normalize::Normalize;

static NORMALIZE: Normalize = Normalize;
static ENV: Env = Env;

/// The default chain: normalize the flag name, then read that variable.
pub fn default_chain() -> Chain<'static> {
    compose(&[&NORMALIZE, &ENV])
}

/// Run every flag name in `flags` through `mappers` and assign the result.
///
/// Flags are visited in name order. A flag is overwritten only when every
/// mapper hits; otherwise it keeps its value. With no mappers nothing is
/// touched. A value the flag rejects stops the walk and is returned.
pub fn apply_maps(flags: &mut FlagSet, mappers: &[&dyn Mapper]) -> Result<(), FlagError> {
    if mappers.is_empty() {
        return Ok(());
    }
    let chain = compose(mappers);
    for flag in flags.iter_mut() {
        match chain.map(flag.name()) {
            Some(value) => {
                debug!("Setting flag {} from mapped value {:?}", flag.name(), value);
                flag.set(&value)?;
            }
            None => trace!("No mapping for flag {}", flag.name()),
        }
    }
    Ok(())
}

/// Fill `flags` from the environment, then parse the process arguments.
///
/// Explicit arguments are parsed last, so they win over the environment.
pub fn parse(flags: &mut FlagSet) -> Result<Vec<String>, FlagError> {
    parse_from(flags, std::env::args().skip(1))
}

/// [`parse`] with explicit arguments (without the program name).
pub fn parse_from<I, S>(flags: &mut FlagSet, args: I) -> Result<Vec<String>, FlagError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    apply_maps(flags, &[&default_chain()])?;
    flags.parse(args)
}
