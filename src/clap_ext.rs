//! Environment defaults for `clap` commands.
//!
//! clap already parses; what it lacks is a way to take every argument's
//! default from a variable derived from the argument's name. Mapped values
//! are installed as argument defaults, so anything given on the command line
//! still wins and clap's own value parsers decide whether a value is valid.

use std::ffi::OsString;

use clap::{ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use log::{debug, trace};

use crate::apply::default_chain;
use crate::mapper::Mapper;

/// Give each argument of `cmd` the default produced by `mapper` for its id.
///
/// Arguments are visited in id order. Required arguments and the built-in
/// help and version flags are left alone.
pub fn apply_to_command(cmd: Command, mapper: &dyn Mapper) -> Command {
    let mut overrides: Vec<(String, String)> = cmd
        .get_arguments()
        .filter(|arg| !arg.is_required_set())
        .filter(|arg| {
            !matches!(
                arg.get_action(),
                ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
            )
        })
        .filter_map(|arg| {
            let id = arg.get_id().as_str();
            match mapper.map(id) {
                Some(value) => Some((id.to_string(), value)),
                None => {
                    trace!("No mapping for argument {}", id);
                    None
                }
            }
        })
        .collect();
    overrides.sort();

    overrides.into_iter().fold(cmd, |cmd, (id, value)| {
        debug!("Defaulting argument {} to mapped value {:?}", id, value);
        cmd.mut_arg(id, |arg| arg.default_value(value))
    })
}

/// Parse the process arguments for `cmd` after applying the default chain.
pub fn parse_command(cmd: Command) -> ArgMatches {
    apply_to_command(cmd, &default_chain()).get_matches()
}

/// [`Parser`] entry points that read argument defaults from the environment.
pub trait EnvParser: Parser {
    /// Like [`Parser::parse`], with each argument defaulting to the variable
    /// its normalized id names.
    fn parse_with_env() -> Self {
        Self::try_parse_with_env_from(&default_chain(), std::env::args_os())
            .unwrap_or_else(|err| err.exit())
    }

    fn try_parse_with_env_from<I, T>(mapper: &dyn Mapper, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = apply_to_command(<Self as CommandFactory>::command(), mapper);
        let mut matches = cmd.try_get_matches_from_mut(args)?;
        <Self as FromArgMatches>::from_arg_matches_mut(&mut matches)
            .map_err(|err| err.format(&mut cmd))
    }
}

impl<T> EnvParser for T where T: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use clap::Arg;

    #[derive(Parser, Debug)]
    struct Cli {
        #[arg(long, default_value = "John Doe")]
        my_name: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,

        #[arg(long)]
        verbose: bool,

        #[arg(required = true)]
        files: Vec<String>,
    }

    #[test]
    fn test_defaults_come_from_mapper() {
        let table = Table::default()
            .insert("my_name", "George")
            .insert("port", "9090")
            .insert("verbose", "true");

        let cli = Cli::try_parse_with_env_from(&table, ["prog", "a.txt"]).unwrap();

        assert_eq!(cli.my_name, "George");
        assert_eq!(cli.port, 9090);
        assert!(cli.verbose);
        assert_eq!(cli.files, ["a.txt"]);
    }

    #[test]
    fn test_arguments_override_mapped_defaults() {
        let table = Table::default().insert("my_name", "George");

        let cli =
            Cli::try_parse_with_env_from(&table, ["prog", "--my-name", "Ringo", "a.txt"]).unwrap();

        assert_eq!(cli.my_name, "Ringo");
        assert_eq!(cli.port, 8080);
    }

    #[test]
    fn test_required_and_help_arguments_are_skipped() {
        let table = Table::default()
            .insert("files", "never")
            .insert("help", "never");

        let err = Cli::try_parse_with_env_from(&table, ["prog"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_mapped_value_is_rejected_by_clap() {
        let table = Table::default().insert("port", "http");

        let err = Cli::try_parse_with_env_from(&table, ["prog", "a.txt"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_default_chain_on_builder_command() {
        let cmd = Command::new("prog").arg(
            Arg::new("env2flag-clap-level")
                .long("level")
                .default_value("info"),
        );

        let matches = temp_env::with_var("ENV2FLAG_CLAP_LEVEL", Some("trace"), || {
            apply_to_command(cmd, &default_chain()).try_get_matches_from(["prog"])
        })
        .unwrap();

        assert_eq!(
            matches
                .get_one::<String>("env2flag-clap-level")
                .map(String::as_str),
            Some("trace")
        );
    }
}
