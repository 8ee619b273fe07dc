//! Populate command-line flags from environment variables.
//!
//! Each flag name is run through a chain of [`Mapper`]s. The default chain
//! [normalizes](normalize) the name (`my-name` becomes `MY_NAME`) and then
//! looks that variable up in the process environment. When every stage of
//! the chain hits, the result is written into the flag; command-line
//! arguments are parsed afterwards and take precedence.
//!
//! ```
//! use env2flag::FlagSet;
//!
//! let mut flags = FlagSet::new("greet");
//! flags.string("my_name", "John Doe", "please set name").unwrap();
//! flags.string("message", "Have a good day.", "please set message").unwrap();
//!
//! std::env::set_var("MY_NAME", "George");
//! let rest = env2flag::parse_from(&mut flags, ["extra"]).unwrap();
//!
//! assert_eq!(flags.get::<String>("my_name").unwrap(), "George");
//! assert_eq!(flags.get::<String>("message").unwrap(), "Have a good day.");
//! assert_eq!(rest, ["extra"]);
//! ```
//!
//! A [`Table`] can stand in for the normalizer when flag names and variable
//! names do not line up, and [`clap_ext`] applies the same chains to a
//! `clap::Command`.

mod apply;
pub mod clap_ext;
mod env;
mod error;
mod flags;
mod mapper;
mod normalize;
mod table;

pub use apply::{apply_maps, default_chain, parse, parse_from};
pub use env::Env;
pub use error::{BoxError, FlagError, TableError};
pub use flags::{Flag, FlagSet, Value};
pub use mapper::{compose, Chain, MapFn, Mapper};
pub use normalize::{normalize, Normalize};
pub use table::Table;
