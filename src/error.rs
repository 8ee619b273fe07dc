use thiserror::Error;

/// Error type returned by [`Value::set`](crate::Value::set).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from registering, assigning, or parsing flags.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("flag redefined: {name}")]
    Redefined { name: String },

    #[error("flag provided but not defined: -{name}")]
    Unknown { name: String },

    #[error("invalid value {value:?} for flag -{name}: {source}")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: BoxError,
    },

    #[error("flag needs an argument: -{name}")]
    MissingArgument { name: String },

    #[error("bad flag syntax: {arg}")]
    BadSyntax { arg: String },

    /// `-h`, `-help` or `--help` was given and no such flag is registered.
    #[error("help requested")]
    Help,
}

/// Errors from building a [`Table`](crate::Table) out of `SRC=DST` strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("malformed table entry {entry:?}: expected SRC=DST")]
    MalformedEntry { entry: String },

    #[error("empty source name in table entry {entry:?}")]
    EmptySource { entry: String },
}
