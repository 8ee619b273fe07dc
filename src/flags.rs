use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use log::trace;

use crate::error::{BoxError, FlagError};

/// The typed slot behind a flag.
///
/// `set` receives the raw string from the environment or the command line and
/// is the only place a value gets checked.
pub trait Value: Any {
    fn set(&mut self, s: &str) -> Result<(), BoxError>;

    /// Current value rendered as text, used for defaults and usage output.
    fn render(&self) -> String;

    /// Bool flags are given as `-name` without a separate argument.
    fn is_bool(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

macro_rules! from_str_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Value for $t {
                fn set(&mut self, s: &str) -> Result<(), BoxError> {
                    *self = s.parse::<$t>()?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

from_str_value!(String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[derive(Debug, thiserror::Error)]
#[error("invalid syntax for bool: {0:?}")]
struct ParseBoolError(String);

impl Value for bool {
    fn set(&mut self, s: &str) -> Result<(), BoxError> {
        *self = match s {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
            "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
            other => return Err(ParseBoolError(other.to_string()).into()),
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn is_bool(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for PathBuf {
    fn set(&mut self, s: &str) -> Result<(), BoxError> {
        *self = PathBuf::from(s);
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string_lossy().into_owned()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Repeatable flag: every `set` appends.
impl Value for Vec<String> {
    fn set(&mut self, s: &str) -> Result<(), BoxError> {
        self.push(s.to_string());
        Ok(())
    }

    fn render(&self) -> String {
        self.join(",")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A registered flag.
pub struct Flag {
    name: String,
    usage: String,
    default: String,
    value: Box<dyn Value>,
    changed: bool,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The value the flag was registered with, as text.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    /// Whether the flag was assigned after registration.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set(&mut self, s: &str) -> Result<(), FlagError> {
        self.value
            .set(s)
            .map_err(|source| FlagError::InvalidValue {
                name: self.name.clone(),
                value: s.to_string(),
                source,
            })?;
        self.changed = true;
        Ok(())
    }
}

impl std::fmt::Debug for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("value", &self.value.render())
            .field("default", &self.default)
            .field("changed", &self.changed)
            .finish()
    }
}

/// A named set of flags, enumerated in lexicographic order of flag name.
#[derive(Debug)]
pub struct FlagSet {
    name: String,
    flags: BTreeMap<String, Flag>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a flag holding `default`.
    pub fn var<T: Value>(
        &mut self,
        name: &str,
        default: T,
        usage: &str,
    ) -> Result<(), FlagError> {
        if self.flags.contains_key(name) {
            return Err(FlagError::Redefined {
                name: name.to_string(),
            });
        }
        let flag = Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            default: default.render(),
            value: Box::new(default),
            changed: false,
        };
        self.flags.insert(name.to_string(), flag);
        Ok(())
    }

    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), FlagError> {
        self.var(name, default.to_string(), usage)
    }

    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), FlagError> {
        self.var(name, default, usage)
    }

    /// Current value of `name`, if it is registered with type `T`.
    pub fn get<T: Value>(&self, name: &str) -> Option<&T> {
        self.flags.get(name)?.value.as_any().downcast_ref::<T>()
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError> {
        match self.flags.get_mut(name) {
            Some(flag) => flag.set(value),
            None => Err(FlagError::Unknown {
                name: name.to_string(),
            }),
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).map_or(false, Flag::is_changed)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// All flags, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flag> {
        self.flags.values_mut()
    }

    pub fn visit_all(&self, f: impl FnMut(&Flag)) {
        self.iter().for_each(f);
    }

    /// Only the flags that have been assigned, in name order.
    pub fn visit(&self, f: impl FnMut(&Flag)) {
        self.iter().filter(|flag| flag.is_changed()).for_each(f);
    }

    /// Parse `args` (without the program name) and return what is left after
    /// the last flag.
    ///
    /// Accepts `-name`, `--name`, `-name=value` and `-name value`; bool flags
    /// only take a value through `=`. Parsing stops at the first non-flag
    /// argument, at a lone `-`, or after `--`.
    pub fn parse<I, S>(&mut self, args: I) -> Result<Vec<String>, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut rest = &args[..];
        while let Some((arg, tail)) = rest.split_first() {
            if arg.len() < 2 || !arg.starts_with('-') {
                break;
            }
            if arg == "--" {
                rest = tail;
                break;
            }
            rest = tail;

            let body = arg
                .strip_prefix("--")
                .unwrap_or_else(|| &arg[1..]);
            if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
                return Err(FlagError::BadSyntax { arg: arg.clone() });
            }
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let flag = match self.flags.get_mut(name) {
                Some(flag) => flag,
                None if name == "h" || name == "help" => return Err(FlagError::Help),
                None => {
                    return Err(FlagError::Unknown {
                        name: name.to_string(),
                    })
                }
            };

            let value = match inline {
                Some(value) => value,
                None if flag.value.is_bool() => "true",
                None => match rest.split_first() {
                    Some((value, tail)) => {
                        rest = tail;
                        value.as_str()
                    }
                    None => {
                        return Err(FlagError::MissingArgument {
                            name: name.to_string(),
                        })
                    }
                },
            };
            trace!("Parsed flag -{}={:?}", name, value);
            flag.set(value)?;
        }
        Ok(rest.to_vec())
    }

    /// Listing of every flag with its usage text and default.
    pub fn usage(&self) -> String {
        let mut out = format!("Usage of {}:\n", self.name);
        for flag in self.iter() {
            let _ = write!(out, "  -{}", flag.name);
            if !flag.value.is_bool() {
                out.push_str(" value");
            }
            let _ = write!(out, "\n    \t{}", flag.usage);
            if !flag.default.is_empty() && !(flag.value.is_bool() && flag.default == "false") {
                let _ = write!(out, " (default {:?})", flag.default);
            }
            out.push('\n');
        }
        out
    }
}
