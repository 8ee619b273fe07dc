use std::env;

use log::debug;

use crate::mapper::Mapper;

/// Looks a name up in the process environment.
///
/// A variable that is set to the empty string is a hit with an empty value;
/// only an unset variable misses. Names the platform cannot look up (empty,
/// containing `=` or NUL) also miss. A value that is not valid UTF-8 is still
/// a hit, with invalid sequences replaced by U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct Env;

impl Mapper for Env {
    fn map(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(&['=', '\0'][..]) {
            return None;
        }
        let raw = env::var_os(name)?;
        match raw.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                debug!("Lossily converting non-UTF-8 value of {}: {:?}", name, raw);
                Some(raw.to_string_lossy().into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_existing_key() {
        temp_env::with_var("ENV2FLAG_TEST_PRESENT", Some("test_value"), || {
            assert_eq!(
                Env.map("ENV2FLAG_TEST_PRESENT").as_deref(),
                Some("test_value")
            );
        });
    }

    #[test]
    fn test_env_empty_is_not_unset() {
        temp_env::with_var("ENV2FLAG_TEST_EMPTY", Some(""), || {
            assert_eq!(Env.map("ENV2FLAG_TEST_EMPTY").as_deref(), Some(""));
        });
    }

    #[test]
    fn test_env_nonexistent_key() {
        temp_env::with_var_unset("ENV2FLAG_TEST_ABSENT", || {
            assert_eq!(Env.map("ENV2FLAG_TEST_ABSENT"), None);
        });
    }

    #[test]
    fn test_env_unlookupable_names() {
        assert_eq!(Env.map(""), None);
        assert_eq!(Env.map("A=B"), None);
        assert_eq!(Env.map("A\0B"), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_env_non_utf8_value_is_found() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        temp_env::with_var(
            "ENV2FLAG_TEST_RAW",
            Some(OsStr::from_bytes(b"ab\xffcd")),
            || {
                assert_eq!(
                    Env.map("ENV2FLAG_TEST_RAW").as_deref(),
                    Some("ab\u{fffd}cd")
                );
            },
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn test_env_is_exact_match() {
        temp_env::with_vars(
            [
                ("ENV2FLAG_TEST_CASE", Some("upper")),
                ("env2flag_test_case", None),
            ],
            || {
                assert_eq!(Env.map("ENV2FLAG_TEST_CASE").as_deref(), Some("upper"));
                assert_eq!(Env.map("env2flag_test_case"), None);
            },
        );
    }
}
