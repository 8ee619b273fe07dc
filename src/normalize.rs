use crate::mapper::Mapper;

/// Convert a flag name into the environment variable name it is looked up as.
///
/// Each character is uppercased on its own (a character whose uppercase form
/// is several characters, like `ß`, is kept as is), then every run of
/// characters outside `A-Z0-9` is replaced by a single `_`. Leading runs are
/// dropped; a trailing run leaves one trailing `_`. This never fails, so the result is always `Some`.
///
/// ```
/// assert_eq!(env2flag::normalize("my-name").as_deref(), Some("MY_NAME"));
/// assert_eq!(env2flag::normalize("__abc__").as_deref(), Some("ABC_"));
/// ```
pub fn normalize(name: &str) -> Option<String> {
    let mut suppress = true;
    let mapped = name
        .chars()
        .map(upper_one)
        .filter_map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                suppress = false;
                Some(c)
            } else if suppress {
                None
            } else {
                suppress = true;
                Some('_')
            }
        })
        .collect();
    Some(mapped)
}

fn upper_one(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// [`normalize`] as a [`Mapper`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalize;

impl Mapper for Normalize {
    fn map(&self, name: &str) -> Option<String> {
        normalize(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str, expected: &str) {
        let actual = normalize(input).expect("normalize always maps");
        assert_eq!(actual, expected, "normalize({:?})", input);
    }

    #[test]
    fn test_normalize_case() {
        check("abc", "ABC");
        check("ABC", "ABC");
        check("Abc", "ABC");
        check("abc123", "ABC123");
    }

    #[test]
    fn test_normalize_separators() {
        check("abc_123", "ABC_123");
        check("abc-123", "ABC_123");
        check("abc'123", "ABC_123");
        check("abc#123", "ABC_123");
        check("abc.123", "ABC_123");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        check("abc____123", "ABC_123");
        check("abc-_-_123", "ABC_123");
        check("____abc_123", "ABC_123");
        check("--abc", "ABC");
    }

    #[test]
    fn test_normalize_keeps_one_trailing_underscore() {
        check("abc____", "ABC_");
        check("abc----", "ABC_");
        check("abc-", "ABC_");
    }

    #[test]
    fn test_normalize_empty_and_junk_only() {
        check("", "");
        check("---", "");
        check("  ", "");
    }

    #[test]
    fn test_normalize_non_ascii_is_separator() {
        check("café-au-lait", "CAF_AU_LAIT");
        check("naïve", "NA_VE");
    }

    #[test]
    fn test_normalize_multi_char_uppercase_is_kept_as_separator() {
        check("straße", "STRA_E");
        check("ﬁle", "LE");
        check("x-ß", "X_");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["abc", "a--b__c", "__x__", "Mixed.Case-9", "", "日本-x"] {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn test_normalize_mapper() {
        assert_eq!(Normalize.map("log-level").as_deref(), Some("LOG_LEVEL"));
    }
}
