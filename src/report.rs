use env2flag::{Env, Mapper};

/// Describe how each flag name resolves against the environment.
///
/// `key_mapper` turns a flag name into a variable name (normally the
/// normalizer, or a table given with `--map`). Each line has one of these forms:
/// - NAME -> KEY=VALUE: the variable is set
/// - NAME -> KEY (unset): the variable is not set
/// - NAME -> (no mapping): `key_mapper` has nothing for NAME
pub fn describe(names: &[String], key_mapper: &dyn Mapper) -> Vec<String> {
    let mut result = Vec::new();

    for name in names {
        let line = match key_mapper.map(name) {
            Some(key) => match Env.map(&key) {
                Some(value) => format!("{} -> {}={}", name, key, value),
                None => format!("{} -> {} (unset)", name, key),
            },
            None => format!("{} -> (no mapping)", name),
        };
        result.push(line);
    }

    result
}
