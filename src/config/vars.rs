//! `$VAR` / `${VAR}` expansion for configured paths

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::DiscoverError;

static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{?([^\}/]+)\}?").expect("valid variable pattern"));

/// Replace every `$NAME` or `${NAME}` in `path` with the variable's value
///
/// A variable name runs up to the next `/` or `}`. Unset variables are an
/// error rather than silently expanding to nothing.
pub fn expand(path: &str) -> std::result::Result<String, DiscoverError> {
    let mut failure = None;
    let expanded = VAR_PATTERN.replace_all(path, |caps: &Captures| {
        let name = &caps[1];
        match std::env::var(name) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(DiscoverError::EnvVar {
                    name: name.to_string(),
                    path: path.to_string(),
                    reason: e.to_string(),
                });
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(expanded.into_owned()),
    }
}
