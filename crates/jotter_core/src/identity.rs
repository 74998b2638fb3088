//! OS identity lookup used for default note authorship.

const USER_ENV_KEYS: [&str; 3] = ["USER", "USERNAME", "LOGNAME"];

/// Returns the current OS user name, if the environment exposes one.
///
/// Checks `USER`, `USERNAME` (Windows) and `LOGNAME` in that order and skips
/// blank values.
pub fn current_os_user() -> Option<String> {
    first_non_blank(USER_ENV_KEYS.iter().map(|key| std::env::var(key).ok()))
}

fn first_non_blank(values: impl Iterator<Item = Option<String>>) -> Option<String> {
    values
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::first_non_blank;

    #[test]
    fn first_non_blank_skips_missing_and_blank_values() {
        let values = vec![None, Some("  ".to_string()), Some(" bob ".to_string())];
        assert_eq!(first_non_blank(values.into_iter()), Some("bob".to_string()));
    }

    #[test]
    fn first_non_blank_returns_none_when_nothing_usable() {
        let values = vec![None, Some(String::new())];
        assert_eq!(first_non_blank(values.into_iter()), None);
    }
}
