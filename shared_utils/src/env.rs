/// Reads an optional environment variable.
///
/// Returns `None` when the variable is unset or blank, so an empty override
/// in a service environment behaves the same as no override at all.
pub fn optional_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
