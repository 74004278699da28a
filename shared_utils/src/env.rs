/// Reads an environment variable that the caller can live without.
///
/// Empty values are treated as unset so that `VAR=` in an env file does not
/// smuggle an empty credential into a request header.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
