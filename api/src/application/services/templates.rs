use once_cell::sync::Lazy;
use regex::Regex;

static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("variable pattern compiles"));

/// Names of `{{variable}}` placeholders in first-appearance order, without
/// duplicates.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in VARIABLE_RE.captures_iter(content) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
