//! Turning column names into identifiers every target language accepts

/// Keep ASCII alphanumerics and `_`; prefix `v_` when the result is empty or starts with a digit.
///
/// Distinct names may map to the same identifier (`a-b` and `ab`); callers get
/// no warning about it.
pub fn safe_identifier(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match kept.chars().next() {
        None => "v_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("v_{}", kept),
        Some(_) => kept,
    }
}

pub fn safe_identifiers(names: &[String]) -> Vec<String> {
    names.iter().map(|n| safe_identifier(n)).collect()
}
