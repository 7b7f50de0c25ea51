//! Shortcuts: `!name question` prepends the configured prompt for `name` to the question.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("failed to extract shortcut")]
    Malformed,

    #[error("unknown shortcut: {0}")]
    Unknown(String),
}

/// Splits `!name rest` into the shortcut name and the trimmed rest.
pub fn extract(question: &str) -> Result<(&str, &str), ShortcutError> {
    let body = question.strip_prefix('!').ok_or(ShortcutError::Malformed)?;
    let end = body
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if end == 0 {
        return Err(ShortcutError::Malformed);
    }
    Ok((&body[..end], body[end..].trim()))
}

pub fn apply(
    name: &str,
    question: &str,
    shortcuts: &BTreeMap<String, String>,
) -> Result<String, ShortcutError> {
    let prompt = shortcuts
        .get(name)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ShortcutError::Unknown(name.to_string()))?;
    Ok(format!("{prompt}\n\n{question}"))
}
