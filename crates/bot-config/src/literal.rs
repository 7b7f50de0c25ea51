//! Literal syntax for values typed by a user in `/config` or `bot config set`.
//!
//! Bare words follow the usual config conventions (`true`, `off`, `42`, `0.5`, `null`, or plain
//! text). Anything starting with a bracket or quote is parsed as JSON, with a fallback for bare
//! flow lists such as `[alice, bob]`.

use serde_json::{Number, Value};

use crate::error::ConfigError;

pub fn parse_literal(input: &str) -> Result<Value, ConfigError> {
    let text = input.trim();
    let invalid = || ConfigError::InvalidLiteral(input.to_string());

    match text.chars().next() {
        None => Err(invalid()),
        Some('[') => serde_json::from_str(text)
            .or_else(|_| flow_list(text).ok_or_else(invalid)),
        Some('{') | Some('"') => serde_json::from_str(text).map_err(|_| invalid()),
        Some('\'') => single_quoted(text).ok_or_else(invalid),
        Some(_) => Ok(scalar(text)),
    }
}

fn scalar(text: &str) -> Value {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => return Value::Bool(true),
        "false" | "no" | "off" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    if let Some(number) = text
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(number);
    }
    Value::String(text.to_string())
}

fn single_quoted(text: &str) -> Option<Value> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(Value::String(inner.replace("''", "'")))
}

/// `[a, 2, 'c d']` with unquoted items; nesting is not supported.
fn flow_list(text: &str) -> Option<Value> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Value::Array(Vec::new()));
    }
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            match item.chars().next() {
                None | Some('[') | Some('{') => None,
                Some('\'') => single_quoted(item),
                Some('"') => serde_json::from_str(item).ok(),
                Some(_) => Some(scalar(item)),
            }
        })
        .collect::<Option<Vec<_>>>()
        .map(Value::Array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_literal("true").unwrap(), json!(true));
        assert_eq!(parse_literal("Yes").unwrap(), json!(true));
        assert_eq!(parse_literal("off").unwrap(), json!(false));
        assert_eq!(parse_literal("null").unwrap(), Value::Null);
        assert_eq!(parse_literal("42").unwrap(), json!(42));
        assert_eq!(parse_literal("-100500").unwrap(), json!(-100500));
        assert_eq!(parse_literal("0.5").unwrap(), json!(0.5));
        assert_eq!(parse_literal("gpt-4").unwrap(), json!("gpt-4"));
        assert_eq!(parse_literal("  users_only ").unwrap(), json!("users_only"));
        assert_eq!(parse_literal("nan").unwrap(), json!("nan"));
    }

    #[test]
    fn test_quoted() {
        assert_eq!(parse_literal("\"5\"").unwrap(), json!("5"));
        assert_eq!(parse_literal("'it''s'").unwrap(), json!("it's"));
        assert!(parse_literal("\"users_only").is_err());
        assert!(parse_literal("'open").is_err());
    }

    #[test]
    fn test_lists() {
        assert_eq!(parse_literal("[]").unwrap(), json!([]));
        assert_eq!(parse_literal("[\"a\", 1]").unwrap(), json!(["a", 1]));
        assert_eq!(parse_literal("[alice, bob]").unwrap(), json!(["alice", "bob"]));
        assert_eq!(parse_literal("[1, 'x y']").unwrap(), json!([1, "x y"]));
        assert!(parse_literal("[a, [b]]").is_err());
        assert!(parse_literal("[a,").is_err());
    }

    #[test]
    fn test_maps_and_empty() {
        assert_eq!(parse_literal("{\"a\": 1}").unwrap(), json!({"a": 1}));
        assert!(parse_literal("{a: 1}").is_err());
        assert!(parse_literal("").is_err());
        assert!(parse_literal("   ").is_err());
    }
}
