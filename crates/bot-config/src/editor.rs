//! Get and set configuration properties by dotted path.

use serde_json::Value;
use tracing::{info, instrument};

use crate::error::ConfigError;
use crate::file::ConfigFile;
use crate::literal::parse_literal;
use crate::property::{Property, PropertyClass};
use crate::schema::Config;

/// Result of [`ConfigEditor::set_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    /// False when the new value equals the current one; nothing was modified.
    pub changed: bool,
    /// True when the change applies without a restart.
    pub immediate: bool,
    /// The property's value after the call.
    pub value: Option<Value>,
}

/// Edits a [`Config`] in place and saves it to its file.
pub struct ConfigEditor<'a> {
    config: &'a mut Config,
    file: &'a ConfigFile,
}

impl<'a> ConfigEditor<'a> {
    pub fn new(config: &'a mut Config, file: &'a ConfigFile) -> Self {
        Self { config, file }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn get_value(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.config.get_value(path)
    }

    /// Set the property at `path` from its literal form.
    ///
    /// When the property holds a list, `+item` appends and `-item` removes every equal item.
    #[instrument(skip(self))]
    pub fn set_value(&mut self, path: &str, raw: &str) -> Result<SetOutcome, ConfigError> {
        let property = Property::parse(path)?;
        let class = PropertyClass::of(path);
        if !class.is_editable() {
            return Err(ConfigError::NotEditable(path.to_string()));
        }

        let old = self.config.read(&property);
        if matches!(old, Some(Value::Object(_))) {
            return Err(ConfigError::CompositeValue(path.to_string()));
        }

        let value = parse_literal(raw)?;
        let value = match (&old, value) {
            (Some(Value::Array(items)), Value::String(text)) => {
                list_delta(items, &text)?.unwrap_or(Value::String(text))
            }
            (Some(old), value) => integral_like(old, value),
            (None, value) => value,
        };

        if old.as_ref().is_some_and(|old| same_value(old, &value)) {
            return Ok(SetOutcome {
                changed: false,
                immediate: false,
                value: old,
            });
        }

        if !is_settable(&value) {
            return Err(ConfigError::CompositeValue(path.to_string()));
        }
        if let Some(old) = old.as_ref().filter(|v| !v.is_null()) {
            let (expected, actual) = (type_name(old), type_name(&value));
            if expected != actual {
                return Err(ConfigError::TypeMismatch {
                    path: path.to_string(),
                    expected,
                    actual,
                });
            }
        }
        if value.is_null() {
            return Err(ConfigError::InvalidValue {
                path: path.to_string(),
                reason: "value must not be empty".into(),
            });
        }

        self.config.assign(&property, path, value)?;
        let value = self.config.read(&property);
        let immediate = class == PropertyClass::Immediate;
        info!(path, immediate, "Config property changed");
        Ok(SetOutcome {
            changed: true,
            immediate,
            value,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.file.save(self.config)?;
        info!(path = %self.file.path().display(), "Config saved");
        Ok(())
    }
}

/// `+item` / `-item` applied to a copy of `items`; `None` when `text` is not a delta.
fn list_delta(items: &[Value], text: &str) -> Result<Option<Value>, ConfigError> {
    let (append, rest) = if let Some(rest) = text.strip_prefix('+') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (false, rest)
    } else {
        return Ok(None);
    };

    let item = parse_literal(rest)?;
    let mut list = items.to_vec();
    if append {
        list.push(item);
    } else {
        list.retain(|v| !same_value(v, &item));
    }
    Ok(Some(Value::Array(list)))
}

/// Keeps a whole-number float integral when it replaces an integer, so `3.0` sets `3`.
fn integral_like(old: &Value, value: Value) -> Value {
    let is_integer = |v: &Value| v.as_i64().is_some() || v.as_u64().is_some();
    match value.as_f64() {
        Some(f) if is_integer(old) && !is_integer(&value) && f.fract() == 0.0 => {
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Value::from(f as i64)
            } else {
                value
            }
        }
        _ => value,
    }
}

/// Equality with numbers compared by value: `1` equals `1.0`.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
        }
        _ => a == b,
    }
}

fn is_settable(value: &Value) -> bool {
    match value {
        Value::Object(_) => false,
        Value::Array(items) => items
            .iter()
            .all(|v| !matches!(v, Value::Object(_) | Value::Array(_) | Value::Null)),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixture() -> (Config, ConfigFile, TempDir) {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::new(dir.path().join("config.toml"));
        let mut config = Config::new("tg", "sk");
        config.telegram.usernames = vec!["alice".into(), "bob".into()];
        (config, file, dir)
    }

    #[test]
    fn test_set_immediate() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);
        let outcome = editor.set_value("openai.model", "gpt-4").unwrap();
        assert_eq!(
            outcome,
            SetOutcome {
                changed: true,
                immediate: true,
                value: Some(json!("gpt-4")),
            }
        );
        assert_eq!(config.openai.model, "gpt-4");
    }

    #[test]
    fn test_set_delayed() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);
        let outcome = editor.set_value("telegram.token", "new-token").unwrap();
        assert!(outcome.changed);
        assert!(!outcome.immediate);
    }

    #[test]
    fn test_set_same_value() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);
        let outcome = editor.set_value("conversation.depth", "3").unwrap();
        assert_eq!(
            outcome,
            SetOutcome {
                changed: false,
                immediate: false,
                value: Some(json!(3)),
            }
        );
    }

    #[test]
    fn test_list_delta() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);

        let outcome = editor.set_value("telegram.usernames", "+carol").unwrap();
        assert_eq!(outcome.value, Some(json!(["alice", "bob", "carol"])));

        let outcome = editor.set_value("telegram.usernames", "-alice").unwrap();
        assert_eq!(outcome.value, Some(json!(["bob", "carol"])));

        let outcome = editor.set_value("telegram.usernames", "-dave").unwrap();
        assert!(!outcome.changed);

        let outcome = editor.set_value("telegram.chat_ids", "+-100500").unwrap();
        assert_eq!(outcome.value, Some(json!([-100500])));

        let outcome = editor.set_value("telegram.admins", "[alice]").unwrap();
        assert_eq!(outcome.value, Some(json!(["alice"])));
    }

    #[test]
    fn test_signed_numbers_are_not_deltas() {
        let (mut config, file, _dir) = fixture();
        config.telegram.chat_ids = vec![100500];
        let mut editor = ConfigEditor::new(&mut config, &file);

        assert!(matches!(
            editor.set_value("telegram.chat_ids", "-100500"),
            Err(ConfigError::TypeMismatch { expected: "list", actual: "number", .. })
        ));
        assert!(matches!(
            editor.set_value("telegram.chat_ids", "+100500"),
            Err(ConfigError::TypeMismatch { expected: "list", actual: "number", .. })
        ));

        let outcome = editor.set_value("telegram.chat_ids", "+-100500").unwrap();
        assert_eq!(outcome.value, Some(json!([100500, -100500])));
        let outcome = editor.set_value("telegram.chat_ids", "--100500").unwrap();
        assert_eq!(outcome.value, Some(json!([100500])));
    }

    #[test]
    fn test_numerically_equal_values() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);

        let outcome = editor.set_value("conversation.depth", "3.0").unwrap();
        assert_eq!(
            outcome,
            SetOutcome {
                changed: false,
                immediate: false,
                value: Some(json!(3)),
            }
        );

        let outcome = editor.set_value("openai.params.max_tokens", "1000.0").unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.value, Some(json!(1000)));

        let outcome = editor.set_value("openai.params.max_tokens", "2000.0").unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.value, Some(json!(2000)));

        let outcome = editor.set_value("openai.params.temperature", "0.70").unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn test_set_errors() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);

        assert!(matches!(
            editor.set_value("version", "2.0"),
            Err(ConfigError::NotEditable(_))
        ));
        assert!(matches!(
            editor.set_value("quack", "1"),
            Err(ConfigError::NoSuchProperty(_))
        ));
        assert!(matches!(
            editor.set_value("telegram", "1"),
            Err(ConfigError::CompositeValue(_))
        ));
        assert!(matches!(
            editor.set_value("shortcuts.bugfix", "{\"a\": 1}"),
            Err(ConfigError::CompositeValue(_))
        ));
        assert!(matches!(
            editor.set_value("conversation.depth", "five"),
            Err(ConfigError::TypeMismatch { expected: "number", actual: "string", .. })
        ));
        assert!(matches!(
            editor.set_value("conversation.depth", "2.5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            editor.set_value("conversation.message_limit.period", "month"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            editor.set_value("imagine.enabled", "\"users_only"),
            Err(ConfigError::InvalidLiteral(_))
        ));
        assert!(matches!(
            editor.set_value("telegram.chat_ids", "+alice"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_absent_entries() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);

        let outcome = editor.set_value("shortcuts.translate", "Translate into English").unwrap();
        assert!(outcome.changed);
        assert!(outcome.immediate);

        let outcome = editor.set_value("openai.azure.endpoint", "https://example.net").unwrap();
        assert!(!outcome.immediate);
        assert_eq!(
            config.openai.azure.as_ref().map(|a| a.endpoint.as_str()),
            Some("https://example.net")
        );
    }

    #[test]
    fn test_save_round_trip() {
        let (mut config, file, _dir) = fixture();
        let mut editor = ConfigEditor::new(&mut config, &file);
        editor.set_value("imagine.enabled", "none").unwrap();
        editor.save().unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded, config);
    }
}
