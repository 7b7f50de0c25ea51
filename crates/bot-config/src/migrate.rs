//! Sequential schema upgrades for raw config data.
//!
//! Each step is a pure function from one schema version's shape to the next. [`migrate`] applies
//! them in order starting from the data's `schema_version` (1 when absent).

use serde_json::{json, Map, Value};
use tracing::info;

use crate::defaults::DEFAULT_DEPTH;
use crate::error::ConfigError;

pub const CURRENT_SCHEMA_VERSION: u32 = 4;

type Table = Map<String, Value>;
type Step = fn(Table) -> Result<Table, ConfigError>;

/// `STEPS[n]` upgrades version `n + 1` to `n + 2`.
const STEPS: [Step; (CURRENT_SCHEMA_VERSION - 1) as usize] = [v1_to_v2, v2_to_v3, v3_to_v4];

/// Upgrade `data` to [`CURRENT_SCHEMA_VERSION`]; the flag is true iff any step ran.
pub fn migrate(data: Value) -> Result<(Value, bool), ConfigError> {
    let mut table = match data {
        Value::Object(table) => table,
        Value::Null => Table::new(),
        _ => return Err(ConfigError::Malformed("config root must be a table".into())),
    };

    let version = match table.get("schema_version") {
        None | Some(Value::Null) => 1,
        Some(v) => v
            .as_i64()
            .ok_or_else(|| ConfigError::Malformed("schema_version must be an integer".into()))?,
    };
    if version < 1 || version > CURRENT_SCHEMA_VERSION as i64 {
        return Err(ConfigError::UnsupportedVersion(version));
    }

    let mut changed = false;
    for (index, step) in STEPS.iter().enumerate().skip(version as usize - 1) {
        table = step(table)?;
        changed = true;
        info!(
            from = index + 1,
            to = index + 2,
            "Migrated config schema"
        );
    }
    Ok((Value::Object(table), changed))
}

fn take(table: &mut Table, key: &str) -> Value {
    table.remove(key).unwrap_or(Value::Null)
}

fn take_required(table: &mut Table, key: &str) -> Result<Value, ConfigError> {
    match table.remove(key) {
        None | Some(Value::Null) => Err(ConfigError::MissingKey(key.to_string())),
        Some(value) => Ok(value),
    }
}

/// Flat `telegram_*` / `openai_*` keys become nested `telegram` and `openai` tables.
fn v1_to_v2(mut old: Table) -> Result<Table, ConfigError> {
    let token = take_required(&mut old, "telegram_token")?;
    let api_key = take_required(&mut old, "openai_api_key")?;

    let mut new = Table::new();
    new.insert("schema_version".into(), json!(2));
    new.insert(
        "telegram".into(),
        json!({
            "token": token,
            "usernames": take(&mut old, "telegram_usernames"),
            "chat_ids": take(&mut old, "telegram_chat_ids"),
        }),
    );
    new.insert(
        "openai".into(),
        json!({
            "api_key": api_key,
            "model": take(&mut old, "openai_model"),
        }),
    );
    for key in ["max_history_depth", "imagine", "persistence_path", "shortcuts"] {
        new.insert(key.into(), take(&mut old, key));
    }
    Ok(new)
}

/// `max_history_depth` moves to `conversation.depth`.
fn v2_to_v3(mut data: Table) -> Result<Table, ConfigError> {
    let depth = match take(&mut data, "max_history_depth") {
        Value::Null => json!(DEFAULT_DEPTH),
        depth => depth,
    };
    data.insert("schema_version".into(), json!(3));
    data.insert("conversation".into(), json!({ "depth": depth }));
    Ok(data)
}

/// Boolean `imagine` becomes `imagine.enabled`.
fn v3_to_v4(mut data: Table) -> Result<Table, ConfigError> {
    let enabled = match take(&mut data, "imagine") {
        Value::Bool(false) => "none",
        _ => "users_only",
    };
    data.insert("schema_version".into(), json!(4));
    data.insert("imagine".into(), json!({ "enabled": enabled }));
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_to_current() {
        let old = json!({
            "telegram_token": "tg",
            "telegram_usernames": ["alice"],
            "telegram_chat_ids": [-100500],
            "openai_api_key": "sk",
            "openai_model": "gpt-4",
            "max_history_depth": 5,
            "imagine": false,
            "persistence_path": "./data/p.json",
            "shortcuts": {"bugfix": "Fix this"},
        });
        let (data, changed) = migrate(old).unwrap();
        assert!(changed);
        assert_eq!(
            data,
            json!({
                "schema_version": 4,
                "telegram": {"token": "tg", "usernames": ["alice"], "chat_ids": [-100500]},
                "openai": {"api_key": "sk", "model": "gpt-4"},
                "conversation": {"depth": 5},
                "imagine": {"enabled": "none"},
                "persistence_path": "./data/p.json",
                "shortcuts": {"bugfix": "Fix this"},
            })
        );
    }

    #[test]
    fn test_v2_defaults() {
        let data = json!({
            "schema_version": 2,
            "telegram": {"token": "tg"},
            "openai": {"api_key": "sk"},
        });
        let (data, changed) = migrate(data).unwrap();
        assert!(changed);
        assert_eq!(data["conversation"], json!({"depth": 3}));
        assert_eq!(data["imagine"], json!({"enabled": "users_only"}));
        assert!(data.get("max_history_depth").is_none());
    }

    #[test]
    fn test_v3_imagine_true() {
        let data = json!({"schema_version": 3, "imagine": true});
        let (data, _) = migrate(data).unwrap();
        assert_eq!(data["imagine"]["enabled"], json!("users_only"));
        assert_eq!(data["schema_version"], json!(4));
    }

    #[test]
    fn test_current_is_fixed_point() {
        let data = json!({
            "schema_version": 4,
            "telegram": {"token": "tg"},
            "openai": {"api_key": "sk"},
            "imagine": {"enabled": "none"},
        });
        let (migrated, changed) = migrate(data.clone()).unwrap();
        assert!(!changed);
        assert_eq!(migrated, data);
    }

    #[test]
    fn test_v1_requires_credentials() {
        let err = migrate(json!({"openai_api_key": "sk"})).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "telegram_token"));
    }

    #[test]
    fn test_unsupported_versions() {
        assert!(matches!(
            migrate(json!({"schema_version": 5})),
            Err(ConfigError::UnsupportedVersion(5))
        ));
        assert!(matches!(
            migrate(json!({"schema_version": 0})),
            Err(ConfigError::UnsupportedVersion(0))
        ));
        assert!(matches!(
            migrate(json!([1, 2])),
            Err(ConfigError::Malformed(_))
        ));
    }
}
