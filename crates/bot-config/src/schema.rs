//! Typed configuration records.
//!
//! [`Config::from_value`] expects data already migrated to the current schema and fills declared
//! defaults; [`Config::to_value`] produces the persisted shape (tagged with the schema version,
//! without the readonly build version).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use session::{Period, SessionPolicy};

use crate::defaults::{
    default_params, BOT_VERSION, DEFAULT_DEPTH, DEFAULT_MODEL, DEFAULT_PERSISTENCE_PATH,
    DEFAULT_PROMPT,
};
use crate::error::ConfigError;
use crate::migrate::CURRENT_SCHEMA_VERSION;
use crate::property::{
    AzureField, ConversationField, ImagineField, MessageLimitField, OpenAiField, Property,
    TelegramField,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// Allowed usernames; empty means everyone is allowed.
    pub usernames: Vec<String>,
    /// Usernames allowed to change settings via `/config`.
    pub admins: Vec<String>,
    /// Allowed group chats.
    pub chat_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureOptions {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub deployment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAi {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub params: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureOptions>,
}

/// Maximum number of questions per user in a period; `count == 0` disables the limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLimit {
    pub count: u32,
    pub period: Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub depth: usize,
    pub message_limit: MessageLimit,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            message_limit: MessageLimit::default(),
        }
    }
}

/// Who may use `/imagine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagineMode {
    None,
    #[default]
    UsersOnly,
    UsersAndGroups,
}

impl ImagineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagineMode::None => "none",
            ImagineMode::UsersOnly => "users_only",
            ImagineMode::UsersAndGroups => "users_and_groups",
        }
    }

    /// Whether image generation is allowed in a private (`true`) or group (`false`) chat.
    pub fn allows(&self, is_private: bool) -> bool {
        match self {
            ImagineMode::None => false,
            ImagineMode::UsersOnly => is_private,
            ImagineMode::UsersAndGroups => true,
        }
    }

    fn from_loaded(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imagine {
    pub enabled: ImagineMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Build version; readonly and never written to the config file.
    pub version: String,
    pub telegram: Telegram,
    pub openai: OpenAi,
    pub conversation: Conversation,
    pub imagine: Imagine,
    pub persistence_path: String,
    pub shortcuts: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Persisted<'a> {
    schema_version: u32,
    telegram: &'a Telegram,
    openai: &'a OpenAi,
    conversation: &'a Conversation,
    imagine: &'a Imagine,
    persistence_path: &'a str,
    shortcuts: &'a BTreeMap<String, String>,
}

impl Config {
    /// Config with the given credentials and every other field at its default.
    pub fn new(token: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            version: BOT_VERSION.to_string(),
            telegram: Telegram {
                token: token.into(),
                usernames: Vec::new(),
                admins: Vec::new(),
                chat_ids: Vec::new(),
            },
            openai: OpenAi {
                api_key: api_key.into(),
                model: DEFAULT_MODEL.to_string(),
                prompt: DEFAULT_PROMPT.to_string(),
                params: default_params(),
                azure: None,
            },
            conversation: Conversation::default(),
            imagine: Imagine::default(),
            persistence_path: DEFAULT_PERSISTENCE_PATH.to_string(),
            shortcuts: BTreeMap::new(),
        }
    }

    /// Build from raw data at the current schema version.
    pub fn from_value(data: &Value) -> Result<Self, ConfigError> {
        let root = data
            .as_object()
            .ok_or_else(|| ConfigError::Malformed("config root must be a table".into()))?;

        let telegram = table(root, "telegram");
        let openai = table(root, "openai");
        let conversation = table(root, "conversation");
        let message_limit = conversation.and_then(|c| table(c, "message_limit"));
        let imagine = table(root, "imagine");

        let mut config = Config::new(
            required_str(telegram, "token", "telegram.token")?,
            required_str(openai, "api_key", "openai.api_key")?,
        );

        config.telegram.usernames = list(telegram, "usernames", "telegram.usernames")?;
        config.telegram.admins = list(telegram, "admins", "telegram.admins")?;
        config.telegram.chat_ids = list(telegram, "chat_ids", "telegram.chat_ids")?;

        if let Some(model) = text(openai, "model") {
            config.openai.model = model;
        }
        if let Some(prompt) = text(openai, "prompt") {
            config.openai.prompt = prompt;
        }
        if let Some(params) = openai.and_then(|o| table(o, "params")) {
            for (key, value) in params {
                if !value.is_null() {
                    config.openai.params.insert(key.clone(), value.clone());
                }
            }
        }
        if let Some(azure) = openai.and_then(|o| o.get("azure")).filter(|v| v.is_object()) {
            config.openai.azure = Some(decode("openai.azure", azure.clone())?);
        }

        if let Some(depth) = conversation
            .and_then(|c| c.get("depth"))
            .and_then(Value::as_u64)
            .filter(|d| *d > 0)
        {
            config.conversation.depth = depth as usize;
        }
        if let Some(limit) = message_limit {
            config.conversation.message_limit = MessageLimit {
                count: limit
                    .get("count")
                    .and_then(Value::as_u64)
                    .map(|c| c.min(u32::MAX as u64) as u32)
                    .unwrap_or(0),
                period: limit
                    .get("period")
                    .and_then(Value::as_str)
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_default(),
            };
        }

        config.imagine.enabled = ImagineMode::from_loaded(imagine.and_then(|i| i.get("enabled")));

        if let Some(path) = text(Some(root), "persistence_path") {
            config.persistence_path = path;
        }
        if let Some(shortcuts) = table(root, "shortcuts") {
            for (name, value) in shortcuts {
                let prompt: String = decode(&format!("shortcuts.{name}"), value.clone())?;
                config.shortcuts.insert(name.clone(), prompt);
            }
        }

        Ok(config)
    }

    /// Persisted representation, tagged with [`CURRENT_SCHEMA_VERSION`].
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(Persisted {
            schema_version: CURRENT_SCHEMA_VERSION,
            telegram: &self.telegram,
            openai: &self.openai,
            conversation: &self.conversation,
            imagine: &self.imagine,
            persistence_path: &self.persistence_path,
            shortcuts: &self.shortcuts,
        })
        .map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Per-user session settings derived from the conversation section.
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy::new(
            self.conversation.depth,
            self.conversation.message_limit.period,
        )
    }

    /// Value at `path`; `None` when an optional or map-keyed property is absent.
    pub fn get_value(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.read(&Property::parse(path)?))
    }

    pub(crate) fn read(&self, property: &Property) -> Option<Value> {
        match property {
            Property::Version => Some(json!(self.version)),
            Property::SchemaVersion => Some(json!(CURRENT_SCHEMA_VERSION)),

            Property::Telegram(None) => to_json(&self.telegram),
            Property::Telegram(Some(field)) => {
                let telegram = &self.telegram;
                Some(match field {
                    TelegramField::Token => json!(telegram.token),
                    TelegramField::Usernames => json!(telegram.usernames),
                    TelegramField::Admins => json!(telegram.admins),
                    TelegramField::ChatIds => json!(telegram.chat_ids),
                })
            }

            Property::OpenAi(None) => to_json(&self.openai),
            Property::OpenAi(Some(field)) => match field {
                OpenAiField::ApiKey => Some(json!(self.openai.api_key)),
                OpenAiField::Model => Some(json!(self.openai.model)),
                OpenAiField::Prompt => Some(json!(self.openai.prompt)),
                OpenAiField::Params(None) => to_json(&self.openai.params),
                OpenAiField::Params(Some(key)) => self.openai.params.get(key).cloned(),
                OpenAiField::Azure(None) => self.openai.azure.as_ref().and_then(to_json),
                OpenAiField::Azure(Some(field)) => self.openai.azure.as_ref().map(|azure| {
                    let text = match field {
                        AzureField::Endpoint => &azure.endpoint,
                        AzureField::Version => &azure.version,
                        AzureField::Deployment => &azure.deployment,
                    };
                    json!(text)
                }),
            },

            Property::Conversation(None) => to_json(&self.conversation),
            Property::Conversation(Some(field)) => {
                let conversation = &self.conversation;
                match field {
                    ConversationField::Depth => Some(json!(conversation.depth)),
                    ConversationField::MessageLimit(None) => to_json(&conversation.message_limit),
                    ConversationField::MessageLimit(Some(MessageLimitField::Count)) => {
                        Some(json!(conversation.message_limit.count))
                    }
                    ConversationField::MessageLimit(Some(MessageLimitField::Period)) => {
                        Some(json!(conversation.message_limit.period))
                    }
                }
            }

            Property::Imagine(None) => to_json(&self.imagine),
            Property::Imagine(Some(ImagineField::Enabled)) => Some(json!(self.imagine.enabled)),

            Property::PersistencePath => Some(json!(self.persistence_path)),

            Property::Shortcuts(None) => to_json(&self.shortcuts),
            Property::Shortcuts(Some(name)) => self.shortcuts.get(name).map(|s| json!(s)),
        }
    }

    /// Store an already validated scalar or list value at a leaf property.
    ///
    /// The value is decoded into the field's Rust type, so integer fields reject fractions and
    /// negatives and enum fields reject unknown names.
    pub(crate) fn assign(
        &mut self,
        property: &Property,
        path: &str,
        value: Value,
    ) -> Result<(), ConfigError> {
        match property {
            Property::Telegram(Some(field)) => match field {
                TelegramField::Token => self.telegram.token = decode(path, value)?,
                TelegramField::Usernames => self.telegram.usernames = decode(path, value)?,
                TelegramField::Admins => self.telegram.admins = decode(path, value)?,
                TelegramField::ChatIds => self.telegram.chat_ids = decode(path, value)?,
            },

            Property::OpenAi(Some(field)) => match field {
                OpenAiField::ApiKey => self.openai.api_key = decode(path, value)?,
                OpenAiField::Model => self.openai.model = decode(path, value)?,
                OpenAiField::Prompt => self.openai.prompt = decode(path, value)?,
                OpenAiField::Params(Some(key)) => {
                    self.openai.params.insert(key.clone(), value);
                }
                OpenAiField::Azure(Some(field)) => {
                    let text: String = decode(path, value)?;
                    let azure = self.openai.azure.get_or_insert_with(AzureOptions::default);
                    match field {
                        AzureField::Endpoint => azure.endpoint = text,
                        AzureField::Version => azure.version = text,
                        AzureField::Deployment => azure.deployment = text,
                    }
                }
                OpenAiField::Params(None) | OpenAiField::Azure(None) => {
                    return Err(ConfigError::CompositeValue(path.to_string()))
                }
            },

            Property::Conversation(Some(ConversationField::Depth)) => {
                let depth: usize = decode(path, value)?;
                if depth == 0 {
                    return Err(ConfigError::InvalidValue {
                        path: path.to_string(),
                        reason: "depth must be at least 1".into(),
                    });
                }
                self.conversation.depth = depth;
            }
            Property::Conversation(Some(ConversationField::MessageLimit(Some(field)))) => {
                let limit = &mut self.conversation.message_limit;
                match field {
                    MessageLimitField::Count => limit.count = decode(path, value)?,
                    MessageLimitField::Period => limit.period = decode(path, value)?,
                }
            }

            Property::Imagine(Some(ImagineField::Enabled)) => {
                self.imagine.enabled = decode(path, value)?
            }

            Property::PersistencePath => self.persistence_path = decode(path, value)?,

            Property::Shortcuts(Some(name)) => {
                let prompt: String = decode(path, value)?;
                self.shortcuts.insert(name.clone(), prompt);
            }

            Property::Version | Property::SchemaVersion => {
                return Err(ConfigError::NotEditable(path.to_string()))
            }
            _ => return Err(ConfigError::CompositeValue(path.to_string())),
        }
        Ok(())
    }
}

fn table<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

fn text(map: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required_str(
    map: Option<&Map<String, Value>>,
    key: &str,
    path: &str,
) -> Result<String, ConfigError> {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingKey(path.to_string()))
}

fn list<T: DeserializeOwned>(
    map: Option<&Map<String, Value>>,
    key: &str,
    path: &str,
) -> Result<Vec<T>, ConfigError> {
    match map.and_then(|m| m.get(key)) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => decode(path, value.clone()),
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

fn to_json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Value {
        json!({
            "schema_version": 4,
            "telegram": {"token": "tg-token"},
            "openai": {"api_key": "sk-key"},
        })
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = Config::from_value(&minimal()).unwrap();
        assert_eq!(config.telegram.token, "tg-token");
        assert!(config.telegram.usernames.is_empty());
        assert_eq!(config.openai.model, DEFAULT_MODEL);
        assert_eq!(config.openai.prompt, DEFAULT_PROMPT);
        assert_eq!(config.openai.params, default_params());
        assert_eq!(config.openai.azure, None);
        assert_eq!(config.conversation.depth, DEFAULT_DEPTH);
        assert_eq!(config.conversation.message_limit.count, 0);
        assert_eq!(config.conversation.message_limit.period, Period::Hour);
        assert_eq!(config.imagine.enabled, ImagineMode::UsersOnly);
        assert_eq!(config.persistence_path, DEFAULT_PERSISTENCE_PATH);
        assert_eq!(config.version, BOT_VERSION);
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_value(&json!({"openai": {"api_key": "k"}})).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "telegram.token"));

        let err = Config::from_value(&json!({"telegram": {"token": "t"}})).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "openai.api_key"));
    }

    #[test]
    fn test_params_merge_over_defaults() {
        let mut data = minimal();
        data["openai"]["params"] = json!({"temperature": 0.2, "top_p": 0.9});
        let config = Config::from_value(&data).unwrap();
        assert_eq!(config.openai.params["temperature"], json!(0.2));
        assert_eq!(config.openai.params["top_p"], json!(0.9));
        assert_eq!(config.openai.params["max_tokens"], json!(1000));
    }

    #[test]
    fn test_loading_fallbacks() {
        let mut data = minimal();
        data["conversation"] = json!({"depth": 0, "message_limit": {"count": 5, "period": "month"}});
        data["imagine"] = json!({"enabled": "sometimes"});
        data["openai"]["model"] = json!("");
        let config = Config::from_value(&data).unwrap();
        assert_eq!(config.conversation.depth, DEFAULT_DEPTH);
        assert_eq!(config.conversation.message_limit.count, 5);
        assert_eq!(config.conversation.message_limit.period, Period::Hour);
        assert_eq!(config.imagine.enabled, ImagineMode::UsersOnly);
        assert_eq!(config.openai.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_to_value_shape() {
        let mut config = Config::new("t", "k");
        config.shortcuts.insert("bugfix".into(), "Fix this code".into());
        let value = config.to_value().unwrap();
        assert_eq!(value["schema_version"], json!(CURRENT_SCHEMA_VERSION));
        assert!(value.get("version").is_none());
        assert!(value["openai"].get("azure").is_none());
        assert_eq!(value["conversation"]["message_limit"]["period"], json!("hour"));
        assert_eq!(value["imagine"]["enabled"], json!("users_only"));
        assert_eq!(value["shortcuts"]["bugfix"], json!("Fix this code"));

        let reloaded = Config::from_value(&value).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_get_value() {
        let config = Config::from_value(&minimal()).unwrap();
        assert_eq!(config.get_value("telegram.token").unwrap(), Some(json!("tg-token")));
        assert_eq!(config.get_value("conversation.depth").unwrap(), Some(json!(3)));
        assert_eq!(
            config.get_value("openai.params.temperature").unwrap(),
            Some(json!(0.7))
        );
        assert_eq!(config.get_value("openai.params.top_p").unwrap(), None);
        assert_eq!(config.get_value("openai.azure").unwrap(), None);
        assert_eq!(config.get_value("openai.azure.endpoint").unwrap(), None);
        assert_eq!(config.get_value("shortcuts.missing").unwrap(), None);
        assert_eq!(config.get_value("version").unwrap(), Some(json!(BOT_VERSION)));
        assert!(matches!(
            config.get_value("quack"),
            Err(ConfigError::NoSuchProperty(_))
        ));
    }

    #[test]
    fn test_imagine_mode_allows() {
        assert!(!ImagineMode::None.allows(true));
        assert!(!ImagineMode::None.allows(false));
        assert!(ImagineMode::UsersOnly.allows(true));
        assert!(!ImagineMode::UsersOnly.allows(false));
        assert!(ImagineMode::UsersAndGroups.allows(false));
    }

    #[test]
    fn test_session_policy() {
        let mut config = Config::new("t", "k");
        config.conversation.depth = 5;
        config.conversation.message_limit.period = Period::Minute;
        let policy = config.session_policy();
        assert_eq!(policy.depth, 5);
        assert_eq!(policy.message_period, chrono::Duration::minutes(1));
    }
}
