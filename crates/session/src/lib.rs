//! # Session state
//!
//! Per-user and per-chat state bound to a caller-owned [`Namespace`]:
//! - [`ConversationHistory`]: bounded question/answer queue used as model context.
//! - [`ExpiringCounter`]: message counter that resets after a period (rate limiting).
//! - [`UserData`] / [`ChatData`]: the per-user and per-chat views over a namespace.
//!
//! Views borrow the namespace mutably and write through to it; the namespace (and the
//! [`SessionStore`] holding all of them) is owned and persisted by the application.

mod counter;
mod error;
mod history;
mod namespace;
mod period;
mod store;
mod timestamped;
mod user_data;

pub use counter::ExpiringCounter;
pub use error::SessionError;
pub use history::{ConversationHistory, UserMessage};
pub use namespace::{Namespace, Stamped};
pub use period::{format_duration, parse_period, Period};
pub use store::SessionStore;
pub use timestamped::TimestampedValue;
pub use user_data::{ChatData, SessionPolicy, UserData, DEFAULT_HISTORY_DEPTH};
