//! # telegram-bot
//!
//! Application layer of the chat bot. Incoming [`Message`]s run through a [`HandlerChain`]:
//! logging and access filtering first, then the command handlers, then the question handler that
//! applies rate limiting and conversation history around the model call.
//!
//! Transport (receiving and sending platform messages) is outside this crate: a front end converts
//! platform updates into [`Message`]s, calls [`HandlerChain::handle`] and sends back the reply text.

pub mod chain;
pub mod cli;
pub mod filters;
pub mod handlers;
pub mod questions;
pub mod shortcuts;
pub mod state;

pub use bot_core::{Chat, Handler, HandlerResponse, Message, User};
pub use chain::HandlerChain;
pub use filters::{FilterError, Filters};
pub use handlers::build_chain;
pub use questions::{extract_question, prepare};
pub use shortcuts::ShortcutError;
pub use state::{BotState, SharedConfig};
