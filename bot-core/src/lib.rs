//! # bot-core
//!
//! Core types and traits for the chat bot: [`Handler`], message, user and chat types, errors,
//! and tracing initialization. Transport-agnostic; the application crate wires handlers into a chain.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{BotError, Result};
pub use logger::{init_console_tracing, init_tracing};
pub use types::{Chat, Handler, HandlerResponse, Message, User};
