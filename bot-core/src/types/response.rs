//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}

impl HandlerResponse {
    /// Reply text, if any.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            HandlerResponse::Reply(text) => Some(text),
            _ => None,
        }
    }
}
