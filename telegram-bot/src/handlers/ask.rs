//! Asking the model on behalf of a user: message limit, history and chat overrides around the
//! model or image call.

use std::time::Instant;

use anyhow::anyhow;
use bot_core::{HandlerResponse, Message};
use llm_client::{AskRequest, ImageSize};
use prompt::format_transcript;
use session::{format_duration, ChatData, UserData};
use tracing::{debug, error, info};

use crate::questions::prepare;
use crate::state::BotState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Asker {
    Text,
    Image,
}

/// Answers `question` (in its raw form, with `+`, `!shortcut` or `/command` prefixes) for the
/// sender of `message`.
///
/// Throttled users get a wait notice and are not counted. Every other request counts against
/// the message limit, whether or not the model call succeeds.
pub(crate) async fn reply_to(
    state: &BotState,
    message: &Message,
    question: &str,
    asker: Asker,
) -> HandlerResponse {
    let user_id = message.user.id;
    let config = state.config.read().await.clone();
    let is_known = state
        .filters
        .read()
        .await
        .is_known_user(message.user.username_or_empty());
    let limit = config.conversation.message_limit;
    let policy = config.session_policy();

    let prepared = {
        let mut sessions = state.sessions.lock().await;
        let (user_ns, chat_ns) = sessions.user_and_chat(user_id, message.chat.id);
        let mut user = UserData::new(user_ns, policy);

        let counter = user.message_counter();
        if limit.count > 0
            && !is_known
            && counter.value() >= i64::from(limit.count)
            && !counter.is_expired()
        {
            let wait = format_duration(counter.expires_after());
            info!(user_id, count = counter.value(), wait = %wait, "Message limit reached");
            return HandlerResponse::Reply(format!(
                "Please wait {wait} before asking a new question."
            ));
        }

        let chat = ChatData::new(chat_ns);
        let model = chat.model().unwrap_or(config.openai.model.as_str()).to_string();
        let prompt = chat.prompt().unwrap_or(config.openai.prompt.as_str()).to_string();

        match prepare(question, &config.shortcuts) {
            Ok((question, _)) if question.is_empty() => return HandlerResponse::Stop,
            Ok((question, is_follow_up)) => {
                let mut history = user.messages();
                let past = if is_follow_up {
                    history.as_list()
                } else {
                    history.clear();
                    Vec::new()
                };
                Ok((question, past, model, prompt))
            }
            Err(e) => Err(anyhow!(e)),
        }
    };

    let started = Instant::now();
    let answer = match &prepared {
        Ok((question, past, model, prompt)) => match asker {
            Asker::Text => {
                let request = AskRequest::new(model.as_str(), prompt.as_str(), question.as_str())
                    .with_history(
                        past.iter()
                            .map(|m| (m.question.clone(), m.answer.clone()))
                            .collect(),
                    )
                    .with_params(config.openai.params.clone());
                debug!(transcript = %format_transcript(&request.messages()), "Model request");
                state.llm.ask(request).await
            }
            Asker::Image => {
                let (size, caption) = ImageSize::extract(question);
                state
                    .images
                    .imagine(&caption, size)
                    .await
                    .map(|url| format!("{caption}\n{url}"))
            }
        },
        Err(e) => Err(anyhow!(e.to_string())),
    };

    let mut sessions = state.sessions.lock().await;
    let mut user = UserData::new(sessions.user(user_id), policy);
    if let (Ok(answer), Ok((question, past, _, _))) = (&answer, &prepared) {
        info!(
            user_id,
            n_chars = question.len(),
            len_history = past.len(),
            took_ms = started.elapsed().as_millis() as u64,
            "Question answered"
        );
        if asker == Asker::Text {
            user.messages().add(question.as_str(), answer.as_str());
        }
    }
    let count = user.message_counter().increment();
    debug!(user_id, count, "Message counter incremented");

    match answer {
        Ok(answer) => HandlerResponse::Reply(answer),
        Err(e) => {
            error!(user_id, error = %e, "Failed to answer");
            HandlerResponse::Reply(format!("Failed to answer. Reason: {e}"))
        }
    }
}
