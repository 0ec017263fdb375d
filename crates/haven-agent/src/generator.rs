//! Response generation — wraps the provider call with prompt assembly and
//! a deterministic fallback. `generate` never fails: callers always get
//! usable text, even when the provider is down.

use tracing::{info, warn};

use haven_core::config::{BotConfig, CrisisConfig, ProviderConfig};
use haven_core::types::{ConversationEntry, Role};

use crate::prompts;
use crate::provider::{ChatRequest, ChatResponse, LlmProvider, Message, ProviderError};

pub struct ResponseGenerator {
    provider: Box<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    bot_name: String,
    crisis: CrisisConfig,
}

impl ResponseGenerator {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        config: &ProviderConfig,
        bot: &BotConfig,
        crisis: &CrisisConfig,
    ) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            bot_name: bot.name.clone(),
            crisis: crisis.clone(),
        }
    }

    /// Produce a reply for the user's message given the current history.
    ///
    /// Exactly one provider attempt, no retry. Any failure (network, API,
    /// empty completion, throttling) degrades to a fixed fallback script.
    pub async fn generate(
        &self,
        user_message: &str,
        history: &[ConversationEntry],
        is_new_conversation: bool,
    ) -> String {
        match self.complete(user_message, history, is_new_conversation).await {
            Ok(resp) => {
                info!(model = %resp.model, "completion ok");
                resp.content.trim().to_string()
            }
            Err(err) => {
                warn!(provider = %self.provider.name(), error = %err, "completion failed, using fallback");
                self.fallback(&err)
            }
        }
    }

    async fn complete(
        &self,
        user_message: &str,
        history: &[ConversationEntry],
        is_new_conversation: bool,
    ) -> Result<ChatResponse, ProviderError> {
        let system = if is_new_conversation {
            prompts::SYSTEM_PROMPT.to_string()
        } else {
            format!("{}\n\n{}", prompts::SYSTEM_PROMPT, prompts::CONVERSATION_CONTEXT)
        };

        let mut messages: Vec<Message> = history
            .iter()
            .map(|entry| Message {
                role: entry.role,
                content: entry.content.clone(),
            })
            .collect();

        // The caller usually appends the user turn to history before
        // generating; only add it here when it isn't the last turn already.
        let already_last = history
            .last()
            .map(|entry| entry.role == Role::User && entry.content == user_message)
            .unwrap_or(false);
        if !already_last {
            messages.push(Message {
                role: Role::User,
                content: user_message.to_string(),
            });
        }

        let req = ChatRequest {
            model: self.model.clone(),
            system,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        self.provider.send(&req).await
    }

    fn fallback(&self, err: &ProviderError) -> String {
        if err.is_rate_limited() {
            prompts::rate_limit_fallback(&self.crisis)
        } else {
            prompts::generic_fallback(&self.crisis)
        }
    }

    pub fn greeting(&self) -> String {
        prompts::greeting(&self.bot_name)
    }

    pub fn help_text(&self) -> String {
        prompts::help_text(&self.bot_name)
    }
}
