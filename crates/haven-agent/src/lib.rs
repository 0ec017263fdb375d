pub mod commands;
pub mod generator;
pub mod openai;
pub mod pipeline;
pub mod prompts;
pub mod provider;

pub use generator::ResponseGenerator;
pub use pipeline::MessagePipeline;
pub use provider::{ChatRequest, ChatResponse, LlmProvider, Message, ProviderError};
