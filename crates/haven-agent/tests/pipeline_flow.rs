//! End-to-end pipeline behavior with a scripted provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use haven_agent::provider::{ChatRequest, ChatResponse, LlmProvider, ProviderError};
use haven_agent::{MessagePipeline, ResponseGenerator};
use haven_core::config::{BotConfig, CrisisConfig, ProviderConfig};
use haven_core::types::{InboundMessage, Role, UserId};
use haven_crisis::CrisisDetector;
use haven_store::ConversationStore;

struct MockProvider {
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<ChatRequest>>>,
    result: fn() -> Result<ChatResponse, ProviderError>,
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(req.clone());
        (self.result)()
    }
}

struct Harness {
    pipeline: MessagePipeline,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<ChatRequest>>>,
}

fn harness(result: fn() -> Result<ChatResponse, ProviderError>) -> Harness {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));
    let provider = MockProvider {
        calls: calls.clone(),
        last_request: last_request.clone(),
        result,
    };
    let provider_config = ProviderConfig {
        api_key: "test".to_string(),
        base_url: "http://localhost".to_string(),
        model: "test-model".to_string(),
        max_tokens: 150,
        temperature: 0.8,
    };
    let crisis = CrisisConfig::default();
    let generator = ResponseGenerator::new(
        Box::new(provider),
        &provider_config,
        &BotConfig::default(),
        &crisis,
    );
    let pipeline = MessagePipeline::new(
        ConversationStore::new(),
        CrisisDetector::default(),
        generator,
        crisis,
    );
    Harness {
        pipeline,
        calls,
        last_request,
    }
}

fn ok_reply() -> Result<ChatResponse, ProviderError> {
    Ok(ChatResponse {
        content: "hey, talk to me".to_string(),
        model: "test-model".to_string(),
    })
}

fn msg(sender: &str, text: &str) -> InboundMessage {
    InboundMessage {
        sender: UserId::from(sender),
        text: text.to_string(),
        message_id: None,
    }
}

fn msg_with_id(sender: &str, text: &str, id: &str) -> InboundMessage {
    InboundMessage {
        sender: UserId::from(sender),
        text: text.to_string(),
        message_id: Some(id.to_string()),
    }
}

#[tokio::test]
async fn empty_text_produces_nothing() {
    let h = harness(ok_reply);
    assert_eq!(h.pipeline.handle(&msg("u1", "")).await, "");
    assert_eq!(h.pipeline.handle(&msg("u1", "   \n ")).await, "");
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.pipeline.stats().total_messages, 0);
}

#[tokio::test]
async fn duplicate_message_id_is_suppressed() {
    let h = harness(ok_reply);
    let first = h.pipeline.handle(&msg_with_id("u1", "hello", "m-1")).await;
    assert!(!first.is_empty());
    // Redelivery with the same ID produces nothing, even with new text.
    let second = h
        .pipeline
        .handle(&msg_with_id("u1", "different text", "m-1"))
        .await;
    assert_eq!(second, "");
    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn help_command_returns_help_without_touching_history() {
    let h = harness(ok_reply);
    for text in ["help", "/help", "!help"] {
        let reply = h.pipeline.handle(&msg("u1", text)).await;
        assert!(reply.contains("Real talk about what's on your mind"));
    }
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.pipeline.stats().total_messages, 0);
}

#[tokio::test]
async fn start_clears_history_and_greets() {
    let h = harness(ok_reply);
    h.pipeline.handle(&msg("u1", "hello there")).await;
    assert_eq!(h.pipeline.stats().total_messages, 2);

    let greeting = h.pipeline.handle(&msg("u1", "/start")).await;
    assert!(greeting.contains("bouncer for your mental space"));
    assert_eq!(h.pipeline.stats().total_messages, 0);
}

#[tokio::test]
async fn reset_clears_history_and_acknowledges() {
    let h = harness(ok_reply);
    h.pipeline.handle(&msg("u1", "hello there")).await;
    let reply = h.pipeline.handle(&msg("u1", "reset")).await;
    assert_eq!(reply, "Conversation reset. How can I support you today?");
    assert_eq!(h.pipeline.stats().total_messages, 0);
}

#[tokio::test]
async fn crisis_command_forces_low_severity_script() {
    let h = harness(ok_reply);
    let reply = h.pipeline.handle(&msg("u1", "crisis")).await;
    assert!(reply.contains("CRISIS RESOURCES"));
    assert!(reply.contains("988"));
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn resources_command_lists_support_lines() {
    let h = harness(ok_reply);
    let reply = h.pipeline.handle(&msg("u1", "resources")).await;
    assert!(reply.contains("Mental Health Resources"));
    assert!(reply.contains("988"));
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn high_severity_crisis_skips_the_model() {
    let h = harness(ok_reply);
    let reply = h
        .pipeline
        .handle(&msg("u1", "I want to kill myself and end my life"))
        .await;
    assert!(reply.contains("concerned about your safety"));
    assert!(reply.contains("988"));
    // The model is never invoked on a detected crisis turn.
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    // Both the user turn and the crisis script land in history.
    assert_eq!(h.pipeline.stats().total_messages, 2);
}

#[tokio::test]
async fn first_message_generates_with_empty_prior_history() {
    let h = harness(ok_reply);
    let reply = h.pipeline.handle(&msg("u1", "rough day today")).await;
    assert_eq!(reply, "hey, talk to me");

    let req = h.last_request.lock().unwrap().take().unwrap();
    // New conversation: bare persona, and the only turn is the user's.
    assert!(!req.system.contains("ongoing conversation"));
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].content, "rough day today");
    assert!(matches!(req.messages[0].role, Role::User));

    // History now holds exactly user then assistant.
    assert_eq!(h.pipeline.stats().total_messages, 2);
}

#[tokio::test]
async fn second_message_marks_conversation_as_ongoing() {
    let h = harness(ok_reply);
    h.pipeline.handle(&msg("u1", "rough day today")).await;
    h.pipeline.handle(&msg("u1", "still thinking about it")).await;

    let req = h.last_request.lock().unwrap().take().unwrap();
    assert!(req.system.contains("ongoing conversation"));
    // user, assistant, user — the current turn is already last in history.
    assert_eq!(req.messages.len(), 3);
}

#[tokio::test]
async fn rate_limited_provider_yields_throttle_fallback() {
    let h = harness(|| Err(ProviderError::RateLimited { retry_after_ms: 5000 }));
    let reply = h.pipeline.handle(&msg("u1", "hello")).await;
    assert!(reply.contains("high volume"));
    assert!(reply.contains("988"));
}

#[tokio::test]
async fn failed_provider_yields_generic_fallback() {
    let h = harness(|| {
        Err(ProviderError::Api {
            status: 500,
            message: "upstream".to_string(),
        })
    });
    let reply = h.pipeline.handle(&msg("u1", "hello")).await;
    assert!(reply.contains("trouble responding"));
    assert!(reply.contains("988"));
    // The fallback still lands in history as the assistant turn.
    assert_eq!(h.pipeline.stats().total_messages, 2);
}

#[tokio::test]
async fn distinct_users_have_independent_conversations() {
    let h = harness(ok_reply);
    h.pipeline.handle(&msg("u1", "hello")).await;
    h.pipeline.handle(&msg("u2", "hi there")).await;

    let stats = h.pipeline.stats();
    assert_eq!(stats.active_conversations, 2);
    assert_eq!(stats.total_messages, 4);

    let req = h.last_request.lock().unwrap().take().unwrap();
    // u2's request sees only u2's turn.
    assert_eq!(req.messages.len(), 1);
}
