//! Message pipeline — the single entry point transport adapters invoke.
//!
//! Per inbound message, strictly ordered: empty check → duplicate claim →
//! command dispatch → crisis check → generation. An empty return string
//! means "send nothing".

use tracing::{debug, info};

use haven_core::config::CrisisConfig;
use haven_core::types::{InboundMessage, Role};
use haven_crisis::{crisis_response, log_detection, CrisisDetector, Severity};
use haven_store::{ConversationStore, StoreStats};

use crate::commands::{parse_command, Command};
use crate::generator::ResponseGenerator;
use crate::prompts;

pub struct MessagePipeline {
    store: ConversationStore,
    detector: CrisisDetector,
    generator: ResponseGenerator,
    crisis: CrisisConfig,
}

impl MessagePipeline {
    pub fn new(
        store: ConversationStore,
        detector: CrisisDetector,
        generator: ResponseGenerator,
        crisis: CrisisConfig,
    ) -> Self {
        Self {
            store,
            detector,
            generator,
            crisis,
        }
    }

    /// Handle one inbound message and produce the outgoing text.
    ///
    /// The duplicate claim happens before any processing: once a message
    /// ID is marked seen, a redelivery produces nothing even if a later
    /// step failed the first time.
    pub async fn handle(&self, msg: &InboundMessage) -> String {
        let user = &msg.sender;
        let text = msg.text.trim();

        if text.is_empty() {
            return String::new();
        }

        if let Some(message_id) = msg.message_id.as_deref() {
            if self.store.seen(user, message_id) {
                debug!(user = %user, message_id, "duplicate message ignored");
                return String::new();
            }
            self.store.mark_seen(user, message_id);
        }

        info!(user = %user, "handling message");

        if let Some(command) = parse_command(text) {
            return self.dispatch_command(command, msg);
        }

        let verdict = self.detector.detect(text);
        if verdict.is_crisis {
            log_detection(user, text, &verdict);
            self.store.append(user, Role::User, text);
            let response = crisis_response(verdict.severity, &self.crisis);
            self.store.append(user, Role::Assistant, &response);
            return response;
        }

        let is_new = self.store.is_new_conversation(user);
        self.store.append(user, Role::User, text);
        let history = self.store.history(user);
        let reply = self.generator.generate(text, &history, is_new).await;
        self.store.append(user, Role::Assistant, &reply);
        reply
    }

    /// Command dispatch table. Only `start` and `reset` touch state.
    fn dispatch_command(&self, command: Command, msg: &InboundMessage) -> String {
        match command {
            Command::Help => self.generator.help_text(),
            Command::Start => {
                self.store.clear(&msg.sender);
                self.generator.greeting()
            }
            Command::Reset => {
                self.store.clear(&msg.sender);
                prompts::reset_ack()
            }
            Command::Resources => prompts::resources_text(&self.crisis),
            Command::Crisis => crisis_response(Severity::Low, &self.crisis),
        }
    }

    /// Store occupancy, for the monitoring endpoint.
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }
}
