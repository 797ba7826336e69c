//! Chat controller use case.
//!
//! [`ChatController`] owns the per-session conversation state and drives one
//! turn at a time: validate the input, append the user entry, assemble the
//! request from the just-updated log, dispatch it, fold the push events into
//! the streaming turn, and append the finalized assistant entry.
//!
//! The controller holds `&mut self` for the whole of [`submit`], so the log
//! and the turn buffers have a single writer and overlapping turns are
//! unrepresentable from the same handle; the `in_flight` flag additionally
//! rejects re-entrant submissions from wrappers that share the controller.
//!
//! [`submit`]: ChatController::submit

use crate::ports::chat_backend::{BackendError, ChatBackend, TurnHandle};
use crate::ports::chat_progress::ChatProgressNotifier;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use deepchat_domain::{
    ChatRequest, ConversationEntry, ConversationLog, DomainError, StreamEvent, StreamingTurn,
    UseCase,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drives an interactive chat session against a [`ChatBackend`].
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
    transcript: Arc<dyn TranscriptLogger>,
    cancellation: CancellationToken,
    log: ConversationLog,
    turn: StreamingTurn,
    system_prompt: String,
    use_case: UseCase,
    in_flight: bool,
}

impl ChatController {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        let mut defaults = UseCase::defaults();
        Self {
            backend,
            transcript: Arc::new(NoTranscriptLogger),
            cancellation: CancellationToken::new(),
            log: ConversationLog::new(),
            turn: StreamingTurn::new(),
            system_prompt: String::new(),
            use_case: defaults.remove(0),
            in_flight: false,
        }
    }

    /// Attach a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Attach a cancellation token. Cancelling it abandons the in-flight
    /// turn at the next event boundary; accumulated text is kept.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Fetch the persisted system message once at startup.
    ///
    /// Failure is non-fatal: the prompt stays empty and the session
    /// proceeds.
    pub async fn initialize(&mut self) {
        match self.backend.fetch_system_message().await {
            Ok(message) => {
                if !message.is_empty() {
                    debug!("Loaded system message ({} bytes)", message.len());
                    self.system_prompt = message;
                }
            }
            Err(e) => warn!("Failed to fetch system message: {}", e),
        }
    }

    // -- Accessors --

    pub fn conversation(&self) -> &ConversationLog {
        &self.log
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn use_case(&self) -> &UseCase {
        &self.use_case
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Select the use case applied to subsequent requests.
    pub fn select_use_case(&mut self, value: &str) -> Result<&UseCase, DomainError> {
        match UseCase::find(value) {
            Some(use_case) => {
                info!("Use case selected: {}", use_case.value);
                self.use_case = use_case;
                Ok(&self.use_case)
            }
            None => Err(DomainError::UnknownUseCase(value.to_string())),
        }
    }

    /// Override the system prompt for this session only, without persisting.
    pub fn set_system_prompt(&mut self, message: &str) {
        self.system_prompt = message.to_string();
    }

    /// Persist an edited system message via the backend.
    ///
    /// On failure the local prompt is left unchanged so the caller keeps its
    /// draft and can retry.
    pub async fn update_system_prompt(&mut self, message: &str) -> Result<(), BackendError> {
        self.backend.update_system_message(message).await?;
        self.system_prompt = message.to_string();
        info!("System message updated ({} bytes)", message.len());
        Ok(())
    }

    /// Submit one user message and drive the turn to completion.
    ///
    /// Returns the finalized assistant entry (the synthetic error entry
    /// when the turn fails), so every accepted user message ends up with
    /// exactly one paired response in the log. Rejected submissions mutate
    /// nothing and issue no backend call.
    pub async fn submit(
        &mut self,
        input: &str,
        progress: &dyn ChatProgressNotifier,
    ) -> Result<ConversationEntry, DomainError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::EmptyInput);
        }
        if self.in_flight {
            return Err(DomainError::TurnInFlight);
        }
        self.in_flight = true;

        self.log.append(ConversationEntry::user(input));
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "text": input }),
        ));

        // History is read after the user entry lands, never from an earlier
        // snapshot.
        let request =
            ChatRequest::assemble(&self.system_prompt, &self.log, self.use_case.temperature);
        debug!(
            "Dispatching turn: {} messages, temperature {}",
            request.messages.len(),
            request.temperature
        );
        progress.on_turn_start();

        let entry = match self.backend.send_chat(request).await {
            Ok(handle) => self.consume_stream(handle, progress).await,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "turn_failed",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                ConversationEntry::error_response()
            }
        };

        info!("Turn finalized ({} bytes)", entry.content.len());
        self.transcript.log(TranscriptEvent::new(
            "assistant_message",
            serde_json::json!({
                "bytes": entry.content.len(),
                "reasoning": entry.reasoning.is_some(),
            }),
        ));

        self.log.append(entry.clone());
        progress.on_turn_end();
        self.in_flight = false;
        Ok(entry)
    }

    /// Fold push events into the streaming turn until a terminal event,
    /// channel close, or cancellation finalizes it.
    async fn consume_stream(
        &mut self,
        mut handle: TurnHandle,
        progress: &dyn ChatProgressNotifier,
    ) -> ConversationEntry {
        let cancellation = self.cancellation.clone();
        loop {
            let event = tokio::select! {
                event = handle.recv() => event,
                _ = cancellation.cancelled() => {
                    // Abandoned turn: stop consuming; whatever accumulated
                    // becomes the entry. Dropping the handle tears the
                    // subscription down.
                    debug!("Turn cancelled mid-stream");
                    return self.turn.flush();
                }
            };

            match event {
                Some(event) => {
                    match &event {
                        StreamEvent::ContentDelta(chunk) => progress.on_content_chunk(chunk),
                        StreamEvent::ReasoningDelta(chunk) => progress.on_reasoning_chunk(chunk),
                        StreamEvent::Error(e) => warn!("Stream error: {}", e),
                        StreamEvent::Completed(_) => {}
                    }
                    if let Some(entry) = self.turn.apply(event) {
                        return entry;
                    }
                }
                None => {
                    // Channel closed without a terminal event.
                    return if self.turn.is_active() {
                        warn!("Push channel closed mid-turn; finalizing accumulated text");
                        self.turn.flush()
                    } else {
                        warn!("Push channel closed before any fragment arrived");
                        ConversationEntry::error_response()
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_progress::NoChatProgress;
    use deepchat_domain::{ERROR_RESPONSE, FinalPayload, Role};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    /// One scripted backend turn.
    enum Script {
        /// Send the events, then close the channel.
        Events(Vec<StreamEvent>),
        /// Send the events and keep the channel open (never terminates).
        EventsThenOpen(Vec<StreamEvent>),
        /// Reject the dispatch itself.
        Fail,
    }

    struct MockBackend {
        system_message: Mutex<String>,
        fail_fetch: AtomicBool,
        fail_update: AtomicBool,
        scripts: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<ChatRequest>>,
        // Keeps senders alive so scripted channels stay open.
        held: Mutex<Vec<mpsc::Sender<StreamEvent>>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                system_message: Mutex::new(String::new()),
                fail_fetch: AtomicBool::new(false),
                fail_update: AtomicBool::new(false),
                scripts: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
                held: Mutex::new(Vec::new()),
            }
        }

        fn with_system_message(self, message: &str) -> Self {
            *self.system_message.lock().unwrap() = message.to_string();
            self
        }

        fn script(&self, script: Script) {
            self.scripts.lock().unwrap().push_back(script);
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatBackend for MockBackend {
        async fn fetch_system_message(&self) -> Result<String, BackendError> {
            if self.fail_fetch.load(Ordering::Relaxed) {
                return Err(BackendError::ConnectionError("no backend".to_string()));
            }
            Ok(self.system_message.lock().unwrap().clone())
        }

        async fn update_system_message(&self, message: &str) -> Result<(), BackendError> {
            if self.fail_update.load(Ordering::Relaxed) {
                return Err(BackendError::RequestFailed("update rejected".to_string()));
            }
            *self.system_message.lock().unwrap() = message.to_string();
            Ok(())
        }

        async fn send_chat(&self, request: ChatRequest) -> Result<TurnHandle, BackendError> {
            self.requests.lock().unwrap().push(request);

            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Script::Events(vec![StreamEvent::Completed(None)]));

            let events = match script {
                Script::Fail => {
                    return Err(BackendError::RequestFailed("dispatch rejected".to_string()));
                }
                Script::Events(events) => {
                    let (tx, rx) = mpsc::channel(events.len().max(1));
                    for event in events {
                        tx.try_send(event).unwrap();
                    }
                    // tx dropped here; channel closes after the events drain
                    return Ok(TurnHandle::new(rx));
                }
                Script::EventsThenOpen(events) => events,
            };

            let (tx, rx) = mpsc::channel(events.len().max(1));
            for event in events {
                tx.try_send(event).unwrap();
            }
            self.held.lock().unwrap().push(tx);
            Ok(TurnHandle::new(rx))
        }
    }

    /// Records every progress callback in order.
    struct RecordingProgress {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ChatProgressNotifier for RecordingProgress {
        fn on_turn_start(&self) {
            self.calls.lock().unwrap().push("start".to_string());
        }

        fn on_content_chunk(&self, chunk: &str) {
            self.calls.lock().unwrap().push(format!("content:{chunk}"));
        }

        fn on_reasoning_chunk(&self, chunk: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("reasoning:{chunk}"));
        }

        fn on_turn_end(&self) {
            self.calls.lock().unwrap().push("end".to_string());
        }
    }

    fn content(s: &str) -> StreamEvent {
        StreamEvent::ContentDelta(s.to_string())
    }

    fn reasoning(s: &str) -> StreamEvent {
        StreamEvent::ReasoningDelta(s.to_string())
    }

    fn controller(backend: Arc<MockBackend>) -> ChatController {
        ChatController::new(backend)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_submit_streams_and_finalizes() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![
            content("Hel"),
            content("lo"),
            reasoning("think"),
            StreamEvent::Completed(None),
        ]));
        let mut controller = controller(backend);

        let entry = controller.submit("hi there", &NoChatProgress).await.unwrap();

        assert_eq!(entry.role, Role::Assistant);
        assert_eq!(entry.content, "Hello");
        assert_eq!(entry.reasoning.as_deref(), Some("think"));

        let log = controller.conversation().entries();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].role, Role::User);
        assert_eq!(log[0].content, "hi there");
        assert_eq!(log[1], entry);
        assert!(!controller.is_in_flight());
    }

    #[tokio::test]
    async fn test_request_contains_system_prompt_and_full_history() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![StreamEvent::Completed(Some(
            FinalPayload {
                content: "B".to_string(),
                reasoning: String::new(),
            },
        ))]));
        backend.script(Script::Events(vec![StreamEvent::Completed(None)]));

        let mut controller = controller(backend.clone());
        controller.update_system_prompt("S").await.unwrap();

        controller.submit("A", &NoChatProgress).await.unwrap();
        controller.submit("C", &NoChatProgress).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);

        let expected: Vec<(&str, &str)> = vec![
            ("system", "S"),
            ("user", "A"),
            ("assistant", "B"),
            ("user", "C"),
        ];
        let actual: Vec<(&str, &str)> = requests[1]
            .messages
            .iter()
            .map(|m| (m.role.as_str(), m.content.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_side_effects() {
        let backend = Arc::new(MockBackend::new());
        let mut controller = controller(backend.clone());

        let result = controller.submit("   \t ", &NoChatProgress).await;

        assert_eq!(result.unwrap_err(), DomainError::EmptyInput);
        assert!(controller.conversation().is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_resubmission() {
        let backend = Arc::new(MockBackend::new());
        let mut controller = controller(backend.clone());
        controller.in_flight = true;

        let result = controller.submit("hello", &NoChatProgress).await;

        assert_eq!(result.unwrap_err(), DomainError::TurnInFlight);
        assert!(controller.conversation().is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_substitutes_error_entry() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Fail);
        let mut controller = controller(backend);

        let entry = controller.submit("hi", &NoChatProgress).await.unwrap();

        assert_eq!(entry.content, ERROR_RESPONSE);
        let log = controller.conversation().entries();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].content, "hi");
        assert_eq!(log[1].content, ERROR_RESPONSE);
        assert!(!controller.is_in_flight());
    }

    #[tokio::test]
    async fn test_stream_error_substitutes_error_entry() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![
            content("doomed"),
            StreamEvent::Error("boom".to_string()),
        ]));
        let mut controller = controller(backend);

        let entry = controller.submit("hi", &NoChatProgress).await.unwrap();
        assert_eq!(entry.content, ERROR_RESPONSE);
        assert_eq!(controller.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_channel_close_mid_turn_finalizes_partial_text() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![content("par"), content("tial")]));
        let mut controller = controller(backend);

        let entry = controller.submit("hi", &NoChatProgress).await.unwrap();
        assert_eq!(entry.content, "partial");
    }

    #[tokio::test]
    async fn test_channel_close_before_any_fragment_is_an_error() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![]));
        let mut controller = controller(backend);

        let entry = controller.submit("hi", &NoChatProgress).await.unwrap();
        assert_eq!(entry.content, ERROR_RESPONSE);
    }

    #[tokio::test]
    async fn test_every_user_message_gets_exactly_one_response() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![content("one"), StreamEvent::Completed(None)]));
        backend.script(Script::Fail);
        backend.script(Script::Events(vec![StreamEvent::Error("x".to_string())]));
        let mut controller = controller(backend);

        controller.submit("q1", &NoChatProgress).await.unwrap();
        controller.submit("q2", &NoChatProgress).await.unwrap();
        controller.submit("q3", &NoChatProgress).await.unwrap();

        let roles: Vec<Role> = controller
            .conversation()
            .entries()
            .iter()
            .map(|e| e.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn test_selected_use_case_sets_request_temperature() {
        let backend = Arc::new(MockBackend::new());
        let mut controller = controller(backend.clone());

        controller.select_use_case("coding").unwrap();
        controller.submit("2+2", &NoChatProgress).await.unwrap();

        assert_eq!(backend.requests()[0].temperature, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_use_case_is_rejected_and_selection_kept() {
        let backend = Arc::new(MockBackend::new());
        let mut controller = controller(backend);

        let err = controller.select_use_case("poetry").unwrap_err();
        assert_eq!(err, DomainError::UnknownUseCase("poetry".to_string()));
        assert_eq!(controller.use_case().value, "general");
    }

    #[tokio::test]
    async fn test_initialize_loads_system_message() {
        let backend = Arc::new(MockBackend::new().with_system_message("be terse"));
        let mut controller = controller(backend);

        controller.initialize().await;
        assert_eq!(controller.system_prompt(), "be terse");
    }

    #[tokio::test]
    async fn test_initialize_failure_is_nonfatal() {
        let backend = Arc::new(MockBackend::new());
        backend.fail_fetch.store(true, Ordering::Relaxed);
        let mut controller = controller(backend);

        controller.initialize().await;
        assert_eq!(controller.system_prompt(), "");

        // The session still works with an empty prompt
        let entry = controller.submit("hi", &NoChatProgress).await.unwrap();
        assert_eq!(entry.role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_update_failure_preserves_local_prompt() {
        let backend = Arc::new(MockBackend::new().with_system_message("old"));
        let mut controller = controller(backend.clone());
        controller.initialize().await;

        backend.fail_update.store(true, Ordering::Relaxed);
        let result = controller.update_system_prompt("new").await;

        assert!(result.is_err());
        assert_eq!(controller.system_prompt(), "old");
    }

    #[tokio::test]
    async fn test_progress_receives_chunks_in_arrival_order() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::Events(vec![
            reasoning("th"),
            content("Hel"),
            reasoning("ink"),
            content("lo"),
            StreamEvent::Completed(None),
        ]));
        let mut controller = controller(backend);
        let progress = RecordingProgress::new();

        controller.submit("hi", &progress).await.unwrap();

        assert_eq!(
            progress.calls(),
            vec![
                "start",
                "reasoning:th",
                "content:Hel",
                "reasoning:ink",
                "content:lo",
                "end",
            ]
        );
    }

    #[tokio::test]
    async fn test_cancellation_abandons_turn_keeping_accumulated_text() {
        let backend = Arc::new(MockBackend::new());
        backend.script(Script::EventsThenOpen(vec![content("par")]));

        let token = CancellationToken::new();
        let mut controller = controller(backend).with_cancellation(token.clone());

        let canceller = token.clone();
        let (result, _) = tokio::join!(controller.submit("hi", &NoChatProgress), async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let entry = result.unwrap();
        assert_eq!(entry.content, "par");
        assert!(!controller.is_in_flight());
        assert_eq!(controller.conversation().len(), 2);
    }
}
