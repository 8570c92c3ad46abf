//! One chat panel: its transcript and the idle/sending state machine.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::{AnswerClient, AnswerPayload, AskError, AskOptions};
use crate::i18n::{label, Translate};
use crate::mode::ChatProfile;
use crate::state::{Author, ChatTurn};
use crate::store::MessageStore;

const NO_DATA_FALLBACK: &str = "Aucune réponse reçue du serveur.";
const ERROR_FALLBACK: &str = "Désolé, une erreur s'est produite.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Sending,
}

/// A request that has been accepted but not yet sent.
///
/// Owns everything it needs so it can be moved onto a background task.
pub struct PendingAsk {
    client: Arc<dyn AnswerClient>,
    prompt: String,
    options: AskOptions,
}

impl PendingAsk {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub async fn run(self) -> Result<AnswerPayload, AskError> {
        self.client.ask(&self.prompt, &self.options).await
    }
}

pub struct Conversation {
    profile: ChatProfile,
    client: Arc<dyn AnswerClient>,
    translator: Arc<dyn Translate>,
    options: AskOptions,
    store: MessageStore,
    state: ViewState,
    revision: u64,
}

impl Conversation {
    pub fn new(
        profile: ChatProfile,
        client: Arc<dyn AnswerClient>,
        translator: Arc<dyn Translate>,
        options: AskOptions,
    ) -> Self {
        let welcome = ChatTurn::welcome(label(
            translator.as_ref(),
            profile.welcome_key,
            profile.welcome_fallback,
        ));
        Self {
            profile,
            client,
            translator,
            options,
            store: MessageStore::with_welcome(welcome),
            state: ViewState::Idle,
            revision: 0,
        }
    }

    /// Accept a submission: append the user turn and move to `Sending`.
    ///
    /// Returns `None`, with no state change, for blank text or while a
    /// request is already outstanding.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingAsk> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return None;
        }
        if self.state == ViewState::Sending {
            debug!("submission ignored while a request is in flight");
            return None;
        }

        let id = self.store.next_id();
        self.store.append(ChatTurn::new(id, Author::User, prompt));
        self.state = ViewState::Sending;
        self.revision += 1;
        info!(mode = self.profile.mode.as_str(), "prompt submitted");

        Some(PendingAsk {
            client: Arc::clone(&self.client),
            prompt: prompt.to_string(),
            options: self.options.clone(),
        })
    }

    /// Record the outcome of the outstanding request and return to `Idle`.
    /// Always appends exactly one turn.
    pub fn settle(&mut self, outcome: Result<AnswerPayload, AskError>) {
        if self.state != ViewState::Sending {
            warn!("dropping an outcome that arrived with no request in flight");
            return;
        }

        let content = match outcome {
            Ok(payload) => payload.into_text(&self.label("chatbot.no_data", NO_DATA_FALLBACK)),
            Err(err) => {
                warn!(error = %err, "answer request failed");
                format!("{}: {}", self.label("chatbot.error", ERROR_FALLBACK), err)
            }
        };

        let id = self.store.next_id();
        self.store.append(ChatTurn::new(id, Author::Assistant, content));
        self.state = ViewState::Idle;
        self.revision += 1;
    }

    /// Submit and wait for the reply in place
    pub async fn submit(&mut self, text: &str) -> bool {
        let Some(pending) = self.begin_submit(text) else {
            return false;
        };
        let outcome = pending.run().await;
        self.settle(outcome);
        true
    }

    /// Switch the string table and refresh the welcome turn from it
    pub fn relocalize(&mut self, translator: Arc<dyn Translate>) {
        self.translator = translator;
        let welcome = ChatTurn::welcome(
            self.label(self.profile.welcome_key, self.profile.welcome_fallback),
        );
        self.store.replace_welcome(welcome);
        self.revision += 1;
    }

    pub fn label(&self, key: &str, fallback: &str) -> String {
        label(self.translator.as_ref(), key, fallback)
    }

    pub fn turns(&self) -> &[ChatTurn] {
        self.store.turns()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == ViewState::Sending
    }

    /// Bumped on every transcript change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn profile(&self) -> &ChatProfile {
        &self.profile
    }

    pub fn options(&self) -> &AskOptions {
        &self.options
    }
}
