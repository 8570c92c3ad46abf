use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{AnswerClient, AnswerPayload, AskError, AskOptions};

/// Answer client that replays canned outcomes and counts calls
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<AnswerPayload, AskError>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Result<AnswerPayload, AskError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerClient for ScriptedClient {
    async fn ask(&self, prompt: &str, _options: &AskOptions) -> Result<AnswerPayload, AskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AnswerPayload::text(format!("echo: {prompt}"))))
    }
}
