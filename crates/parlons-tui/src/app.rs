use std::path::PathBuf;
use std::sync::Arc;

use parlons_core::{
    AnswerPayload, AskError, Catalog, ChatMode, Composer, Config, Conversation, Language,
    OptionSelector,
};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chooser,
    Chat,
}

/// Vertical scroll of the transcript, eased toward its target on each tick
#[derive(Debug, Clone, Default)]
pub struct TranscriptScroll {
    pub offset: u16,
    target: u16,
    max: u16,
    follow: bool,
}

impl TranscriptScroll {
    pub fn new() -> Self {
        Self {
            follow: true,
            ..Self::default()
        }
    }

    /// Called from render once the wrapped height is known
    pub fn set_bounds(&mut self, total_lines: u16, visible: u16) {
        self.max = total_lines.saturating_sub(visible);
        if self.follow {
            self.target = self.max;
        }
        self.target = self.target.min(self.max);
        self.offset = self.offset.min(self.max);
    }

    pub fn follow_bottom(&mut self) {
        self.follow = true;
        self.target = self.max;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.target = self.offset.saturating_sub(lines);
        self.offset = self.target;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.target = (self.offset.saturating_add(lines)).min(self.max);
        self.offset = self.target;
        if self.offset == self.max {
            self.follow = true;
        }
    }

    /// Move halfway to the target, at least one line per tick
    pub fn tick(&mut self) {
        if self.offset < self.target {
            let step = ((self.target - self.offset) / 2).max(1);
            self.offset += step;
        } else if self.offset > self.target {
            self.offset = self.target;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

pub struct App {
    pub should_quit: bool,
    pub selector: OptionSelector,
    pub language: Language,
    pub composer: Composer,
    pub chooser_state: ListState,
    pub pending: Option<JoinHandle<Result<AnswerPayload, AskError>>>,

    // Transcript view state
    pub scroll: TranscriptScroll,
    pub seen_revision: u64,
    pub chat_height: u16,
    pub chat_width: u16,
    pub chat_area: Option<Rect>,

    // Animation state
    pub animation_frame: u8, // 0-2 for the typing dots

    /// Where language changes are persisted, if anywhere
    pub config_path: Option<PathBuf>,
}

impl App {
    pub fn new(selector: OptionSelector, language: Language, config_path: Option<PathBuf>) -> Self {
        let mut chooser_state = ListState::default();
        chooser_state.select(Some(0));

        Self {
            should_quit: false,
            selector,
            language,
            composer: Composer::new(),
            chooser_state,
            pending: None,
            scroll: TranscriptScroll::new(),
            seen_revision: 0,
            chat_height: 0,
            chat_width: 0,
            chat_area: None,
            animation_frame: 0,
            config_path,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.selector.selection() {
            Some(_) => Screen::Chat,
            None => Screen::Chooser,
        }
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.selector.conversation()
    }

    pub fn is_sending(&self) -> bool {
        self.conversation().is_some_and(Conversation::is_sending)
    }

    pub fn label(&self, key: &str, fallback: &str) -> String {
        parlons_core::label(self.selector.translator(), key, fallback)
    }

    // Chooser
    pub fn chooser_down(&mut self) {
        let len = ChatMode::all().len();
        let i = self.chooser_state.selected().unwrap_or(0);
        self.chooser_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn chooser_up(&mut self) {
        let i = self.chooser_state.selected().unwrap_or(0);
        self.chooser_state.select(Some(i.saturating_sub(1)));
    }

    pub fn open_selected(&mut self) {
        let modes = ChatMode::all();
        if let Some(&mode) = self.chooser_state.selected().and_then(|i| modes.get(i)) {
            self.open(mode);
        }
    }

    pub fn open(&mut self, mode: ChatMode) {
        self.discard_view_state();
        let conversation = self.selector.choose(mode);
        self.seen_revision = conversation.revision();
    }

    /// Leave the chat panel; its transcript goes with it
    pub fn back_to_chooser(&mut self) {
        self.discard_view_state();
        self.selector.back();
    }

    fn discard_view_state(&mut self) {
        if self.pending.take().is_some() {
            info!("leaving view with a request in flight; its reply will be dropped");
        }
        self.composer.clear();
        self.scroll.reset();
        self.animation_frame = 0;
    }

    /// Send the draft if the conversation accepts it
    pub fn submit(&mut self) {
        let sending = self.is_sending();
        let Some(conversation) = self.selector.conversation_mut() else {
            return;
        };
        let Some(text) = self.composer.take_submission(sending) else {
            return;
        };
        if let Some(pending) = conversation.begin_submit(&text) {
            self.pending = Some(tokio::spawn(pending.run()));
        }
    }

    /// Settle the outstanding request once its task has finished
    pub async fn poll_pending(&mut self) {
        let finished = self.pending.as_ref().is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };

        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("answer task failed: {e}");
                Err(AskError::Transport(e.to_string()))
            }
        };

        if let Some(conversation) = self.selector.conversation_mut() {
            conversation.settle(outcome);
        }
    }

    /// Follow the newest turn whenever the transcript changed
    pub fn sync_scroll(&mut self) {
        if let Some(revision) = self.conversation().map(Conversation::revision) {
            if revision != self.seen_revision {
                self.seen_revision = revision;
                self.scroll.follow_bottom();
            }
        }
    }

    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
        self.selector
            .set_translator(Arc::new(Catalog::new(self.language)));
        info!(language = self.language.code(), "display language changed");

        if let Some(path) = &self.config_path {
            if let Err(e) = Config::save_language(path, self.language) {
                warn!("could not save language to {:?}: {e}", path);
            }
        }
    }

    /// Tick animation frame and ease the transcript scroll
    pub fn tick(&mut self) {
        if self.is_sending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        self.scroll.tick();
    }
}
