use std::sync::Arc;

use tracing::info;

use crate::client::{AnswerClient, AskOptions};
use crate::conversation::Conversation;
use crate::i18n::Translate;
use crate::mode::ChatMode;

/// What a chat mode talks to and what it sends along with each prompt
#[derive(Clone)]
pub struct ModeSetup {
    pub client: Arc<dyn AnswerClient>,
    pub options: AskOptions,
}

impl ModeSetup {
    pub fn new(client: Arc<dyn AnswerClient>, options: AskOptions) -> Self {
        Self { client, options }
    }
}

/// Landing view that mounts one conversation at a time.
///
/// Leaving a conversation drops it, transcript included.
pub struct OptionSelector {
    translator: Arc<dyn Translate>,
    check: ModeSetup,
    suggest: ModeSetup,
    active: Option<Conversation>,
}

impl OptionSelector {
    pub fn new(translator: Arc<dyn Translate>, check: ModeSetup, suggest: ModeSetup) -> Self {
        Self {
            translator,
            check,
            suggest,
            active: None,
        }
    }

    pub fn selection(&self) -> Option<ChatMode> {
        self.active.as_ref().map(|c| c.profile().mode)
    }

    /// Mount a fresh conversation for `mode`, replacing any current one
    pub fn choose(&mut self, mode: ChatMode) -> &mut Conversation {
        let setup = match mode {
            ChatMode::Check => &self.check,
            ChatMode::Suggest => &self.suggest,
        };
        info!(mode = mode.as_str(), "opening conversation");
        self.active.insert(Conversation::new(
            mode.profile(),
            Arc::clone(&setup.client),
            Arc::clone(&self.translator),
            setup.options.clone(),
        ))
    }

    pub fn back(&mut self) {
        if let Some(conversation) = self.active.take() {
            info!(
                mode = conversation.profile().mode.as_str(),
                turns = conversation.len(),
                "closing conversation"
            );
        }
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.active.as_ref()
    }

    pub fn conversation_mut(&mut self) -> Option<&mut Conversation> {
        self.active.as_mut()
    }

    pub fn translator(&self) -> &dyn Translate {
        self.translator.as_ref()
    }

    /// Switch the string table for the chooser and the mounted conversation
    pub fn set_translator(&mut self, translator: Arc<dyn Translate>) {
        if let Some(conversation) = self.active.as_mut() {
            conversation.relocalize(Arc::clone(&translator));
        }
        self.translator = translator;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language};
    use crate::test_support::ScriptedClient;

    fn selector() -> OptionSelector {
        let setup = ModeSetup::new(Arc::new(ScriptedClient::new()), AskOptions::default());
        OptionSelector::new(
            Arc::new(Catalog::new(Language::French)),
            setup.clone(),
            setup,
        )
    }

    #[tokio::test]
    async fn test_switching_modes_resets_transcript() {
        let mut selector = selector();

        selector.choose(ChatMode::Check).submit("Salut").await;
        assert_eq!(selector.conversation().unwrap().len(), 3);

        selector.choose(ChatMode::Suggest);
        assert_eq!(selector.selection(), Some(ChatMode::Suggest));
        selector.choose(ChatMode::Check);

        let conv = selector.conversation().unwrap();
        assert_eq!(conv.len(), 1);
        assert!(conv.turns()[0].id.is_welcome());
    }

    #[tokio::test]
    async fn test_back_discards_conversation() {
        let mut selector = selector();
        selector.choose(ChatMode::Suggest).submit("Salut").await;

        selector.back();
        assert_eq!(selector.selection(), None);
        assert!(selector.conversation().is_none());

        selector.choose(ChatMode::Suggest);
        assert_eq!(selector.conversation().unwrap().len(), 1);
    }

    #[test]
    fn test_each_mode_uses_its_own_setup() {
        let check_client = Arc::new(ScriptedClient::new());
        let suggest_client = Arc::new(ScriptedClient::new());
        let mut selector = OptionSelector::new(
            Arc::new(Catalog::new(Language::French)),
            ModeSetup::new(
                check_client,
                AskOptions {
                    style: "formel".to_string(),
                    ..AskOptions::default()
                },
            ),
            ModeSetup::new(suggest_client, AskOptions::default()),
        );

        assert_eq!(selector.choose(ChatMode::Check).options().style, "formel");
        assert_eq!(selector.choose(ChatMode::Suggest).options().style, "concise");
    }

    #[test]
    fn test_language_change_reaches_mounted_conversation() {
        let mut selector = selector();
        selector.choose(ChatMode::Suggest);

        selector.set_translator(Arc::new(Catalog::new(Language::English)));

        let conv = selector.conversation().unwrap();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.turns()[0].content, "Welcome! How can I help you today?");
    }
}
