pub mod client;
pub mod composer;
pub mod config;
pub mod conversation;
pub mod i18n;
pub mod mode;
pub mod selector;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use client::{AnswerClient, AnswerPayload, AskError, AskOptions, HttpAnswerClient};
pub use composer::Composer;
pub use config::Config;
pub use conversation::{Conversation, PendingAsk, ViewState};
pub use i18n::{label, Catalog, Language, Translate};
pub use mode::{ChatMode, ChatProfile};
pub use selector::{ModeSetup, OptionSelector};
pub use state::{Author, ChatTurn, TurnId};
pub use store::MessageStore;
