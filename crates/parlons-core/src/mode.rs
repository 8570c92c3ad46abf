/// The two chat panels offered by the option selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatMode {
    Check,
    Suggest,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Check => "check",
            ChatMode::Suggest => "suggest",
        }
    }

    pub fn all() -> Vec<ChatMode> {
        vec![ChatMode::Check, ChatMode::Suggest]
    }

    pub fn profile(&self) -> ChatProfile {
        match self {
            ChatMode::Check => ChatProfile {
                mode: *self,
                title_key: "chat.check.title",
                title_fallback: "Vérification de nom",
                welcome_key: "chat.check.welcome",
                welcome_fallback: "Bienvenue ! Quel nom d'entreprise souhaitez-vous vérifier ?",
                card_title_key: "chat.choice.option1.title",
                card_title_fallback: "Vérifier un nom",
                card_description_key: "chat.choice.option1.description",
                card_description_fallback: "Vérifiez si un nom d'entreprise est déjà réservé",
                icon: "🔍",
            },
            ChatMode::Suggest => ChatProfile {
                mode: *self,
                title_key: "chat.title",
                title_fallback: "Chatbot",
                welcome_key: "chat.welcome",
                welcome_fallback: "Bienvenue ! Comment puis-je vous aider aujourd'hui ?",
                card_title_key: "chat.choice.option2.title",
                card_title_fallback: "Suggestions et aide",
                card_description_key: "chat.choice.option2.description",
                card_description_fallback:
                    "Obtenez des conseils et des idées de noms pour votre entreprise",
                icon: "💡",
            },
        }
    }
}

/// Static presentation data of a chat mode: label keys and their defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatProfile {
    pub mode: ChatMode,
    pub title_key: &'static str,
    pub title_fallback: &'static str,
    pub welcome_key: &'static str,
    pub welcome_fallback: &'static str,
    pub card_title_key: &'static str,
    pub card_title_fallback: &'static str,
    pub card_description_key: &'static str,
    pub card_description_fallback: &'static str,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_are_listed_in_card_order() {
        let names: Vec<&str> = ChatMode::all().iter().map(ChatMode::as_str).collect();
        assert_eq!(names, vec!["check", "suggest"]);
    }

    #[test]
    fn test_modes_differ_in_greeting() {
        let check = ChatMode::Check.profile();
        let suggest = ChatMode::Suggest.profile();
        assert_ne!(check.welcome_key, suggest.welcome_key);
        assert_eq!(suggest.welcome_key, "chat.welcome");
    }
}
