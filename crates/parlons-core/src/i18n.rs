//! Localized label lookup.
//!
//! Front ends never assume a key resolves: every label goes through
//! [`label`] with a literal fallback.

use std::collections::HashMap;

/// Lookup of user-facing strings by key
pub trait Translate: Send + Sync {
    fn t(&self, key: &str) -> Option<String>;
}

impl Translate for HashMap<String, String> {
    fn t(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolve `key`, falling back to `fallback` when the table has no entry
pub fn label(translator: &dyn Translate, key: &str, fallback: &str) -> String {
    translator
        .t(key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    French,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "fr" | "fr-fr" | "french" => Some(Language::French),
            "en" | "en-us" | "en-gb" | "english" => Some(Language::English),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::French => Language::English,
            Language::English => Language::French,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::French => "Français",
            Language::English => "English",
        }
    }
}

const FRENCH: &[(&str, &str)] = &[
    ("chat.welcome", "Bienvenue ! Comment puis-je vous aider aujourd'hui ?"),
    ("chat.check.welcome", "Bienvenue ! Quel nom d'entreprise souhaitez-vous vérifier ?"),
    ("chat.title", "Chatbot"),
    ("chat.check.title", "Vérification de nom"),
    ("chat.status", "En ligne • Tunisie"),
    ("chat.back", "Retour"),
    ("chat.placeholder", "Tapez votre message..."),
    ("chat.send", "Envoyer"),
    ("chat.typing", "En train d'écrire"),
    ("chat.you", "Vous"),
    ("chat.bot", "Assistant"),
    ("chatbot.no_data", "Aucune réponse reçue du serveur."),
    ("chatbot.error", "Désolé, une erreur s'est produite."),
    ("chat.choice.title", "Comment pouvons-nous vous aider ?"),
    ("chat.choice.subtitle", "Choisissez une option pour commencer la conversation"),
    ("chat.choice.option1.title", "Vérifier un nom"),
    ("chat.choice.option1.description", "Vérifiez si un nom d'entreprise est déjà réservé"),
    ("chat.choice.option2.title", "Suggestions et aide"),
    (
        "chat.choice.option2.description",
        "Obtenez des conseils et des idées de noms pour votre entreprise",
    ),
    ("chat.choice.back", "Quitter"),
    ("hint.send", "envoyer"),
    ("hint.newline", "nouvelle ligne"),
    ("hint.scroll", "défiler"),
    ("hint.language", "langue"),
    ("hint.select", "choisir"),
    ("hint.open", "ouvrir"),
];

const ENGLISH: &[(&str, &str)] = &[
    ("chat.welcome", "Welcome! How can I help you today?"),
    ("chat.check.welcome", "Welcome! Which company name would you like to check?"),
    ("chat.title", "Chatbot"),
    ("chat.check.title", "Name check"),
    ("chat.status", "Online • Tunisia"),
    ("chat.back", "Back"),
    ("chat.placeholder", "Type your message..."),
    ("chat.send", "Send"),
    ("chat.typing", "Typing"),
    ("chat.you", "You"),
    ("chat.bot", "Assistant"),
    ("chatbot.no_data", "No response received from the server."),
    ("chatbot.error", "Sorry, an error occurred."),
    ("chat.choice.title", "How can we help you?"),
    ("chat.choice.subtitle", "Pick an option to start the conversation"),
    ("chat.choice.option1.title", "Check a name"),
    ("chat.choice.option1.description", "Find out whether a company name is already taken"),
    ("chat.choice.option2.title", "Suggestions & help"),
    ("chat.choice.option2.description", "Get advice and name ideas for your company"),
    ("chat.choice.back", "Quit"),
    ("hint.send", "send"),
    ("hint.newline", "new line"),
    ("hint.scroll", "scroll"),
    ("hint.language", "language"),
    ("hint.select", "select"),
    ("hint.open", "open"),
];

/// Built-in string table for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self.language {
            Language::French => FRENCH,
            Language::English => ENGLISH,
        }
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str) -> Option<String> {
        self.table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_resolves_known_keys() {
        let fr = Catalog::new(Language::French);
        let en = Catalog::new(Language::English);
        assert_eq!(fr.t("chat.send").as_deref(), Some("Envoyer"));
        assert_eq!(en.t("chat.send").as_deref(), Some("Send"));
    }

    #[test]
    fn test_label_falls_back_on_missing_key() {
        let empty: HashMap<String, String> = HashMap::new();
        assert_eq!(label(&empty, "chat.send", "Envoyer"), "Envoyer");
    }

    #[test]
    fn test_label_falls_back_on_empty_value() {
        let mut table = HashMap::new();
        table.insert("chat.send".to_string(), String::new());
        assert_eq!(label(&table, "chat.send", "Envoyer"), "Envoyer");
    }

    #[test]
    fn test_tables_share_keys() {
        for (key, _) in FRENCH {
            assert!(ENGLISH.iter().any(|(k, _)| k == key), "missing english key {key}");
        }
        assert_eq!(FRENCH.len(), ENGLISH.len());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("fr"), Some(Language::French));
        assert_eq!(Language::from_code("ar"), None);
        assert_eq!(Language::French.next(), Language::English);
        assert_eq!(Language::English.next().code(), "fr");
    }
}
