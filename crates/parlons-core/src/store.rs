use chrono::Local;

use crate::state::{ChatTurn, TurnId};

/// Ordered, append-only transcript of one conversation.
///
/// The only turn that can ever change is the one carrying the welcome
/// sentinel id, and only through [`MessageStore::replace_welcome`].
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    turns: Vec<ChatTurn>,
    last_id: i64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_welcome(welcome: ChatTurn) -> Self {
        let mut store = Self::new();
        store.replace_welcome(welcome);
        store
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Swap the welcome turn in place, matched by id rather than position.
    /// Prepends when the transcript has no welcome turn yet.
    pub fn replace_welcome(&mut self, welcome: ChatTurn) {
        match self.turns.iter_mut().find(|t| t.id.is_welcome()) {
            Some(existing) => *existing = welcome,
            None => self.turns.insert(0, welcome),
        }
    }

    /// Hand out a timestamp-derived id, strictly greater than the previous one
    pub fn next_id(&mut self) -> TurnId {
        let now = Local::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        TurnId::from_millis(self.last_id)
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Author;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut store = MessageStore::with_welcome(ChatTurn::welcome("hi"));
        for text in ["a", "b", "c"] {
            let id = store.next_id();
            store.append(ChatTurn::new(id, Author::User, text));
        }
        let contents: Vec<&str> = store.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "a", "b", "c"]);
    }

    #[test]
    fn test_replace_welcome_swaps_in_place() {
        let mut store = MessageStore::with_welcome(ChatTurn::welcome("Bienvenue"));
        let id = store.next_id();
        store.append(ChatTurn::new(id, Author::User, "Salut"));

        store.replace_welcome(ChatTurn::welcome("Welcome"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.turns()[0].content, "Welcome");
        assert_eq!(store.turns()[1].content, "Salut");
    }

    #[test]
    fn test_replace_welcome_prepends_when_missing() {
        let mut store = MessageStore::new();
        let id = store.next_id();
        store.append(ChatTurn::new(id, Author::User, "first"));

        store.replace_welcome(ChatTurn::welcome("hello"));

        assert_eq!(store.len(), 2);
        assert!(store.turns()[0].id.is_welcome());
    }

    #[test]
    fn test_replace_welcome_matches_sentinel_not_position() {
        let mut store = MessageStore::new();
        let id = store.next_id();
        store.append(ChatTurn::new(id, Author::User, "first"));
        store.append(ChatTurn::welcome("old"));

        store.replace_welcome(ChatTurn::welcome("new"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.turns()[0].content, "first");
        assert_eq!(store.turns()[1].content, "new");
    }

    #[test]
    fn test_next_id_strictly_increasing() {
        let mut store = MessageStore::new();
        let ids: Vec<i64> = (0..50)
            .map(|_| store.next_id().as_str().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
