//! Conversation history, capped to the most recent exchanges.

use crate::config::HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// One question and the answer it received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// At most `HISTORY_LIMIT` exchanges, oldest first
///
/// Serialized as a plain JSON array. Deserializing a longer array keeps
/// only its tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Exchange>", into = "Vec<Exchange>")]
pub struct ConversationHistory {
    exchanges: Vec<Exchange>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exchange, dropping the oldest beyond the cap
    pub fn push(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
        self.truncate();
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    fn truncate(&mut self) {
        if self.exchanges.len() > HISTORY_LIMIT {
            let excess = self.exchanges.len() - HISTORY_LIMIT;
            self.exchanges.drain(..excess);
        }
    }
}

impl From<Vec<Exchange>> for ConversationHistory {
    fn from(exchanges: Vec<Exchange>) -> Self {
        let mut history = Self { exchanges };
        history.truncate();
        history
    }
}

impl From<ConversationHistory> for Vec<Exchange> {
    fn from(history: ConversationHistory) -> Self {
        history.exchanges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Exchange> {
        (0..n)
            .map(|i| Exchange::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn push_should_drop_oldest_beyond_limit() {
        let mut history = ConversationHistory::new();
        for exchange in numbered(HISTORY_LIMIT + 3) {
            history.push(exchange);
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.exchanges()[0].question, "q3");
        assert_eq!(
            history.exchanges()[HISTORY_LIMIT - 1].question,
            format!("q{}", HISTORY_LIMIT + 2)
        );
    }

    #[test]
    fn deserialize_should_keep_only_the_tail() {
        let json = serde_json::to_string(&numbered(15)).unwrap();
        let history: ConversationHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.exchanges()[0].question, "q5");
    }

    #[test]
    fn history_should_serialize_as_array() {
        let history = ConversationHistory::from(numbered(1));
        assert_eq!(
            serde_json::to_string(&history).unwrap(),
            r#"[{"question":"q0","answer":"a0"}]"#
        );
    }
}
