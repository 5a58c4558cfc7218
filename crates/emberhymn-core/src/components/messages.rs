//! Rolling in-game message log - the narrative feed a frontend renders.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::messages::MAX_ENTRIES;

/// Message category, used by frontends for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Info,
    Combat,
    Loot,
    Lore,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogMessage {
    /// Monotonic sequence number, unique within a session.
    pub seq: u64,
    pub text: String,
    pub kind: MessageKind,
}

/// Bounded, insertion-ordered message log. Holds the most recent
/// [`MAX_ENTRIES`] messages; the oldest is evicted first.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<LogMessage>,
    next_seq: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, kind: MessageKind) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogMessage {
            seq: self.next_seq,
            text: text.into(),
            kind,
        });
        self.next_seq += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&LogMessage> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_evicts_oldest_beyond_capacity() {
        let mut log = MessageLog::new();
        for i in 0..30 {
            log.push(format!("entry {i}"), MessageKind::Info);
        }

        assert_eq!(log.len(), MAX_ENTRIES);
        let first = log.iter().next().unwrap();
        assert_eq!(first.text, "entry 10");
        assert_eq!(log.latest().unwrap().text, "entry 29");
    }

    #[test]
    fn test_sequence_numbers_are_monotonic() {
        let mut log = MessageLog::new();
        log.push("a", MessageKind::Lore);
        log.push("b", MessageKind::Combat);
        let seqs: Vec<u64> = log.iter().map(|m| m.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }
}
