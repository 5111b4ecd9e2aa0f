//! Undo history.

use crate::game::Position;

/// Full game state captured right before a move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub position: Position,
    pub message: String,
}

/// LIFO stack of snapshots, one per accepted move.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_lifo() {
        let mut history = History::new();
        let first = Snapshot {
            position: Position::new(),
            message: "first".into(),
        };
        let mut second = first.clone();
        second.message = "second".into();

        history.push(first.clone());
        history.push(second.clone());
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek(), Some(&second));
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }
}
