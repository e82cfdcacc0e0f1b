use crate::Grid;

/// A deep copy of the board and score, captured before an effective move.
#[derive(Copy, Clone, Debug)]
pub struct HistoryEntry {
    pub grid: Grid,
    pub score: u32,
}

/// The undo stack. Newest entries are popped first; depth is unbounded.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_newest_entry_first() {
        let mut history = History::new();
        assert!(history.pop().is_none());

        let mut grid = Grid::empty();
        history.push(HistoryEntry { grid, score: 0 });
        grid.cells_mut()[0][0] = 2;
        history.push(HistoryEntry { grid, score: 4 });
        assert_eq!(history.len(), 2);

        let newest = history.pop().unwrap();
        assert_eq!(newest.score, 4);
        assert_eq!(newest.grid.get(0, 0), 2);
        let oldest = history.pop().unwrap();
        assert_eq!(oldest.score, 0);
        assert!(history.is_empty());
    }
}
