use std::collections::VecDeque;
use std::sync::Arc;

use crate::memo::{Memo, MemoId};

/// Completed memos, newest first
#[derive(Debug, Default)]
pub struct MemoStore {
    memos: VecDeque<Arc<Memo>>,
}

impl MemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a memo in front of the existing ones
    pub fn insert(&mut self, memo: Memo) -> Arc<Memo> {
        let memo = Arc::new(memo);
        self.memos.push_front(Arc::clone(&memo));
        memo
    }

    pub fn get(&self, id: MemoId) -> Option<&Arc<Memo>> {
        self.memos.iter().find(|memo| memo.id() == id)
    }

    pub fn latest(&self) -> Option<&Arc<Memo>> {
        self.memos.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Memo>> {
        self.memos.iter()
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }
}
