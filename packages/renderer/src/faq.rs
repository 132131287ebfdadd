use minisite_document::BlockId;
use std::collections::HashMap;

/// Open entry of one FAQ block; at most one at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqState {
    open: Option<usize>,
}

impl FaqState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `index`, or close it if it is already open
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }
}

/// FAQ state for every block on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqStates {
    blocks: HashMap<BlockId, FaqState>,
}

impl FaqStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, block_id: &BlockId, index: usize) {
        self.blocks.entry(block_id.clone()).or_default().toggle(index);
    }

    pub fn get(&self, block_id: &BlockId) -> FaqState {
        self.blocks.get(block_id).copied().unwrap_or_default()
    }

    /// Forget a removed block
    pub fn remove(&mut self, block_id: &BlockId) {
        self.blocks.remove(block_id);
    }
}
