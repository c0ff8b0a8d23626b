//! Block selection model used to gate merging and tagging

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Set of selected block indices, kept in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the index if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Deselect every block
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Whether the block at `index` is selected
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of selected blocks
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no block is selected
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Lowest selected index, i.e. the first selected block in view order
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Selected indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }

    /// True when the indices form an unbroken ascending run with step 1
    pub fn is_contiguous(&self) -> bool {
        match (self.indices.first(), self.indices.last()) {
            (Some(first), Some(last)) => last - first + 1 == self.indices.len(),
            _ => true,
        }
    }

    /// Merging needs at least two blocks in one contiguous run
    pub fn can_merge(&self) -> bool {
        self.indices.len() >= 2 && self.is_contiguous()
    }

    /// Inclusive index range of a non-empty contiguous selection
    pub fn range(&self) -> Option<RangeInclusive<usize>> {
        if self.is_empty() || !self.is_contiguous() {
            return None;
        }
        Some(*self.indices.first()?..=*self.indices.last()?)
    }
}
