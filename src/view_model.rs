/*!
 * Pure mapping from editor state to something a UI can draw.
 *
 * A front end consumes an `EditorView`, shows each block with a read-only
 * timestamp and two editable regions, and reports edits back to the
 * controller as `EditEvent`s.
 */

use std::fmt;

use serde::Serialize;

use crate::selection::Selection;
use crate::vtt_document::VttDocument;

/// Renderable state of one cue block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub index: usize,
    /// Read-only label
    pub timestamp: String,
    /// Editable region
    pub tags: String,
    /// Editable region
    pub text: String,
    pub selected: bool,
}

/// Everything a front end needs to draw the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub header: String,
    pub blocks: Vec<BlockView>,
    /// Visible iff at least two blocks are selected and they are contiguous
    pub merge_visible: bool,
    /// A tag can only be added when some block is selected
    pub add_tag_enabled: bool,
}

impl EditorView {
    /// Build the view for the given state
    pub fn render(document: &VttDocument, selection: &Selection, header: &str) -> Self {
        let blocks = document
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| BlockView {
                index,
                timestamp: block.timestamp.clone(),
                tags: block.tags.clone(),
                text: block.text.clone(),
                selected: selection.contains(index),
            })
            .collect();

        Self {
            header: header.to_string(),
            blocks,
            merge_visible: selection.can_merge(),
            add_tag_enabled: !selection.is_empty(),
        }
    }
}

/// Plain-text rendering for line-oriented terminals
impl fmt::Display for EditorView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for block in &self.blocks {
            let marker = if block.selected { '*' } else { ' ' };
            writeln!(f, "{}[{}] {}", marker, block.index, block.timestamp)?;
            if !block.tags.trim().is_empty() {
                writeln!(f, "     tags: {}", block.tags.trim_end())?;
            }
            for line in block.text.trim_end().lines() {
                writeln!(f, "     {}", line)?;
            }
        }

        if self.blocks.is_empty() {
            writeln!(f, "(no blocks)")?;
        }

        let mut actions = Vec::new();
        if self.merge_visible {
            actions.push("merge");
        }
        if self.add_tag_enabled {
            actions.push("tag");
        }
        if !actions.is_empty() {
            writeln!(f, "available: {}", actions.join(", "))?;
        }

        Ok(())
    }
}
