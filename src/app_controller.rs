use anyhow::{Result, Context};
use log::{info, debug};
use std::collections::BTreeSet;
use std::path::Path;

use crate::app_config::Config;
use crate::errors::EditorError;
use crate::file_utils::FileManager;
use crate::prompt::OperatorPrompt;
use crate::selection::Selection;
use crate::view_model::EditorView;
use crate::vtt_document::{merge_blocks, VttDocument};

// @module: Editor controller keeping the document and its view in sync

/// Edit reported back by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// New content of a block's tag region
    Tags { index: usize, text: String },
    /// New content of a block's text region
    Text { index: usize, text: String },
    /// Click on a block outside its editable regions
    ToggleSelection(usize),
    /// New content of the header field
    Header(String),
}

/// Owns the document, the selection, the header field and the tag history
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Loaded document
    document: VttDocument,

    // @field: Selected block indices
    selection: Selection,

    // @field: Editable header text used on save
    header: String,

    // @field: Every tag added during this session
    used_tags: BTreeSet<String>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let header = config.default_header.clone();
        Self {
            config,
            document: VttDocument::new(),
            selection: Selection::new(),
            header,
            used_tags: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &VttDocument {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn used_tags(&self) -> &BTreeSet<String> {
        &self.used_tags
    }

    /// Replace the document with parsed content.
    ///
    /// The header field takes the captured YAML, or the configured default
    /// when the content has none. The selection is cleared.
    pub fn load_str(&mut self, content: &str) {
        let document = VttDocument::parse(content);
        self.header = document
            .yaml_header
            .clone()
            .unwrap_or_else(|| self.config.default_header.clone());
        self.document = document;
        self.selection.clear();
        debug!("{}", self.document);
    }

    /// Read a file and load it. A later load simply replaces an earlier one.
    pub async fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = FileManager::read_to_string_async(path).await?;
        self.load_str(&content);
        info!("Loaded {} block(s) from {:?}", self.document.len(), path);
        Ok(())
    }

    /// Apply one edit from the front end
    pub fn apply(&mut self, event: EditEvent) -> Result<(), EditorError> {
        match event {
            EditEvent::Tags { index, text } => {
                self.check_index(index)?;
                self.document.blocks[index].tags = text;
            }
            EditEvent::Text { index, text } => {
                self.check_index(index)?;
                self.document.blocks[index].text = text;
            }
            EditEvent::ToggleSelection(index) => {
                self.check_index(index)?;
                let selected = self.selection.toggle(index);
                debug!("Block {} {}", index, if selected { "selected" } else { "deselected" });
            }
            EditEvent::Header(text) => {
                self.header = text;
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        let len = self.document.len();
        if index >= len {
            return Err(EditorError::BlockOutOfRange { index, len });
        }
        Ok(())
    }

    /// Merge the selected run of blocks into its first block.
    ///
    /// Returns the index of the merged block, or `None` when the selection
    /// is not a contiguous run of at least two blocks.
    pub fn merge_selected(&mut self) -> Option<usize> {
        if !self.selection.can_merge() {
            debug!("Merge skipped, selection is not a contiguous run of 2+ blocks");
            return None;
        }
        let range = self.selection.range()?;
        let first = *range.start();
        let count = range.end() - first + 1;

        let merged = merge_blocks(&self.document.blocks[range.clone()])?;
        self.document.blocks[first] = merged;
        self.document.blocks.drain(first + 1..=*range.end());
        self.selection.clear();

        info!("Merged {} blocks into block {}", count, first);
        Some(first)
    }

    /// Ask the operator for a tag and append it to the first selected block.
    ///
    /// A non-empty answer is always recorded in the used tags, even when no
    /// block is selected. Empty or cancelled answers change nothing.
    /// Returns whether a block was tagged.
    pub async fn add_tag(&mut self, prompt: &mut dyn OperatorPrompt) -> Result<bool> {
        let answer = prompt
            .request_text("Enter a tag (without #):")
            .await
            .context("Failed to read tag")?;

        let tag = match answer {
            Some(tag) if !tag.is_empty() => tag,
            _ => return Ok(false),
        };

        self.used_tags.insert(tag.clone());

        let Some(index) = self.selection.first() else {
            debug!("Tag #{} recorded, no block selected", tag);
            return Ok(false);
        };

        self.document.blocks[index].push_tag(&tag);
        debug!("Tagged block {} with #{}", index, tag);
        Ok(true)
    }

    /// Serialized document with the current header
    pub fn export(&self) -> String {
        self.document.to_vtt_string(&self.header)
    }

    /// Write the serialized document to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::write_to_file_async(path, &self.export()).await?;
        info!("Saved {} block(s) to {:?}", self.document.len(), path);
        Ok(())
    }

    /// Current view-model
    pub fn view(&self) -> EditorView {
        EditorView::render(&self.document, &self.selection, &self.header)
    }
}
