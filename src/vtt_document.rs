use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};

// @module: WebVTT-like document parsing, merging and serialization

// @const: Leading speaker label such as "[Speaker]: "
static SPEAKER_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[.*?\]:\s*").expect("speaker label pattern is valid")
});

/// Delimiter line for the YAML front matter
pub const YAML_DELIMITER: &str = "---";

/// Separator between the start and end time of a cue
pub const TIMESTAMP_SEPARATOR: &str = " --> ";

/// Marker line written between the header and the cue blocks
pub const WEBVTT_MARKER: &str = "WEBVTT";

// @struct: Single cue block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    // @field: Raw "<start> --> <end>" line, never validated
    pub timestamp: String,

    // @field: Concatenated "#tag " tokens
    pub tags: String,

    // @field: Caption body, may span several lines
    pub text: String,
}

impl Block {
    /// Creates a new block from its three raw fields
    pub fn new(timestamp: impl Into<String>, tags: impl Into<String>, text: impl Into<String>) -> Self {
        Block {
            timestamp: timestamp.into(),
            tags: tags.into(),
            text: text.into(),
        }
    }

    // @creates: Empty block for a timestamp line
    fn from_timestamp_line(line: &str) -> Self {
        Block {
            timestamp: line.to_string(),
            tags: String::new(),
            text: String::new(),
        }
    }

    /// Text before the first " --> ", or the whole timestamp if there is none
    pub fn start_time(&self) -> &str {
        self.timestamp
            .split(TIMESTAMP_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Text after the first " --> ", or an empty string if there is none
    pub fn end_time(&self) -> &str {
        self.timestamp
            .split(TIMESTAMP_SEPARATOR)
            .nth(1)
            .unwrap_or_default()
    }

    /// Append a tag in the "#tag " form used by tag lines
    pub fn push_tag(&mut self, tag: &str) {
        self.tags.push('#');
        self.tags.push_str(tag);
        self.tags.push(' ');
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.timestamp)?;
        writeln!(f, "{}", self.tags)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Remove one leading "[label]:" token and the whitespace after it
pub fn strip_speaker_label(text: &str) -> &str {
    match SPEAKER_LABEL_REGEX.find(text) {
        Some(label) => &text[label.end()..],
        None => text,
    }
}

/// Collapse an ordered run of blocks into one block spanning their time range.
///
/// The first block keeps its text as-is (trimmed); every following block has
/// its speaker label stripped before being appended. Tags are concatenated
/// without deduplication. Returns `None` for an empty slice.
pub fn merge_blocks(blocks: &[Block]) -> Option<Block> {
    let (first, rest) = blocks.split_first()?;
    let last = rest.last().unwrap_or(first);

    let timestamp = format!("{}{}{}", first.start_time(), TIMESTAMP_SEPARATOR, last.end_time());

    let mut tags = first.tags.clone();
    let mut text = String::from(first.text.trim());
    text.push(' ');

    for block in rest {
        tags.push_str(&block.tags);
        text.push_str(strip_speaker_label(&block.text).trim());
        text.push(' ');
    }

    Some(Block {
        timestamp,
        tags,
        text: text.trim().to_string(),
    })
}

// @enum: Parser region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseRegion {
    Cues,
    Yaml,
    HeaderClosed,
}

/// A parsed subtitle document: ordered cue blocks plus the raw YAML header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VttDocument {
    /// Cue blocks in document order
    pub blocks: Vec<Block>,

    /// YAML front matter captured verbatim, delimiters included
    pub yaml_header: Option<String>,
}

impl VttDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse WebVTT-like content with optional YAML front matter.
    ///
    /// Never fails: unrecognized lines are dropped or folded into the
    /// current block. The scan ends as soon as the YAML header closes, so
    /// cues that follow a header are not picked up.
    pub fn parse(content: &str) -> Self {
        let mut blocks = Vec::new();
        let mut yaml = String::new();
        let mut region = ParseRegion::Cues;
        let mut current: Option<Block> = None;

        for raw_line in content.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

            if line.trim() == YAML_DELIMITER {
                yaml.push_str(line);
                yaml.push('\n');
                match region {
                    ParseRegion::Cues => region = ParseRegion::Yaml,
                    _ => {
                        region = ParseRegion::HeaderClosed;
                        break;
                    }
                }
            } else if region == ParseRegion::Yaml {
                yaml.push_str(line);
                yaml.push('\n');
            } else if line.contains("-->") {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(Block::from_timestamp_line(line));
            } else if let Some(block) = current.as_mut() {
                if line.starts_with('#') {
                    block.tags.push_str(line);
                    block.tags.push(' ');
                } else {
                    block.text.push_str(line);
                    block.text.push('\n');
                }
            }
        }

        if let Some(block) = current.take() {
            blocks.push(block);
        }

        if region == ParseRegion::Yaml {
            warn!("YAML header is not closed, the rest of the input was read as header");
        }

        let yaml_header = if yaml.is_empty() { None } else { Some(yaml) };
        if yaml_header.is_some() && blocks.is_empty() {
            debug!("Document has a YAML header, cue parsing stopped at its closing delimiter");
        }

        VttDocument { blocks, yaml_header }
    }

    /// Serialize the document with the given header text.
    ///
    /// A header that does not start with "---" is wrapped in delimiters.
    pub fn to_vtt_string(&self, header: &str) -> String {
        let mut content = if header.trim().starts_with(YAML_DELIMITER) {
            header.to_string()
        } else {
            format!("{0}\n{1}\n{0}\n", YAML_DELIMITER, header)
        };

        content.push('\n');
        content.push_str(WEBVTT_MARKER);
        content.push_str("\n\n");

        for block in &self.blocks {
            content.push_str(&block.to_string());
        }

        content
    }

    /// Number of cue blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no cue blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for VttDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "YAML header: {}", if self.yaml_header.is_some() { "present" } else { "none" })?;
        writeln!(f, "Blocks: {}", self.blocks.len())?;
        Ok(())
    }
}
