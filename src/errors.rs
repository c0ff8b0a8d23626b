/*!
 * Error types for the vttedit application.
 *
 * Malformed subtitle input never produces an error: the parser degrades
 * silently. File and configuration failures travel as `anyhow` errors with
 * context; these types cover the editor's own rejections.
 */

use thiserror::Error;

/// Main error type for the editor library
#[derive(Error, Debug)]
pub enum EditorError {
    /// An edit event referenced a block that does not exist
    #[error("Block {index} does not exist (document has {len} blocks)")]
    BlockOutOfRange {
        /// Requested block index
        index: usize,
        /// Number of blocks in the document
        len: usize,
    },

    /// A session command could not be understood
    #[error("Invalid command: {0}")]
    Command(String),

    /// The operator prompt failed (not the same as a cancelled prompt)
    #[error("Prompt error: {0}")]
    Prompt(String),
}
