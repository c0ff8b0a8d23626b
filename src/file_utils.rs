use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path next to the input file
    // @params: input_file, output_file_name
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, output_file_name: &str) -> PathBuf {
        let parent = input_file.as_ref().parent().unwrap_or(Path::new(""));
        parent.join(output_file_name)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file to a string without blocking the runtime
    pub async fn read_to_string_async<P: AsRef<Path>>(path: P) -> Result<String> {
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file.
    ///
    /// The content goes to a temporary file in the target directory first and
    /// is then renamed over the destination, so a failed write never leaves a
    /// truncated file behind.
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or(Path::new(""));
        Self::ensure_dir(parent)?;

        let temp_dir = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
        let mut temp = NamedTempFile::new_in(temp_dir)
            .with_context(|| format!("Failed to create temporary file in: {:?}", temp_dir))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }

    /// Write a string to a file from async code
    pub async fn write_to_file_async<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let content = content.to_string();
        tokio::task::spawn_blocking(move || Self::write_to_file(path, &content))
            .await
            .context("File write task failed")?
    }
}
