//! Turn resolved paths into engine inputs

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use wordtally_engine::Input;

/// Helpers over the resolved file list
pub struct FileReader;

impl FileReader {
    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }

    /// Sum of all file sizes, used as the progress bar length
    pub fn total_size(paths: &[PathBuf]) -> Result<u64> {
        paths.iter().map(|p| Self::file_size(p)).sum()
    }

    /// One lazily opened input per path, in order
    pub fn inputs(paths: &[PathBuf]) -> Vec<Input> {
        paths.iter().cloned().map(Input::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_total_size() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "four").unwrap();
        fs::write(&b, "sixsix").unwrap();

        assert_eq!(FileReader::total_size(&[a, b]).unwrap(), 10);
    }

    #[test]
    fn test_missing_file_size() {
        let err = FileReader::file_size(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to get metadata"));
    }

    #[test]
    fn test_inputs_keep_order() {
        let paths = vec![PathBuf::from("z.txt"), PathBuf::from("a.txt")];
        let names: Vec<_> = FileReader::inputs(&paths).iter().map(Input::name).collect();
        assert_eq!(names, ["z.txt", "a.txt"]);
    }
}
