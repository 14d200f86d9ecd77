//! Input abstraction for word counting
//!
//! Every source is opened lazily, just before its first chunk is produced,
//! so only one source is open at a time.

use crate::error::{EngineError, Result};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;

/// A byte-stream source
pub enum Input {
    /// File path to read from
    File(PathBuf),
    /// In-memory bytes with a display name
    Bytes {
        /// Name reported in the tally
        name: String,
        /// Content
        bytes: Vec<u8>,
    },
    /// Reader stream (stdin, pipes, ...)
    Reader {
        /// Name reported in the tally
        name: String,
        /// The stream
        reader: Box<dyn Read + Send>,
    },
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes { name, bytes } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("bytes", &format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader { name, .. } => f
                .debug_struct("Reader")
                .field("name", name)
                .field("reader", &"<Reader>")
                .finish(),
        }
    }
}

impl Input {
    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        Input::Bytes {
            name: name.into(),
            bytes,
        }
    }

    /// Create input from a text string
    pub fn from_text<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Self::from_bytes(name, text.into().into_bytes())
    }

    /// Create input from a reader
    pub fn from_reader<S: Into<String>, R: Read + Send + 'static>(name: S, reader: R) -> Self {
        Input::Reader {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Name reported for this source
    pub fn name(&self) -> String {
        match self {
            Input::File(path) => path.display().to_string(),
            Input::Bytes { name, .. } | Input::Reader { name, .. } => name.clone(),
        }
    }

    /// Open the source as a byte stream
    pub fn open(self) -> Result<Box<dyn Read + Send>> {
        match self {
            Input::File(path) => {
                let file = File::open(&path).map_err(|source| EngineError::SourceOpen {
                    name: path.display().to_string(),
                    source,
                })?;
                Ok(Box::new(file))
            }
            Input::Bytes { bytes, .. } => Ok(Box::new(Cursor::new(bytes))),
            Input::Reader { reader, .. } => Ok(reader),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_names() {
        assert_eq!(Input::from_text("memo", "hi").name(), "memo");
        assert_eq!(Input::from_file("/tmp/a.txt").name(), "/tmp/a.txt");
        assert_eq!(Input::from_reader("stdin", std::io::empty()).name(), "stdin");
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "some text").unwrap();

        let input = Input::from_file(file.path());
        let mut content = String::new();
        input.open().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "some text");
    }

    #[test]
    fn test_open_missing_file() {
        match Input::from_file("/nonexistent/words.txt").open() {
            Err(EngineError::SourceOpen { name, .. }) => {
                assert_eq!(name, "/nonexistent/words.txt")
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("opening a missing file should fail"),
        }
    }

    #[test]
    fn test_debug_hides_content() {
        let debug = format!("{:?}", Input::from_bytes("blob", vec![0; 16]));
        assert!(debug.contains("<16 bytes>"));
    }
}
