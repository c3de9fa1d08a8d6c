//! Source text model and file I/O
//!
//! A source file is handled as an ordered list of lines plus the line ending
//! it was written with. The string form only exists at the edges: decoding
//! what was read and encoding what gets written.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Line terminator detected in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    /// Both kinds present; each line keeps its own `\r`
    Mixed,
}

impl LineEnding {
    fn detect(text: &str) -> Self {
        let crlf = text.matches("\r\n").count();
        if crlf == 0 {
            LineEnding::Lf
        } else if crlf == text.matches('\n').count() {
            LineEnding::CrLf
        } else {
            LineEnding::Mixed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf | LineEnding::Mixed => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// File contents as a sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceText {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl SourceText {
    /// Split text into lines, remembering how to join them back.
    pub fn parse(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);

        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|line| match line_ending {
                    LineEnding::CrLf => line.strip_suffix('\r').unwrap_or(line).to_string(),
                    LineEnding::Lf | LineEnding::Mixed => line.to_string(),
                })
                .collect()
        };

        Self {
            lines,
            line_ending,
            trailing_newline,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the line list, keeping the line ending settings.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline,
        }
    }

    /// Join the lines back into a single string.
    pub fn render(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut out = self.lines.join(ending);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(ending);
        }
        out
    }
}

/// Decode file bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode(bytes: Vec<u8>, path: &Path) -> Result<String> {
    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    String::from_utf8(bytes).map_err(|_| Error::NotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Read a source file from the working tree.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode(bytes, path)
}

/// Replace `path` with `text`, encoded as UTF-8 without a byte-order mark.
///
/// The text goes to a temporary file next to `path` which is then renamed
/// over it, so a failed write leaves the previous contents in place.
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| Error::io(tmp.path(), e))?;

    // NamedTempFile is created 0600; keep the mode of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions())
            .map_err(|e| Error::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
