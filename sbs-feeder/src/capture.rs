//! Line input for BaseStation captures.
//!
//! Captures are plain text with one SBS line per row, as written by
//! `nc localhost 30003 > capture.sbs` against dump1090 or BaseStation itself.
//! `-` reads stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read SBS lines from a file or stdin.
pub struct LineReader {
    inner: Box<dyn BufRead>,
}

impl LineReader {
    /// Open `path`, or stdin when `path` is `-`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let inner: Box<dyn BufRead> = if path.to_str() == Some("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        Ok(LineReader { inner })
    }

    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        LineReader {
            inner: Box::new(reader),
        }
    }

    /// Cleaned lines paired with their 1-based line number in the input,
    /// skipping blanks and comments. Read errors end the iteration with the
    /// error as the final item.
    pub fn lines(self) -> impl Iterator<Item = io::Result<(usize, String)>> {
        self.inner
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                Ok(l) => clean_sbs_line(&l).map(|s| Ok((idx + 1, s.to_string()))),
                Err(e) => Some(Err(e)),
            })
    }
}

/// Strip surrounding whitespace; `None` for blank lines and `#` comments.
pub fn clean_sbs_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_clean_sbs_line() {
        assert_eq!(clean_sbs_line("  MSG,8,1  \r"), Some("MSG,8,1"));
        assert_eq!(clean_sbs_line(""), None);
        assert_eq!(clean_sbs_line("   "), None);
        assert_eq!(clean_sbs_line("# capture started"), None);
    }

    #[test]
    fn test_reader_skips_blanks() {
        let data = "MSG,8,1\n\n# comment\r\nAIR,,1\n";
        let lines: Vec<(usize, String)> = LineReader::from_reader(Cursor::new(data))
            .lines()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(
            lines,
            vec![(1, "MSG,8,1".to_string()), (4, "AIR,,1".to_string())]
        );
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "STA,,1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "ID,,1").unwrap();

        let lines: Vec<(usize, String)> = LineReader::open(file.path())
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![(1, "STA,,1".to_string()), (3, "ID,,1".to_string())]
        );
    }

    #[test]
    fn test_open_missing_file() {
        assert!(LineReader::open(Path::new("/nonexistent/capture.sbs")).is_err());
    }
}
