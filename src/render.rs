use std::io::{self, Write};
use std::path::Path;

use similar::{ChangeTag, TextDiff};

/// Unchanged lines shown around each change.
pub const CONTEXT_LINES: usize = 3;

/// Suffix of the synthetic label given to the suggested side of a diff.
pub const SUGGESTED_SUFFIX: &str = ".clang-format";

/// Lines of a unified diff, each carrying its own line terminator (if any).
///
/// Built in full by [`unified_diff`], then consumed once, either by iterating
/// or by writing it out.
#[derive(Debug, Default)]
pub struct DiffOutput {
    lines: Vec<Vec<u8>>,
}

impl DiffOutput {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Writes the lines verbatim, adding nothing between or after them.
    pub fn write_to<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            out.write_all(line)?;
        }
        out.flush()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.lines.concat()
    }
}

impl IntoIterator for DiffOutput {
    type Item = Vec<u8>;
    type IntoIter = std::vec::IntoIter<Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

pub fn suggested_label(path: &Path) -> String {
    format!("{}{SUGGESTED_SUFFIX}", path.display())
}

/// Builds the unified diff from `original` to `suggested`.
///
/// An empty `suggested` buffer means the tool had nothing to offer and yields
/// no lines, as does a suggestion identical to the original.
pub fn unified_diff(path: &Path, original: &[u8], suggested: &[u8]) -> DiffOutput {
    let mut out = DiffOutput::default();
    if suggested.is_empty() || original == suggested {
        return out;
    }

    // lines end at '\n' only; a bare '\r' stays inside its line
    let old_lines: Vec<&[u8]> = original.split_inclusive(|&b| b == b'\n').collect();
    let new_lines: Vec<&[u8]> = suggested.split_inclusive(|&b| b == b'\n').collect();
    let diff = TextDiff::configure().diff_slices(&old_lines, &new_lines);
    let mut udiff = diff.unified_diff();
    udiff.context_radius(CONTEXT_LINES);

    for hunk in udiff.iter_hunks() {
        if out.lines.is_empty() {
            out.lines
                .push(format!("--- {}\n", path.display()).into_bytes());
            out.lines
                .push(format!("+++ {}\n", suggested_label(path)).into_bytes());
        }
        out.lines.push(format!("{}\n", hunk.header()).into_bytes());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => b'-',
                ChangeTag::Insert => b'+',
                ChangeTag::Equal => b' ',
            };
            let value: &[u8] = change.value();
            let mut line = Vec::with_capacity(value.len() + 1);
            line.push(sign);
            line.extend_from_slice(value);
            out.lines.push(line);
        }
    }
    out
}

/// Reads the on-disk file and diffs it against `suggested`.
///
/// # Errors
/// Returns an error if `path` cannot be read.
pub fn diff_file(path: &Path, suggested: &[u8]) -> io::Result<DiffOutput> {
    let original = std::fs::read(path)?;
    Ok(unified_diff(path, &original, suggested))
}
