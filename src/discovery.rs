use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

use crate::types::SourceFileList;

/// Marker filename used when none is configured.
pub const DEFAULT_MARKER: &str = "clang-format-srcs";

pub struct DiscoveryOptions {
    pub marker: String,
    pub recurse: bool,
    pub follow_symlinks: bool,
    pub respect_ignore: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions {
            marker: DEFAULT_MARKER.to_string(),
            recurse: false,
            follow_symlinks: false,
            respect_ignore: false,
        }
    }
}

/// Marker files to read, root first, then subdirectories in walk order.
pub fn find_marker_files(root: &Path, opts: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    let mut markers = Vec::new();

    // the root marker is read whenever present, even if it turns out unreadable
    let own = root.join(&opts.marker);
    if own.symlink_metadata().is_ok() {
        markers.push(own);
    }
    if !opts.recurse {
        return Ok(markers);
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(opts.respect_ignore);
    builder.follow_links(opts.follow_symlinks);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(err) => {
                log::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        // depth 1 is the root's own listing, already handled above
        if dent.depth() < 2 {
            continue;
        }
        if dent.file_name() != OsStr::new(&opts.marker) {
            continue;
        }
        // follows a final symlink, so linked marker files count too
        if !dent.path().is_file() {
            continue;
        }
        markers.push(dent.into_path());
    }

    Ok(markers)
}

/// Reads one marker file: one path per line, trimmed, blank lines dropped.
pub fn read_marker(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("open marker file: {}", path.display()))?;
    let mut out = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("read marker file: {}", path.display()))?;
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        out.push(entry.to_string());
    }
    Ok(out)
}

/// Collects every source path listed by the applicable marker files.
///
/// # Errors
/// Returns an error if any selected marker file cannot be opened or read.
pub fn find_src_files(root: &Path, opts: &DiscoveryOptions) -> Result<SourceFileList> {
    let markers = find_marker_files(root, opts)?;
    let mut src_files = SourceFileList::new();
    for marker in &markers {
        log::debug!("reading marker file {}", marker.display());
        src_files.extend(read_marker(marker)?);
    }
    log::info!(
        "discovered {} source files from {} marker files",
        src_files.len(),
        markers.len()
    );
    Ok(src_files)
}
