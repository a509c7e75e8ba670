use std::ffi::OsString;
use std::path::Path;

use anyhow::{Result, bail};

use crate::tool::ToolCommand;
use crate::types::{SkipReason, Suggestion};

/// Wrapper around a clang-format style formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    pub program: OsString,
    pub style: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter {
            program: OsString::from("clang-format"),
            style: "file".to_string(),
        }
    }
}

impl Formatter {
    fn command(&self) -> ToolCommand {
        // -style=file looks for .clang-format next to the source or in a parent
        ToolCommand::new(self.program.clone()).arg(format!("-style={}", self.style))
    }

    /// Asks the formatter for the formatted content of `path` without touching it.
    ///
    /// # Errors
    /// Returns an error if the formatter cannot be spawned.
    pub fn suggest(&self, path: &Path) -> Result<Suggestion> {
        if !path.is_file() {
            return Ok(Suggestion::Declined(SkipReason::NotAFile));
        }
        let result = self.command().run(path)?;
        if !result.success() {
            return Ok(Suggestion::Declined(SkipReason::tool_failed(&result)));
        }
        Ok(Suggestion::Formatted(result.stdout))
    }

    /// Rewrites `path` in place.
    ///
    /// # Errors
    /// Fails if `path` is not a regular file, the formatter cannot be spawned,
    /// or it exits non-zero.
    pub fn fix(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            bail!("{} is not a file", path.display());
        }
        let result = self.command().arg("-i").run(path)?;
        if !result.success() {
            let stderr = result.stderr_lossy();
            if !stderr.is_empty() {
                log::error!("{}", stderr.trim_end());
            }
            bail!("clang-format failed to modify {}", path.display());
        }
        Ok(())
    }
}
