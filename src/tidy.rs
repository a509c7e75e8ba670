use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::tool::ToolCommand;
use crate::types::SkipReason;

/// Wrapper around a clang-tidy style linter.
#[derive(Debug, Clone)]
pub struct Linter {
    pub program: OsString,
    /// Directory holding `compile_commands.json`.
    pub build_dir: Option<PathBuf>,
    pub extra_args: Vec<String>,
    pub fix: bool,
}

impl Default for Linter {
    fn default() -> Self {
        Linter {
            program: OsString::from("clang-tidy"),
            build_dir: None,
            extra_args: Vec::new(),
            fix: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintReport {
    /// Tool succeeded; stdout holds its suggestion report.
    Clean { stdout: String },
    Skipped(SkipReason),
}

impl Linter {
    /// Arguments placed before the path. Fix mode only appends `--fix`.
    pub fn pass_through_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(ref dir) = self.build_dir {
            args.push(OsString::from("-p"));
            args.push(dir.clone().into_os_string());
        }
        args.extend(self.extra_args.iter().map(OsString::from));
        if self.fix {
            args.push(OsString::from("--fix"));
        }
        args
    }

    fn command(&self) -> ToolCommand {
        ToolCommand::new(self.program.clone()).args(self.pass_through_args())
    }

    /// Runs the linter on `path`.
    ///
    /// # Errors
    /// Returns an error if the linter cannot be spawned.
    pub fn check(&self, path: &Path) -> Result<LintReport> {
        if !path.is_file() {
            return Ok(LintReport::Skipped(SkipReason::NotAFile));
        }
        let result = self.command().run(path)?;
        if !result.success() {
            return Ok(LintReport::Skipped(SkipReason::tool_failed(&result)));
        }
        Ok(LintReport::Clean {
            stdout: result.stdout_lossy(),
        })
    }

    /// Header for a failure diagnostic: the command line minus the program path.
    pub fn failure_header(&self, path: &Path) -> String {
        let args: Vec<String> = self
            .pass_through_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        if args.is_empty() {
            format!("clang-tidy {} failed:", path.display())
        } else {
            format!("clang-tidy {} {} failed:", args.join(" "), path.display())
        }
    }
}
