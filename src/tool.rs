use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::types::ToolResult;

/// An external program plus the arguments placed before the target path.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        ToolCommand {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Human-readable command line, used in logs and diagnostics.
    pub fn display_with(&self, path: &Path) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.push(path.display().to_string());
        parts.join(" ")
    }

    /// Runs `<program> <args...> <path>` to completion, capturing both streams.
    ///
    /// Blocks until the tool exits; no timeout is applied.
    ///
    /// # Errors
    /// Returns an error only if the process cannot be spawned or waited on.
    /// A non-zero exit is reported through [`ToolResult::status`].
    pub fn run(&self, path: &Path) -> Result<ToolResult> {
        log::debug!("running {}", self.display_with(path));
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawn {}", self.program.to_string_lossy()))?;
        log::trace!(
            "{} exited with {} ({} bytes stdout, {} bytes stderr)",
            self.program.to_string_lossy(),
            output.status,
            output.stdout.len(),
            output.stderr.len()
        );
        Ok(ToolResult {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_streams_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("t.txt");
        std::fs::write(&target, "hello\n").unwrap();

        let ok = ToolCommand::new("cat").run(&target).unwrap();
        assert!(ok.success());
        assert_eq!(ok.stdout, b"hello\n");

        let missing = ToolCommand::new("cat").run(&dir.path().join("nope")).unwrap();
        assert!(!missing.success());
        assert!(!missing.stderr.is_empty());
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let err = ToolCommand::new("definitely-not-a-real-tool-xyz")
            .run(Path::new("a.c"))
            .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-tool-xyz"));
    }

    #[test]
    fn display_places_path_last() {
        let cmd = ToolCommand::new("clang-tidy").args(["-p", "build"]).arg("--fix");
        assert_eq!(
            cmd.display_with(Path::new("src/a.c")),
            "clang-tidy -p build --fix src/a.c"
        );
    }
}
