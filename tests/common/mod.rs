#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const MARKER: &str = "clang-format-srcs";

/// Scratch tree with fake tools that record every invocation.
pub struct Sandbox {
    dir: TempDir,
    pub log: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("tool.log");
        Self { dir, log }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let p = self.root().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&p, contents).unwrap();
        p
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    /// Writes an executable `sh` script under `bin/`; `body` runs after the
    /// arguments are appended to the invocation log and `$last` holds the path.
    pub fn tool(&self, name: &str, body: &str) -> PathBuf {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\nfor last; do :; done\n{body}\n",
            self.log.display()
        );
        let p = self.write(&format!("bin/{name}"), &script);
        let mut perms = fs::metadata(&p).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&p, perms).unwrap();
        p
    }

    /// Formatter that collapses runs of spaces; honours `-i`.
    pub fn squeeze_formatter(&self) -> PathBuf {
        self.tool(
            "fake-clang-format",
            "if [ \"$2\" = \"-i\" ]; then\n  sed 's/  */ /g' \"$last\" > \"$last.tmp\" && mv \"$last.tmp\" \"$last\"\n  exit 0\nfi\nsed 's/  */ /g' \"$last\"",
        )
    }

    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_srccheck"))
            .args(args)
            .current_dir(self.root())
            .env_remove("RUST_LOG")
            .output()
            .expect("run srccheck")
    }
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}
