use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};
use indicatif::{ProgressBar, ProgressStyle};

use crate::discovery::{DEFAULT_MARKER, DiscoveryOptions};

mod run_format;
mod run_tidy;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "srccheck",
    version,
    about = "Run clang-format / clang-tidy on the files listed in marker files",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Subcommand,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Subcommand {
    /// Show the diff between each source file and its clang-format output
    Format(FormatArgs),
    /// Run clang-tidy on each source file and relay its report
    Tidy(TidyArgs),
}

/// Options shared by every subcommand.
#[allow(clippy::struct_excessive_bools)]
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Also read marker files found in subdirectories
    #[arg(short = 'r', long = "recurse", action = ArgAction::SetTrue)]
    pub recurse: bool,

    /// Apply the tool's suggestions to the source files
    #[arg(short = 'w', long = "write", action = ArgAction::SetTrue)]
    pub write: bool,

    /// Name of the files listing the sources to check
    #[arg(long = "marker", value_name = "NAME", default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Directory to search for marker files
    #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".", value_hint = ValueHint::DirPath)]
    pub directory: PathBuf,

    /// Follow symlinks while recursing
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    pub follow_symlinks: bool,

    /// Skip hidden and git-ignored directories while recursing
    #[arg(long = "respect-ignore", action = ArgAction::SetTrue)]
    pub respect_ignore: bool,

    /// Show a progress bar
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging (repeat for more)
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn discovery(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            marker: self.marker.clone(),
            recurse: self.recurse,
            follow_symlinks: self.follow_symlinks,
            respect_ignore: self.respect_ignore,
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
        if !self.progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} {pos}/{len} files {wide_bar} {eta}")?
                .tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"),
        );
        Ok(pb)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct FormatArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// clang-format executable
    #[arg(long = "clang-format", env = "CLANG_FORMAT", value_name = "PATH", default_value = "clang-format", value_hint = ValueHint::ExecutablePath)]
    pub clang_format: PathBuf,

    /// Value passed as -style=<STYLE>
    #[arg(long = "style", value_name = "STYLE", default_value = "file")]
    pub style: String,

    /// Output a JSON report instead of text diffs
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TidyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// clang-tidy executable
    #[arg(long = "clang-tidy", env = "CLANG_TIDY", value_name = "PATH", default_value = "clang-tidy", value_hint = ValueHint::ExecutablePath)]
    pub clang_tidy: PathBuf,

    /// Build directory containing compile_commands.json
    #[arg(short = 'p', value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub build_dir: Option<PathBuf>,

    /// Extra arguments passed to clang-tidy
    #[arg(last = true, value_name = "ARGS")]
    pub extra: Vec<String>,
}

fn init_logging(common: &CommonArgs) {
    let env = env_logger::Env::default().default_filter_or(common.log_level());
    // a second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if discovery fails, a tool cannot be spawned, or a
/// requested in-place fix fails.
pub fn run() -> Result<()> {
    let args = Args::parse();
    match &args.cmd {
        Subcommand::Format(format_args) => {
            init_logging(&format_args.common);
            run_format::run_format(format_args)
        }
        Subcommand::Tidy(tidy_args) => {
            init_logging(&tidy_args.common);
            run_tidy::run_tidy(tidy_args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_accepts_build_dir_and_trailing_args() {
        let args = Args::try_parse_from([
            "srccheck", "tidy", "-r", "-w", "-p", "build", "--", "--quiet", "-checks=*",
        ])
        .unwrap();
        let Subcommand::Tidy(t) = args.cmd else {
            panic!("expected tidy");
        };
        assert!(t.common.recurse);
        assert!(t.common.write);
        assert_eq!(t.build_dir, Some(PathBuf::from("build")));
        assert_eq!(t.extra, vec!["--quiet", "-checks=*"]);
    }

    #[test]
    fn format_defaults() {
        let args = Args::try_parse_from(["srccheck", "format"]).unwrap();
        let Subcommand::Format(f) = args.cmd else {
            panic!("expected format");
        };
        assert!(!f.common.recurse);
        assert!(!f.common.write);
        assert_eq!(f.common.marker, DEFAULT_MARKER);
        assert_eq!(f.style, "file");
        assert_eq!(f.common.log_level(), "warn");
    }

    #[test]
    fn verbosity_raises_log_level() {
        let args = Args::try_parse_from(["srccheck", "format", "-vv"]).unwrap();
        let Subcommand::Format(f) = args.cmd else {
            panic!("expected format");
        };
        assert_eq!(f.common.log_level(), "debug");
    }
}
