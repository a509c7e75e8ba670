use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::discovery::find_src_files;
use crate::format::Formatter;
use crate::render;
use crate::types::{FileStatus, FormatReport, SkipReason, Suggestion};

use super::FormatArgs;

pub fn run_format(args: &FormatArgs) -> Result<()> {
    let files = find_src_files(&args.common.directory, &args.common.discovery())?;
    let formatter = Formatter {
        program: args.clang_format.clone().into_os_string(),
        style: args.style.clone(),
    };

    let pb = args.common.progress_bar(files.len())?;
    let mut reports = Vec::new();
    for src in &files {
        let report = format_one(&formatter, Path::new(src), args.common.write, args.json, &pb)?;
        log::debug!("{}: {:?}", src, report.status);
        pb.inc(1);
        if args.json {
            reports.push(report);
        }
    }
    pb.finish_and_clear();

    if args.json {
        let s = serde_json::to_string_pretty(&reports)?;
        println!("{s}");
    }
    Ok(())
}

/// Takes one file through suggestion, diff and the optional in-place fix.
fn format_one(
    formatter: &Formatter,
    path: &Path,
    write: bool,
    json: bool,
    pb: &ProgressBar,
) -> Result<FormatReport> {
    let formatted = match formatter.suggest(path)? {
        Suggestion::Formatted(bytes) => bytes,
        Suggestion::Declined(reason) => {
            pb.suspend(|| report_skip(path, &reason));
            let mut report = FormatReport::new(path.to_path_buf(), FileStatus::from(&reason));
            report.reason = Some(reason.to_string());
            return Ok(report);
        }
    };

    let diff = render::diff_file(path, &formatted)
        .with_context(|| format!("read source file: {}", path.display()))?;
    if diff.is_empty() {
        return Ok(FormatReport::new(path.to_path_buf(), FileStatus::Unchanged));
    }

    let mut report = FormatReport::new(path.to_path_buf(), FileStatus::Changed);
    if json {
        report.diff = Some(String::from_utf8_lossy(&diff.into_bytes()).into_owned());
    } else {
        pb.suspend(|| -> io::Result<()> {
            let mut out = io::stdout().lock();
            writeln!(out, "clang-format {}", path.display())?;
            diff.write_to(&mut out)
        })?;
    }

    if write {
        formatter.fix(path)?;
        report.fixed = true;
    }
    Ok(report)
}

fn report_skip(path: &Path, reason: &SkipReason) {
    match reason {
        SkipReason::NotAFile => eprintln!("{} is not a file", path.display()),
        SkipReason::ToolFailed { stderr, .. } => {
            log::warn!("clang-format declined {}: {reason}", path.display());
            eprint!("clang-format {} failed:\n{stderr}", path.display());
        }
    }
}
