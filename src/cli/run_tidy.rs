use std::path::Path;

use anyhow::{Result, bail};

use crate::discovery::find_src_files;
use crate::tidy::{LintReport, Linter};
use crate::types::SkipReason;

use super::TidyArgs;

pub fn run_tidy(args: &TidyArgs) -> Result<()> {
    let files = find_src_files(&args.common.directory, &args.common.discovery())?;
    let linter = Linter {
        program: args.clang_tidy.clone().into_os_string(),
        build_dir: args.build_dir.clone(),
        extra_args: args.extra.clone(),
        fix: args.common.write,
    };

    let pb = args.common.progress_bar(files.len())?;
    for src in &files {
        let path = Path::new(src);
        match linter.check(path)? {
            LintReport::Clean { stdout } => {
                pb.suspend(|| print!("clang-tidy {}\n{stdout}", path.display()));
            }
            LintReport::Skipped(SkipReason::NotAFile) => {
                pb.suspend(|| eprintln!("{} is not a file", path.display()));
            }
            LintReport::Skipped(SkipReason::ToolFailed { stderr, .. }) => {
                pb.suspend(|| eprint!("{}\n{stderr}", linter.failure_header(path)));
                // fix failures abort the run
                if linter.fix {
                    pb.finish_and_clear();
                    bail!("clang-tidy failed to fix {}", path.display());
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}
