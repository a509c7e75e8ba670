pub mod cli;
pub mod discovery;
pub mod format;
pub mod render;
pub mod tidy;
pub mod tool;
pub mod types;

pub use discovery::{DEFAULT_MARKER, DiscoveryOptions, find_src_files};
pub use format::Formatter;
pub use render::{DiffOutput, unified_diff};
pub use tidy::{LintReport, Linter};
pub use types::{SkipReason, SourceFileList, Suggestion, ToolResult};
