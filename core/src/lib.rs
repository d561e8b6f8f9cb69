pub mod build;
pub mod config;
pub mod duplicates;
pub mod flatten;
pub mod linter;
pub mod model;
pub mod report;
pub mod reserved;
pub mod sanitizer;
pub mod store;
pub mod tree;


pub use build::{build_language, build_merged};
pub use config::{ExportOptions, LintOptions, ManagerConfig};
pub use duplicates::{detect_duplicates, filter_muted, DuplicateMute};
pub use flatten::{flatten, FlattenOutput, LanguageTrees};
pub use linter::{analyze_key_path, analyze_rows};
pub use model::{DuplicateGroup, FlatRow, GroupExtension, KeyIssue, Language};
pub use report::{FindingsReport, ReportWriter};
pub use reserved::{is_reserved, RESERVED_SEGMENTS};
pub use sanitizer::{sanitize, SanitizedSegment};
pub use store::RowSnapshot;
pub use tree::{parse_document, ParseError, TokenGroup, TokenLeaf, TokenNode};
