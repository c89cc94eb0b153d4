//! jsonmend-core: staged repair of malformed JSON text
//!
//! This crate focuses on a small, well-factored surface:
//! - Repair pipeline for JSON wrapped in prose/markdown or bent by LLM
//!   output (control noise, raw newlines in strings, trailing commas,
//!   single quotes, bare identifiers)
//! - Each stage is a pure text transform; the pipeline tries them in a
//!   fixed order and stops at the first parseable result
//! - Batch application over a directory tree with altered/deleted/valid
//!   accounting for CLI use
//!
pub mod batch;
pub mod boundary;
pub mod error;
pub mod escape;
pub mod pipeline;
pub mod sanitize;
pub mod structural;

// Re-export the repair and batch entry points
pub use batch::{BatchSummary, FileOutcome, SENTINEL_FILE_NAME, sanitize_file, sanitize_tree};
pub use boundary::{BoundarySpan, find_boundary, trim_to_boundary};
pub use error::RepairError;
pub use pipeline::{RepairOutcome, is_parseable, repair_to_text, repair_to_value, try_repair};
