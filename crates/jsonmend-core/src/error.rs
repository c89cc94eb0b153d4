/// Failure modes of the repair pipeline.
///
/// Individual stage failures are swallowed inside the pipeline (the next
/// stage gets its turn); only three kinds ever reach callers of
/// `repair_to_text`: `InvalidInput`, `NoBoundaryFound` and `ParseFailure`.
/// `UnbalancedStructure` completes the failure taxonomy for callers
/// matching on kinds: an unbalanced span is reported through
/// `BoundarySpan::balanced` and falls back to the whole text rather than
/// failing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepairError {
    #[error("input is empty or whitespace-only")]
    InvalidInput,

    #[error("no opening '{{' or '[' found in input")]
    NoBoundaryFound,

    #[error("delimiters never balance (depth {depth} at end of input)")]
    UnbalancedStructure { depth: i64 },

    #[error("unparseable after all repair stages: {message}")]
    ParseFailure {
        /// Last diagnostic from the standard parser.
        message: String,
        /// Best-effort flattened text, kept for debugging.
        flattened: String,
    },
}
