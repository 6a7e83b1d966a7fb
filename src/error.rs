use thiserror::Error;

/// Errors surfaced across the `scan` call boundary.
///
/// Conditions that are tolerated against messy input data (unknown zones,
/// malformed rules, unreadable time values) are not represented here — they
/// are logged via `tracing` and degraded in place instead. See `ScanError`
/// variants for the ones that are actually surfaced.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScanError {
    #[error("unknown component kind: '{0}'")]
    InvalidKind(String),
}
