use crate::core::handle::{FieldHandle, RowHandle};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Field '{name}' is registered as {existing}; cannot re-register it as {requested}")]
    TypeConflict {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("Stale row handle: {0} was deleted or never issued")]
    StaleRow(RowHandle),

    #[error("Unknown field handle: {0}")]
    UnknownField(FieldHandle),

    #[error("Cursor is unbound: no row has been selected on this host")]
    UnboundCursor,

    #[error("Cursor points at deleted row {0}")]
    StaleCursor(RowHandle),

    #[error("Field '{name}' holds {expected} values, accessed as {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Frame {frame} already belongs to track {owner}")]
    FrameOwnership { frame: RowHandle, owner: RowHandle },

    #[error("Row {0} cannot be a frame of itself")]
    SelfFrame(RowHandle),

    #[error("Row {frame} cannot become a frame of {track}: frames cannot own frames and tracks cannot be frames")]
    NestedFrame { track: RowHandle, frame: RowHandle },

    #[error("Track {track} still owns {count} frame(s); delete or detach them first")]
    OwnedFramesRemain { track: RowHandle, count: usize },

    #[error("Row {0} was already deleted")]
    DoubleDelete(RowHandle),

    #[error("Cannot register field '{0}': the field id space is exhausted")]
    TooManyFields(String),

    #[error("Value codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{count} frame(s) have no resolvable source field; first: {first}")]
    Unresolved {
        count: usize,
        first: Box<ResolutionFailure>,
    },
}

/// Coarse classification of [`OracleError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A name was re-registered with an incompatible type
    TypeConflict,
    /// A row or field handle is deleted, unknown, or accessed as the wrong type
    StaleHandle,
    /// A host cursor was never set or points at a deleted row
    UnboundCursor,
    /// Track/frame membership rules were violated
    Membership,
    /// Cross-schema attachment could not find a source field
    Resolution,
    /// Config, codec, I/O, or capacity failure
    Environment,
}

impl OracleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OracleError::TypeConflict { .. } => ErrorCategory::TypeConflict,
            OracleError::StaleRow(_)
            | OracleError::UnknownField(_)
            | OracleError::TypeMismatch { .. }
            | OracleError::DoubleDelete(_) => ErrorCategory::StaleHandle,
            OracleError::UnboundCursor | OracleError::StaleCursor(_) => {
                ErrorCategory::UnboundCursor
            }
            OracleError::FrameOwnership { .. }
            | OracleError::SelfFrame(_)
            | OracleError::NestedFrame { .. }
            | OracleError::OwnedFramesRemain { .. } => ErrorCategory::Membership,
            OracleError::Unresolved { .. } => ErrorCategory::Resolution,
            OracleError::TooManyFields(_)
            | OracleError::Codec(_)
            | OracleError::Config(_)
            | OracleError::Io(_) => ErrorCategory::Environment,
        }
    }
}

/// Why a frame could not be given a value during cross-schema attachment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionReason {
    #[error("no value in any of the fields {tried:?}")]
    NoSourceField { tried: Vec<String> },

    #[error("source field '{name}' holds {found} values, expected f64")]
    SourceTypeConflict { name: String, found: &'static str },

    #[error("coordinate out of range (lat {latitude}, lon {longitude})")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// One frame that could not be resolved, tied to its track and position
#[derive(Error, Debug, Clone, PartialEq)]
#[error("frame {frame_index} ({frame}) of track {track} [{format}]: {reason}")]
pub struct ResolutionFailure {
    pub track: RowHandle,
    pub frame: RowHandle,
    pub frame_index: usize,
    pub format: String,
    pub reason: ResolutionReason,
}

pub type Result<T> = std::result::Result<T, OracleError>;
