//! Opaque handles for rows and fields
//!
//! Both handle types are plain integers wrapped in newtypes so they are cheap
//! to copy and impossible to mix up. A handle never owns storage; the
//! [`OracleCore`](crate::core::oracle::OracleCore) that issued it does.

use std::fmt;

/// Identifier for one record (a track or a frame) in the oracle
///
/// Row handles are allocated monotonically and never recycled, so a handle
/// that outlives its row is reported as stale instead of silently aliasing a
/// newer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(u64);

impl RowHandle {
    pub(crate) fn new(id: u64) -> Self {
        RowHandle(id)
    }

    /// Rebuild a handle from a raw id (e.g. one persisted by a format adapter)
    ///
    /// Ids that were never issued, or whose row was deleted, are rejected with
    /// [`OracleError::StaleRow`](crate::core::error::OracleError::StaleRow)
    /// by every oracle operation.
    pub fn from_raw(id: u64) -> Self {
        RowHandle(id)
    }

    /// Raw numeric id
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Identifier for one named, typed column
///
/// Field handles are dense indices into the oracle's column table. Once
/// allocated a field is never removed, so its handle stays valid for the
/// lifetime of the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(u32);

impl FieldHandle {
    pub(crate) fn new(id: u32) -> Self {
        FieldHandle(id)
    }

    /// Handle for column `index`, or `None` once the id space is exhausted
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(FieldHandle)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw numeric id
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}
