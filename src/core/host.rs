//! Cursor hosts
//!
//! A [`Host`] holds the "current row" for a schema instance. Every field the
//! schema declares shares the host's cursor, and resolves it at the moment of
//! access, so one schema object can walk an entire track set by moving its
//! cursor before each read or write.
//!
//! Hosts are single-threaded (`!Send`); each worker builds its own schema
//! instance.

use crate::core::error::{OracleError, Result};
use crate::core::handle::RowHandle;
use crate::core::oracle::OracleCore;
use std::cell::Cell;
use std::rc::Rc;

/// Shared, mutable cursor
///
/// Cloning a `Host` yields another handle onto the same cursor.
#[derive(Debug, Clone, Default)]
pub struct Host {
    cursor: Rc<Cell<Option<RowHandle>>>,
}

impl Host {
    /// A host whose cursor has not been set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cursor(&self, row: RowHandle) {
        self.cursor.set(Some(row));
    }

    pub fn get_cursor(&self) -> Option<RowHandle> {
        self.cursor.get()
    }

    pub fn clear_cursor(&self) {
        self.cursor.set(None);
    }

    /// Whether two hosts share one cursor
    pub fn same_as(&self, other: &Host) -> bool {
        Rc::ptr_eq(&self.cursor, &other.cursor)
    }

    /// Current row, verified live in `oracle`
    pub fn resolve(&self, oracle: &OracleCore) -> Result<RowHandle> {
        match self.cursor.get() {
            None => Err(OracleError::UnboundCursor),
            Some(row) if !oracle.is_live(row) => Err(OracleError::StaleCursor(row)),
            Some(row) => Ok(row),
        }
    }
}
