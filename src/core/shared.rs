//! Thread-safe oracle wrapper
//!
//! [`OracleCore`] itself has no internal locking. `SharedOracle` puts it
//! behind a `parking_lot::RwLock` so batch pipelines can fan work out across
//! threads: any number of readers, or one writer. Schemas are per-thread;
//! declare one inside each worker (handles come back identical).

use crate::core::config::OracleConfig;
use crate::core::oracle::OracleCore;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedOracle {
    inner: Arc<RwLock<OracleCore>>,
}

impl SharedOracle {
    pub fn new(oracle: OracleCore) -> Self {
        SharedOracle {
            inner: Arc::new(RwLock::new(oracle)),
        }
    }

    pub fn with_config(config: OracleConfig) -> Self {
        Self::new(OracleCore::with_config(config))
    }

    /// Run `f` under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&OracleCore) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Run `f` under the write lock
    pub fn write<R>(&self, f: impl FnOnce(&mut OracleCore) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }

    pub fn read_guard(&self) -> RwLockReadGuard<'_, OracleCore> {
        self.inner.read()
    }

    pub fn write_guard(&self) -> RwLockWriteGuard<'_, OracleCore> {
        self.inner.write()
    }

    /// Recover the oracle if this is the last handle
    pub fn try_unwrap(self) -> Result<OracleCore, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| SharedOracle { inner })
    }
}

impl Default for SharedOracle {
    fn default() -> Self {
        Self::new(OracleCore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::TypeToken;

    #[test]
    fn test_read_write_closures() {
        let shared = SharedOracle::default();
        let (field, row) = shared.write(|o| {
            let field = o.register_field("n", TypeToken::of::<u32>()).unwrap();
            let row = o.create_row();
            o.set(field, row, &3u32).unwrap();
            (field, row)
        });
        let value = shared.read(|o| o.get::<u32>(field, row).unwrap());
        assert_eq!(value, Some(3));
    }

    #[test]
    fn test_try_unwrap() {
        let shared = SharedOracle::default();
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        let oracle = shared.try_unwrap().unwrap();
        assert_eq!(oracle.stats().live_rows, 0);
    }

    #[test]
    fn test_threads_register_identical_handles() {
        let shared = SharedOracle::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared.write(|o| o.register_field("score", TypeToken::of::<f32>()).unwrap())
                })
            })
            .collect();
        let fields: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(fields.windows(2).all(|w| w[0] == w[1]));
    }
}
