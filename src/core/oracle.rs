//! Oracle core: rows, fields, and type-erased value slots
//!
//! The oracle owns every value. A value lives in the slot addressed by
//! `(field handle, row handle)`; slots are sparse, so a row carries exactly
//! the fields that were written to it and nothing else. Absence is `Ok(None)`,
//! never an error; errors are reserved for stale handles, unknown fields,
//! and type disagreements.
//!
//! Track rows additionally own an ordered list of frame rows. The oracle keeps
//! that membership consistent (a frame has at most one owner) but never
//! deletes frames on its own behalf: deleting a track that still owns frames
//! is refused.

use crate::core::allocator::RowAllocator;
use crate::core::config::{DoubleDeletePolicy, OracleConfig, MAX_ROW_CAPACITY};
use crate::core::error::{OracleError, Result};
use crate::core::field::TrackField;
use crate::core::handle::{FieldHandle, RowHandle};
use crate::core::registry::{FieldDescriptor, FieldRegistry};
use crate::core::value::{decode, encode, FieldValue, TypeToken};
use ahash::AHashMap;
use std::any::type_name;
use tracing::{debug, info, warn};

/// Slots for one field, keyed by row
#[derive(Debug, Clone, Default)]
struct Column {
    slots: AHashMap<RowHandle, Vec<u8>>,
}

/// Point-in-time counters for an oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OracleStats {
    pub live_rows: usize,
    pub deleted_rows: u64,
    pub fields: usize,
    pub slots: usize,
    pub tracks_with_frames: usize,
}

/// The attribute store
///
/// Mutation takes `&mut self`; share across threads through
/// [`SharedOracle`](crate::core::shared::SharedOracle).
#[derive(Debug, Clone)]
pub struct OracleCore {
    config: OracleConfig,
    rows: RowAllocator,
    registry: FieldRegistry,
    columns: Vec<Column>,
    /// track -> ordered frames
    frames: AHashMap<RowHandle, Vec<RowHandle>>,
    /// frame -> track
    owners: AHashMap<RowHandle, RowHandle>,
}

impl OracleCore {
    pub fn new() -> Self {
        Self::with_config(OracleConfig::default())
    }

    /// Create an oracle without validating `config`
    ///
    /// An `initial_row_capacity` above [`MAX_ROW_CAPACITY`] is capped; use
    /// [`OracleBuilder`](crate::core::config::OracleBuilder) to reject it instead.
    pub fn with_config(config: OracleConfig) -> Self {
        let capacity = config.initial_row_capacity.min(MAX_ROW_CAPACITY);
        if capacity < config.initial_row_capacity {
            warn!(
                "Row capacity {} capped at {}",
                config.initial_row_capacity, capacity
            );
        }
        info!(
            "Creating oracle (row capacity {}, double delete {:?})",
            config.initial_row_capacity, config.double_delete
        );
        OracleCore {
            rows: RowAllocator::with_capacity(capacity),
            config,
            registry: FieldRegistry::new(),
            columns: Vec::new(),
            frames: AHashMap::new(),
            owners: AHashMap::new(),
        }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    // ---- rows ------------------------------------------------------------

    /// Allocate a fresh row with no field values
    pub fn create_row(&mut self) -> RowHandle {
        let row = self.rows.allocate();
        debug!("Created {}", row);
        row
    }

    pub fn is_live(&self, row: RowHandle) -> bool {
        self.rows.is_live(row)
    }

    /// `Ok(())` if `row` is live, [`OracleError::StaleRow`] otherwise
    pub fn check_row(&self, row: RowHandle) -> Result<()> {
        if self.rows.is_live(row) {
            Ok(())
        } else {
            Err(OracleError::StaleRow(row))
        }
    }

    /// Delete a row and purge every value stored for it
    ///
    /// A frame row is detached from its track first. A track row that still
    /// owns frames is refused with [`OracleError::OwnedFramesRemain`].
    /// Deleting an already-deleted row follows
    /// [`OracleConfig::double_delete`]; a handle that was never issued is
    /// always [`OracleError::StaleRow`].
    pub fn delete_row(&mut self, row: RowHandle) -> Result<()> {
        if !self.rows.is_live(row) {
            if !self.rows.was_issued(row) {
                return Err(OracleError::StaleRow(row));
            }
            return match self.config.double_delete {
                DoubleDeletePolicy::Ignore => {
                    warn!("Double delete of {} ignored", row);
                    Ok(())
                }
                DoubleDeletePolicy::Error => Err(OracleError::DoubleDelete(row)),
            };
        }

        if let Some(frames) = self.frames.get(&row) {
            if !frames.is_empty() {
                return Err(OracleError::OwnedFramesRemain {
                    track: row,
                    count: frames.len(),
                });
            }
        }

        let mut purged = 0usize;
        for column in &mut self.columns {
            if column.slots.remove(&row).is_some() {
                purged += 1;
            }
        }

        self.frames.remove(&row);
        if let Some(owner) = self.owners.remove(&row) {
            if let Some(list) = self.frames.get_mut(&owner) {
                list.retain(|&f| f != row);
            }
        }

        self.rows.release(row);
        debug!("Deleted {} ({} slot(s) purged)", row, purged);
        Ok(())
    }

    /// Live rows in allocation order
    pub fn live_rows(&self) -> impl Iterator<Item = RowHandle> + '_ {
        self.rows.live_rows()
    }

    // ---- fields ----------------------------------------------------------

    /// Register `name` with the given type, reusing the handle if it already exists
    pub fn register_field(&mut self, name: &str, type_token: TypeToken) -> Result<FieldHandle> {
        self.register(FieldDescriptor::new(name, type_token))
    }

    /// Register a fully described field
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<FieldHandle> {
        let (handle, created) = self.registry.register(descriptor)?;
        if created {
            self.columns.push(Column::default());
        }
        Ok(handle)
    }

    pub fn lookup_field(&self, name: &str) -> Option<FieldHandle> {
        self.registry.lookup(name)
    }

    pub fn describe_field(&self, field: FieldHandle) -> Result<&FieldDescriptor> {
        self.registry.descriptor(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.registry.iter().map(|(_, d)| d.name.as_str())
    }

    fn column(&self, field: FieldHandle) -> Result<&Column> {
        self.columns
            .get(field.index())
            .ok_or(OracleError::UnknownField(field))
    }

    fn column_mut(&mut self, field: FieldHandle) -> Result<&mut Column> {
        self.columns
            .get_mut(field.index())
            .ok_or(OracleError::UnknownField(field))
    }

    // ---- untyped values --------------------------------------------------

    /// Raw bytes stored for `(field, row)`, or `None` if the slot was never written
    pub fn get_raw(&self, field: FieldHandle, row: RowHandle) -> Result<Option<&[u8]>> {
        self.check_row(row)?;
        Ok(self.column(field)?.slots.get(&row).map(Vec::as_slice))
    }

    /// Store raw bytes without any type check
    ///
    /// Bytes that do not decode as the field's declared type surface as
    /// [`OracleError::Codec`] on the next typed read.
    pub fn set_raw(&mut self, field: FieldHandle, row: RowHandle, bytes: Vec<u8>) -> Result<()> {
        self.check_row(row)?;
        self.column_mut(field)?.slots.insert(row, bytes);
        Ok(())
    }

    pub fn exists(&self, field: FieldHandle, row: RowHandle) -> Result<bool> {
        self.check_row(row)?;
        Ok(self.column(field)?.slots.contains_key(&row))
    }

    /// Remove one slot; returns whether a value was present
    pub fn remove_at_row(&mut self, field: FieldHandle, row: RowHandle) -> Result<bool> {
        self.check_row(row)?;
        Ok(self.column_mut(field)?.slots.remove(&row).is_some())
    }

    /// Copy `field`'s value from `src` to `dst`
    ///
    /// If `src` has no value the call is a no-op and `dst` is left untouched.
    pub fn copy_value(&mut self, field: FieldHandle, src: RowHandle, dst: RowHandle) -> Result<()> {
        self.check_row(src)?;
        self.check_row(dst)?;
        let column = self.column_mut(field)?;
        if let Some(bytes) = column.slots.get(&src).cloned() {
            column.slots.insert(dst, bytes);
        }
        Ok(())
    }

    /// Every field holding a value for `row`, in registration order
    pub fn fields_at_row(&self, row: RowHandle) -> Result<Vec<FieldHandle>> {
        self.check_row(row)?;
        Ok((0u32..)
            .zip(&self.columns)
            .filter(|(_, column)| column.slots.contains_key(&row))
            .map(|(id, _)| FieldHandle::new(id))
            .collect())
    }

    // ---- typed values ----------------------------------------------------

    /// Fails with [`OracleError::TypeMismatch`] unless `field` was declared as `T`
    pub fn check_type<T: 'static>(&self, field: FieldHandle) -> Result<()> {
        let descriptor = self.describe_field(field)?;
        if descriptor.type_token.is::<T>() {
            Ok(())
        } else {
            Err(OracleError::TypeMismatch {
                name: descriptor.name.clone(),
                expected: descriptor.type_token.name(),
                found: type_name::<T>(),
            })
        }
    }

    pub fn get<T: FieldValue>(&self, field: FieldHandle, row: RowHandle) -> Result<Option<T>> {
        self.check_type::<T>(field)?;
        match self.get_raw(field, row)? {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: FieldValue>(&mut self, field: FieldHandle, row: RowHandle, value: &T) -> Result<()> {
        self.check_type::<T>(field)?;
        let bytes = encode(value)?;
        self.set_raw(field, row, bytes)
    }

    /// Lowest-numbered row whose value for `field` equals `value`
    pub fn lookup<T: FieldValue + PartialEq>(
        &self,
        field: FieldHandle,
        value: &T,
    ) -> Result<Option<RowHandle>> {
        self.check_type::<T>(field)?;
        let mut found: Option<RowHandle> = None;
        for (&row, bytes) in &self.column(field)?.slots {
            if found.map_or(false, |best| best < row) {
                continue;
            }
            let candidate: T = decode(bytes)?;
            if candidate == *value {
                found = Some(row);
            }
        }
        Ok(found)
    }

    // ---- track / frame membership ----------------------------------------

    /// Append `frame` to `track`'s frame list
    ///
    /// Re-adding a frame to the track that already owns it is a no-op.
    /// Membership is one level deep: a frame cannot own frames and a row
    /// that is already a frame cannot become a track.
    pub fn add_frame(&mut self, track: RowHandle, frame: RowHandle) -> Result<()> {
        self.check_row(track)?;
        self.check_row(frame)?;
        if track == frame {
            return Err(OracleError::SelfFrame(track));
        }
        match self.owners.get(&frame) {
            Some(&owner) if owner == track => return Ok(()),
            Some(&owner) => return Err(OracleError::FrameOwnership { frame, owner }),
            None => {}
        }
        let frame_owns_frames = self.frames.get(&frame).map_or(false, |list| !list.is_empty());
        if frame_owns_frames || self.owners.contains_key(&track) {
            return Err(OracleError::NestedFrame { track, frame });
        }

        self.owners.insert(frame, track);
        self.frames.entry(track).or_default().push(frame);
        Ok(())
    }

    /// Frames owned by `track`, in insertion order
    pub fn frames(&self, track: RowHandle) -> Result<&[RowHandle]> {
        self.check_row(track)?;
        Ok(self.frames.get(&track).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Remove `frame` from its track's list; returns the former owner
    pub fn detach_frame(&mut self, frame: RowHandle) -> Result<Option<RowHandle>> {
        self.check_row(frame)?;
        let owner = self.owners.remove(&frame);
        if let Some(track) = owner {
            if let Some(list) = self.frames.get_mut(&track) {
                list.retain(|&f| f != frame);
            }
        }
        Ok(owner)
    }

    pub fn owning_track(&self, frame: RowHandle) -> Result<Option<RowHandle>> {
        self.check_row(frame)?;
        Ok(self.owners.get(&frame).copied())
    }

    // ---- views -------------------------------------------------------------

    /// Read-only view of one row
    pub fn view(&self, row: RowHandle) -> Result<RowView<'_>> {
        self.check_row(row)?;
        Ok(RowView { oracle: self, row })
    }

    /// Mutable view of one row
    pub fn view_mut(&mut self, row: RowHandle) -> Result<RowViewMut<'_>> {
        self.check_row(row)?;
        Ok(RowViewMut { oracle: self, row })
    }

    pub fn stats(&self) -> OracleStats {
        OracleStats {
            live_rows: self.rows.live_count(),
            deleted_rows: self.rows.issued() - self.rows.live_count() as u64,
            fields: self.registry.len(),
            slots: self.columns.iter().map(|c| c.slots.len()).sum(),
            tracks_with_frames: self.frames.values().filter(|f| !f.is_empty()).count(),
        }
    }
}

impl Default for OracleCore {
    fn default() -> Self {
        Self::new()
    }
}

/// A row bound to a borrowed oracle
///
/// The borrow keeps the row alive for as long as the view exists, so
/// per-row iteration can read many fields without re-checking the handle.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'o> {
    oracle: &'o OracleCore,
    row: RowHandle,
}

impl<'o> RowView<'o> {
    pub fn row(&self) -> RowHandle {
        self.row
    }

    pub fn get<T: FieldValue>(&self, field: &TrackField<T>) -> Result<Option<T>> {
        self.oracle.get(field.handle(), self.row)
    }

    pub fn exists(&self, field: FieldHandle) -> Result<bool> {
        self.oracle.exists(field, self.row)
    }

    pub fn fields(&self) -> Result<Vec<FieldHandle>> {
        self.oracle.fields_at_row(self.row)
    }

    pub fn frames(&self) -> Result<&'o [RowHandle]> {
        self.oracle.frames(self.row)
    }
}

/// A row bound to a mutably borrowed oracle
#[derive(Debug)]
pub struct RowViewMut<'o> {
    oracle: &'o mut OracleCore,
    row: RowHandle,
}

impl RowViewMut<'_> {
    pub fn row(&self) -> RowHandle {
        self.row
    }

    pub fn get<T: FieldValue>(&self, field: &TrackField<T>) -> Result<Option<T>> {
        self.oracle.get(field.handle(), self.row)
    }

    pub fn set<T: FieldValue>(&mut self, field: &TrackField<T>, value: T) -> Result<&mut Self> {
        self.oracle.set(field.handle(), self.row, &value)?;
        Ok(self)
    }

    pub fn remove(&mut self, field: FieldHandle) -> Result<bool> {
        self.oracle.remove_at_row(field, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OracleBuilder;
    use crate::core::error::ErrorCategory;

    fn f64_field(oracle: &mut OracleCore, name: &str) -> FieldHandle {
        oracle.register_field(name, TypeToken::of::<f64>()).unwrap()
    }

    #[test]
    fn test_new_row_is_empty() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let row = oracle.create_row();
        assert!(!oracle.exists(f, row).unwrap());
        assert!(oracle.fields_at_row(row).unwrap().is_empty());
        assert_eq!(oracle.get::<f64>(f, row).unwrap(), None);
    }

    #[test]
    fn test_set_get_exists() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let row = oracle.create_row();
        oracle.set(f, row, &2.5f64).unwrap();
        assert!(oracle.exists(f, row).unwrap());
        assert_eq!(oracle.get::<f64>(f, row).unwrap(), Some(2.5));
        assert_eq!(oracle.fields_at_row(row).unwrap(), vec![f]);
    }

    #[test]
    fn test_typed_access_checks_declared_type() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let row = oracle.create_row();
        let err = oracle.set(f, row, &"nope".to_string()).unwrap_err();
        assert!(matches!(err, OracleError::TypeMismatch { .. }));
        let err = oracle.get::<u32>(f, row).unwrap_err();
        assert!(matches!(err, OracleError::TypeMismatch { .. }));
    }

    #[test]
    fn test_raw_bypass_surfaces_codec_error() {
        let mut oracle = OracleCore::new();
        let f = oracle
            .register_field("name", TypeToken::of::<String>())
            .unwrap();
        let row = oracle.create_row();
        oracle.set_raw(f, row, vec![0xff]).unwrap();
        assert_eq!(oracle.get_raw(f, row).unwrap(), Some(&[0xffu8][..]));
        assert!(matches!(
            oracle.get::<String>(f, row),
            Err(OracleError::Codec(_))
        ));
    }

    #[test]
    fn test_delete_purges_all_slots() {
        let mut oracle = OracleCore::new();
        let a = f64_field(&mut oracle, "a");
        let b = f64_field(&mut oracle, "b");
        let row = oracle.create_row();
        let other = oracle.create_row();
        oracle.set(a, row, &1.0f64).unwrap();
        oracle.set(b, row, &2.0f64).unwrap();
        oracle.set(a, other, &3.0f64).unwrap();

        oracle.delete_row(row).unwrap();
        assert!(matches!(oracle.exists(a, row), Err(OracleError::StaleRow(_))));
        assert_eq!(oracle.stats().slots, 1);
        assert_eq!(oracle.get::<f64>(a, other).unwrap(), Some(3.0));
    }

    #[test]
    fn test_double_delete_policies() {
        let mut lenient = OracleCore::new();
        let row = lenient.create_row();
        lenient.delete_row(row).unwrap();
        lenient.delete_row(row).unwrap();

        let mut strict = OracleBuilder::new()
            .double_delete(DoubleDeletePolicy::Error)
            .build()
            .unwrap();
        let row = strict.create_row();
        strict.delete_row(row).unwrap();
        assert!(matches!(
            strict.delete_row(row),
            Err(OracleError::DoubleDelete(_))
        ));
    }

    #[test]
    fn test_never_issued_row_is_stale() {
        let mut oracle = OracleCore::new();
        let bogus = RowHandle::from_raw(999);
        assert!(matches!(
            oracle.delete_row(bogus),
            Err(OracleError::StaleRow(_))
        ));
        assert!(matches!(oracle.view(bogus), Err(OracleError::StaleRow(_))));
    }

    #[test]
    fn test_unknown_field() {
        let mut oracle = OracleCore::new();
        let row = oracle.create_row();
        let bogus = FieldHandle::new(12);
        assert!(matches!(
            oracle.exists(bogus, row),
            Err(OracleError::UnknownField(_))
        ));
    }

    #[test]
    fn test_copy_value() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let src = oracle.create_row();
        let dst = oracle.create_row();

        oracle.copy_value(f, src, dst).unwrap();
        assert!(!oracle.exists(f, dst).unwrap());

        oracle.set(f, src, &9.0f64).unwrap();
        oracle.copy_value(f, src, dst).unwrap();
        assert_eq!(oracle.get::<f64>(f, dst).unwrap(), Some(9.0));
    }

    #[test]
    fn test_copy_absent_leaves_destination_untouched() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let src = oracle.create_row();
        let dst = oracle.create_row();
        oracle.set(f, dst, &4.0f64).unwrap();
        oracle.copy_value(f, src, dst).unwrap();
        assert_eq!(oracle.get::<f64>(f, dst).unwrap(), Some(4.0));
    }

    #[test]
    fn test_remove_at_row() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let row = oracle.create_row();
        oracle.set(f, row, &1.0f64).unwrap();
        assert!(oracle.remove_at_row(f, row).unwrap());
        assert!(!oracle.remove_at_row(f, row).unwrap());
        assert!(!oracle.exists(f, row).unwrap());
    }

    #[test]
    fn test_lookup_returns_lowest_row() {
        let mut oracle = OracleCore::new();
        let id = oracle.register_field("id", TypeToken::of::<u64>()).unwrap();
        let rows: Vec<_> = (0..5).map(|_| oracle.create_row()).collect();
        oracle.set(id, rows[3], &7u64).unwrap();
        oracle.set(id, rows[1], &7u64).unwrap();
        oracle.set(id, rows[2], &8u64).unwrap();

        assert_eq!(oracle.lookup(id, &7u64).unwrap(), Some(rows[1]));
        assert_eq!(oracle.lookup(id, &8u64).unwrap(), Some(rows[2]));
        assert_eq!(oracle.lookup(id, &9u64).unwrap(), None);
    }

    #[test]
    fn test_frame_membership() {
        let mut oracle = OracleCore::new();
        let track = oracle.create_row();
        let other = oracle.create_row();
        let f1 = oracle.create_row();
        let f2 = oracle.create_row();

        oracle.add_frame(track, f1).unwrap();
        oracle.add_frame(track, f2).unwrap();
        oracle.add_frame(track, f1).unwrap();
        assert_eq!(oracle.frames(track).unwrap(), &[f1, f2]);
        assert_eq!(oracle.owning_track(f2).unwrap(), Some(track));

        assert!(matches!(
            oracle.add_frame(other, f1),
            Err(OracleError::FrameOwnership { .. })
        ));
        assert!(matches!(
            oracle.add_frame(track, track),
            Err(OracleError::SelfFrame(_))
        ));

        assert_eq!(oracle.detach_frame(f1).unwrap(), Some(track));
        oracle.add_frame(other, f1).unwrap();
        assert_eq!(oracle.frames(track).unwrap(), &[f2]);
        assert_eq!(oracle.frames(other).unwrap(), &[f1]);
    }

    #[test]
    fn test_frames_do_not_nest() {
        let mut oracle = OracleCore::new();
        let a = oracle.create_row();
        let b = oracle.create_row();
        let c = oracle.create_row();
        oracle.add_frame(a, b).unwrap();

        let err = oracle.add_frame(b, a).unwrap_err();
        assert!(matches!(
            err,
            OracleError::NestedFrame { track, frame } if track == b && frame == a
        ));
        assert_eq!(err.category(), ErrorCategory::Membership);
        assert!(matches!(
            oracle.add_frame(b, c),
            Err(OracleError::NestedFrame { .. })
        ));
        assert!(matches!(
            oracle.add_frame(c, a),
            Err(OracleError::NestedFrame { .. })
        ));
        assert!(oracle.frames(b).unwrap().is_empty());
        assert_eq!(oracle.owning_track(a).unwrap(), None);

        // Once detached, a frame may become a track
        oracle.detach_frame(b).unwrap();
        oracle.add_frame(b, c).unwrap();
        assert_eq!(oracle.frames(b).unwrap(), &[c]);
        assert!(oracle.frames(a).unwrap().is_empty());
    }

    #[test]
    fn test_track_with_frames_cannot_be_deleted() {
        let mut oracle = OracleCore::new();
        let track = oracle.create_row();
        let frame = oracle.create_row();
        oracle.add_frame(track, frame).unwrap();

        assert!(matches!(
            oracle.delete_row(track),
            Err(OracleError::OwnedFramesRemain { count: 1, .. })
        ));

        oracle.delete_row(frame).unwrap();
        assert!(oracle.frames(track).unwrap().is_empty());
        oracle.delete_row(track).unwrap();
    }

    #[test]
    fn test_views() {
        let mut oracle = OracleCore::new();
        let field = TrackField::<f64>::register(&mut oracle, "x").unwrap();
        let row = oracle.create_row();

        oracle.view_mut(row).unwrap().set(&field, 1.5).unwrap();
        let view = oracle.view(row).unwrap();
        assert_eq!(view.get(&field).unwrap(), Some(1.5));
        assert!(view.exists(field.handle()).unwrap());
        assert_eq!(view.fields().unwrap(), vec![field.handle()]);
    }

    #[test]
    fn test_stats() {
        let mut oracle = OracleCore::new();
        let f = f64_field(&mut oracle, "x");
        let track = oracle.create_row();
        let frame = oracle.create_row();
        let gone = oracle.create_row();
        oracle.add_frame(track, frame).unwrap();
        oracle.set(f, frame, &1.0f64).unwrap();
        oracle.delete_row(gone).unwrap();

        let stats = oracle.stats();
        assert_eq!(stats.live_rows, 2);
        assert_eq!(stats.deleted_rows, 1);
        assert_eq!(stats.fields, 1);
        assert_eq!(stats.slots, 1);
        assert_eq!(stats.tracks_with_frames, 1);
    }
}
