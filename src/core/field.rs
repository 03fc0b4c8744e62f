//! Typed field accessors
//!
//! [`TrackField<T>`] wraps a [`FieldHandle`] and enforces `T` on every read
//! and write. [`FieldOps`] is the untyped side of the same accessor: it lets
//! generic code (copy a whole schema from one row to another, strip a
//! schema's values off a row, check completeness) work over a heterogeneous
//! list of fields without knowing any of their types.
//!
//! Access comes in two flavours:
//! - explicit rows: `field.get_at(&oracle, row)`, `field.at(row).get(&oracle)`
//! - cursor rows: `field.get(&oracle)` resolves the row through the bound
//!   [`Host`] at call time

use crate::core::error::{OracleError, Result};
use crate::core::handle::{FieldHandle, RowHandle};
use crate::core::host::Host;
use crate::core::oracle::OracleCore;
use crate::core::registry::FieldDescriptor;
use crate::core::value::{FieldValue, TypeToken};
use std::fmt;
use std::marker::PhantomData;

/// Type-agnostic operations shared by every field accessor
pub trait FieldOps: fmt::Debug {
    fn handle(&self) -> FieldHandle;

    fn name(&self) -> &str;

    fn type_token(&self) -> TypeToken;

    fn exists_at(&self, oracle: &OracleCore, row: RowHandle) -> Result<bool> {
        oracle.exists(self.handle(), row)
    }

    fn remove_at_row(&self, oracle: &mut OracleCore, row: RowHandle) -> Result<bool> {
        oracle.remove_at_row(self.handle(), row)
    }

    fn copy_value(&self, oracle: &mut OracleCore, src: RowHandle, dst: RowHandle) -> Result<()> {
        oracle.copy_value(self.handle(), src, dst)
    }

    /// An accessor for the same field with no host bound
    fn clone_unbound(&self) -> Box<dyn FieldOps>;
}

/// Read/write accessor for one field of type `T`
pub struct TrackField<T> {
    handle: FieldHandle,
    name: String,
    host: Option<Host>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FieldValue> TrackField<T> {
    /// Register `name` as a field of type `T` (or fetch the existing handle)
    ///
    /// # Examples
    ///
    /// ```
    /// use track_oracle::{OracleCore, TrackField};
    ///
    /// let mut oracle = OracleCore::new();
    /// let speed = TrackField::<f64>::register(&mut oracle, "speed")?;
    /// let again = TrackField::<f64>::register(&mut oracle, "speed")?;
    /// assert_eq!(speed.handle(), again.handle());
    ///
    /// let row = oracle.create_row();
    /// speed.set_at(&mut oracle, row, 12.5)?;
    /// assert_eq!(again.get_at(&oracle, row)?, Some(12.5));
    ///
    /// assert!(TrackField::<String>::register(&mut oracle, "speed").is_err());
    /// # Ok::<(), track_oracle::OracleError>(())
    /// ```
    pub fn register(oracle: &mut OracleCore, name: &str) -> Result<Self> {
        Self::register_described(oracle, FieldDescriptor::of::<T>(name))
    }

    /// Register with a description and role; the descriptor's type is forced to `T`
    pub fn register_described(oracle: &mut OracleCore, descriptor: FieldDescriptor) -> Result<Self> {
        let descriptor = FieldDescriptor {
            type_token: TypeToken::of::<T>(),
            ..descriptor
        };
        let name = descriptor.name.clone();
        let handle = oracle.register(descriptor)?;
        Ok(Self::unbound(handle, name))
    }

    /// Accessor for an already-registered field, without registering anything
    ///
    /// `Ok(None)` if `name` is unknown; [`OracleError::TypeConflict`] if it
    /// was registered with a type other than `T`.
    pub fn existing(oracle: &OracleCore, name: &str) -> Result<Option<Self>> {
        let Some(handle) = oracle.lookup_field(name) else {
            return Ok(None);
        };
        let descriptor = oracle.describe_field(handle)?;
        if !descriptor.type_token.is::<T>() {
            return Err(OracleError::TypeConflict {
                name: name.to_string(),
                existing: descriptor.type_token.name(),
                requested: std::any::type_name::<T>(),
            });
        }
        Ok(Some(Self::unbound(handle, name.to_string())))
    }

    fn unbound(handle: FieldHandle, name: String) -> Self {
        TrackField {
            handle,
            name,
            host: None,
            _marker: PhantomData,
        }
    }

    /// Bind to `host`; subsequent cursor accesses follow its cursor
    pub fn bind(&mut self, host: &Host) {
        self.host = Some(host.clone());
    }

    pub fn unbind(&mut self) {
        self.host = None;
    }

    /// A copy of this accessor bound to `host`
    pub fn rebound(&self, host: &Host) -> Self {
        let mut field = self.clone();
        field.bind(host);
        field
    }

    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    pub fn handle(&self) -> FieldHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn cursor_row(&self, oracle: &OracleCore) -> Result<RowHandle> {
        match &self.host {
            Some(host) => host.resolve(oracle),
            None => Err(OracleError::UnboundCursor),
        }
    }

    // ---- cursor access ---------------------------------------------------

    /// Value at the host's current row
    pub fn get(&self, oracle: &OracleCore) -> Result<Option<T>> {
        let row = self.cursor_row(oracle)?;
        oracle.get(self.handle, row)
    }

    /// Write `value` at the host's current row
    pub fn set(&self, oracle: &mut OracleCore, value: T) -> Result<()> {
        let row = self.cursor_row(oracle)?;
        oracle.set(self.handle, row, &value)
    }

    pub fn exists(&self, oracle: &OracleCore) -> Result<bool> {
        let row = self.cursor_row(oracle)?;
        oracle.exists(self.handle, row)
    }

    // ---- explicit-row access ---------------------------------------------

    pub fn get_at(&self, oracle: &OracleCore, row: RowHandle) -> Result<Option<T>> {
        oracle.get(self.handle, row)
    }

    pub fn set_at(&self, oracle: &mut OracleCore, row: RowHandle, value: T) -> Result<()> {
        oracle.set(self.handle, row, &value)
    }

    pub fn exists_at(&self, oracle: &OracleCore, row: RowHandle) -> Result<bool> {
        oracle.exists(self.handle, row)
    }

    /// Remove this field's value from `row`, ignoring any cursor
    pub fn remove_at_row(&self, oracle: &mut OracleCore, row: RowHandle) -> Result<bool> {
        oracle.remove_at_row(self.handle, row)
    }

    pub fn copy_value(&self, oracle: &mut OracleCore, src: RowHandle, dst: RowHandle) -> Result<()> {
        oracle.copy_value(self.handle, src, dst)
    }

    /// First row (lowest handle) holding `value`
    pub fn lookup(&self, oracle: &OracleCore, value: &T) -> Result<Option<RowHandle>>
    where
        T: PartialEq,
    {
        oracle.lookup(self.handle, value)
    }

    /// This field pinned to one row
    pub fn at(&self, row: RowHandle) -> BoundField<'_, T> {
        BoundField { field: self, row }
    }
}

/// Clones share the field handle but have no host bound
impl<T> Clone for TrackField<T> {
    fn clone(&self) -> Self {
        TrackField {
            handle: self.handle,
            name: self.name.clone(),
            host: None,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TrackField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackField")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .field("type", &std::any::type_name::<T>())
            .field("cursor", &self.host.as_ref().and_then(Host::get_cursor))
            .finish()
    }
}

impl<T: FieldValue> FieldOps for TrackField<T> {
    fn handle(&self) -> FieldHandle {
        self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_token(&self) -> TypeToken {
        TypeToken::of::<T>()
    }

    fn clone_unbound(&self) -> Box<dyn FieldOps> {
        Box::new(self.clone())
    }
}

/// A field pinned to an explicit row
#[derive(Debug)]
pub struct BoundField<'f, T> {
    field: &'f TrackField<T>,
    row: RowHandle,
}

impl<T: FieldValue> BoundField<'_, T> {
    pub fn row(&self) -> RowHandle {
        self.row
    }

    pub fn get(&self, oracle: &OracleCore) -> Result<Option<T>> {
        self.field.get_at(oracle, self.row)
    }

    pub fn set(&self, oracle: &mut OracleCore, value: T) -> Result<()> {
        self.field.set_at(oracle, self.row, value)
    }

    pub fn exists(&self, oracle: &OracleCore) -> Result<bool> {
        self.field.exists_at(oracle, self.row)
    }

    pub fn remove(&self, oracle: &mut OracleCore) -> Result<bool> {
        self.field.remove_at_row(oracle, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::FieldRole;

    #[test]
    fn test_unhosted_cursor_access_is_unbound() {
        let mut oracle = OracleCore::new();
        let field = TrackField::<u64>::register(&mut oracle, "id").unwrap();
        assert!(matches!(field.get(&oracle), Err(OracleError::UnboundCursor)));
        assert!(matches!(
            field.set(&mut oracle, 1),
            Err(OracleError::UnboundCursor)
        ));
    }

    #[test]
    fn test_cursor_follows_host() {
        let mut oracle = OracleCore::new();
        let host = Host::new();
        let mut field = TrackField::<u64>::register(&mut oracle, "id").unwrap();
        field.bind(&host);

        let a = oracle.create_row();
        let b = oracle.create_row();
        host.set_cursor(a);
        field.set(&mut oracle, 1).unwrap();
        host.set_cursor(b);
        assert_eq!(field.get(&oracle).unwrap(), None);
        assert!(!field.exists(&oracle).unwrap());
        field.set(&mut oracle, 2).unwrap();

        host.set_cursor(a);
        assert_eq!(field.get(&oracle).unwrap(), Some(1));
        host.set_cursor(b);
        assert_eq!(field.get(&oracle).unwrap(), Some(2));
    }

    #[test]
    fn test_clone_drops_host() {
        let mut oracle = OracleCore::new();
        let host = Host::new();
        let mut field = TrackField::<u64>::register(&mut oracle, "id").unwrap();
        field.bind(&host);

        let copy = field.clone();
        assert_eq!(copy.handle(), field.handle());
        assert!(copy.host().is_none());

        let rebound = field.rebound(&host);
        assert!(rebound.host().unwrap().same_as(&host));
    }

    #[test]
    fn test_existing() {
        let mut oracle = OracleCore::new();
        assert!(TrackField::<f64>::existing(&oracle, "lat").unwrap().is_none());

        let lat = TrackField::<f64>::register(&mut oracle, "lat").unwrap();
        let found = TrackField::<f64>::existing(&oracle, "lat").unwrap().unwrap();
        assert_eq!(found.handle(), lat.handle());

        assert!(matches!(
            TrackField::<String>::existing(&oracle, "lat"),
            Err(OracleError::TypeConflict { .. })
        ));
    }

    #[test]
    fn test_register_described_forces_type() {
        let mut oracle = OracleCore::new();
        let descriptor = FieldDescriptor::of::<String>("frame_number")
            .with_description("frame index in the source video")
            .with_role(FieldRole::WellKnown);
        let field = TrackField::<u64>::register_described(&mut oracle, descriptor).unwrap();

        let d = oracle.describe_field(field.handle()).unwrap();
        assert!(d.type_token.is::<u64>());
        assert_eq!(d.role, FieldRole::WellKnown);
    }

    #[test]
    fn test_bound_field() {
        let mut oracle = OracleCore::new();
        let field = TrackField::<String>::register(&mut oracle, "label").unwrap();
        let row = oracle.create_row();

        let bound = field.at(row);
        bound.set(&mut oracle, "person".to_string()).unwrap();
        assert_eq!(bound.get(&oracle).unwrap().as_deref(), Some("person"));
        assert!(bound.remove(&mut oracle).unwrap());
        assert!(!bound.exists(&oracle).unwrap());
    }

    #[test]
    fn test_untyped_ops_through_trait_object() {
        let mut oracle = OracleCore::new();
        let a = TrackField::<u64>::register(&mut oracle, "a").unwrap();
        let b = TrackField::<String>::register(&mut oracle, "b").unwrap();
        let fields: Vec<Box<dyn FieldOps>> = vec![a.clone_unbound(), b.clone_unbound()];

        let src = oracle.create_row();
        let dst = oracle.create_row();
        a.set_at(&mut oracle, src, 5).unwrap();
        b.set_at(&mut oracle, src, "x".to_string()).unwrap();

        for field in &fields {
            field.copy_value(&mut oracle, src, dst).unwrap();
        }
        assert_eq!(a.get_at(&oracle, dst).unwrap(), Some(5));
        assert_eq!(b.get_at(&oracle, dst).unwrap().as_deref(), Some("x"));

        for field in &fields {
            assert!(field.remove_at_row(&mut oracle, dst).unwrap());
            assert!(!field.exists_at(&oracle, dst).unwrap());
        }
        assert_eq!(fields[1].name(), "b");
        assert!(fields[0].type_token().is::<u64>());
    }

    #[test]
    fn test_lookup() {
        let mut oracle = OracleCore::new();
        let id = TrackField::<u64>::register(&mut oracle, "external_id").unwrap();
        let row = oracle.create_row();
        id.set_at(&mut oracle, row, 42).unwrap();
        assert_eq!(id.lookup(&oracle, &42).unwrap(), Some(row));
        assert_eq!(id.lookup(&oracle, &43).unwrap(), None);
    }
}
