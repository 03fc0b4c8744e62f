//! Field registry: stable name ↔ handle binding
//!
//! The first registration of a name fixes its type and descriptor. Later
//! registrations with the same type get the same handle back; a different
//! type is rejected with [`OracleError::TypeConflict`].

use crate::core::error::{OracleError, Result};
use crate::core::handle::FieldHandle;
use crate::core::value::TypeToken;
use std::collections::HashMap;
use tracing::debug;

/// Who declared a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldRole {
    /// Bookkeeping fields the library itself maintains
    System,
    /// Fields with an agreed meaning across formats (ids, timestamps, boxes)
    WellKnown,
    /// Anything a format or user declared for its own use
    #[default]
    AdHoc,
}

/// Name, type, and documentation for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_token: TypeToken,
    pub description: String,
    pub role: FieldRole,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_token: TypeToken) -> Self {
        FieldDescriptor {
            name: name.into(),
            type_token,
            description: String::new(),
            role: FieldRole::AdHoc,
        }
    }

    /// Descriptor for a field of type `T`
    pub fn of<T: 'static>(name: impl Into<String>) -> Self {
        Self::new(name, TypeToken::of::<T>())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_role(mut self, role: FieldRole) -> Self {
        self.role = role;
        self
    }
}

/// Registry of every field known to one oracle
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    descriptors: Vec<FieldDescriptor>,
    by_name: HashMap<String, FieldHandle>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field, reusing the existing handle when name and type agree
    ///
    /// Returns the handle and whether it was newly allocated.
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<(FieldHandle, bool)> {
        if let Some(&handle) = self.by_name.get(&descriptor.name) {
            let existing = &self.descriptors[handle.index()];
            if existing.type_token != descriptor.type_token {
                return Err(OracleError::TypeConflict {
                    name: descriptor.name,
                    existing: existing.type_token.name(),
                    requested: descriptor.type_token.name(),
                });
            }
            return Ok((handle, false));
        }

        let handle = FieldHandle::from_index(self.descriptors.len())
            .ok_or_else(|| OracleError::TooManyFields(descriptor.name.clone()))?;
        debug!(
            "Registered field '{}' as {} ({})",
            descriptor.name, handle, descriptor.type_token
        );
        self.by_name.insert(descriptor.name.clone(), handle);
        self.descriptors.push(descriptor);
        Ok((handle, true))
    }

    /// Handle for `name`, if registered
    pub fn lookup(&self, name: &str) -> Option<FieldHandle> {
        self.by_name.get(name).copied()
    }

    pub fn descriptor(&self, handle: FieldHandle) -> Result<&FieldDescriptor> {
        self.descriptors
            .get(handle.index())
            .ok_or(OracleError::UnknownField(handle))
    }

    pub fn contains(&self, handle: FieldHandle) -> bool {
        handle.index() < self.descriptors.len()
    }

    /// All registered handles with their descriptors, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (FieldHandle, &FieldDescriptor)> {
        (0u32..)
            .zip(&self.descriptors)
            .map(|(id, d)| (FieldHandle::new(id), d))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
