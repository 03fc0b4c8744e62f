//! Type tokens and the byte codec behind every value slot
//!
//! The oracle stores each value as an opaque byte string. The column that owns
//! the slot remembers the [`TypeToken`] it was registered with, and typed
//! accessors compare that token against their own `T` before decoding.

use crate::core::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a field's declared Rust type
#[derive(Debug, Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Token for `T`
    pub fn of<T: 'static>() -> Self {
        TypeToken {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Human-readable type name (diagnostics only; identity uses `TypeId`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Anything that can live in a value slot
///
/// Blanket-implemented for every serde round-trippable `'static` type, so
/// schema authors only need `#[derive(Serialize, Deserialize)]` on their
/// own structs.
pub trait FieldValue: Serialize + DeserializeOwned + 'static {}

impl<T> FieldValue for T where T: Serialize + DeserializeOwned + 'static {}

pub(crate) fn encode<T: FieldValue>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

pub(crate) fn decode<T: FieldValue>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}
