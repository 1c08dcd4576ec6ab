//! The type-identifier space shared by every catalog.
//!
//! A single 16-bit handle addresses three disjoint ranges:
//!
//! | Raw handle                       | Meaning                                   |
//! |----------------------------------|-------------------------------------------|
//! | `0x0000 ..  WELL_KNOWN_TYPE_BASE`| [`TypeId::Special`] - fundamental types   |
//! | `WELL_KNOWN_TYPE_BASE .. 0xFFFF` | [`TypeId::WellKnown`] - framework types   |
//! | `0xFFFF`                         | [`TypeId::GenericParamOfSelf`]            |
//!
//! The boundary is a fixed constant rather than something inferred from data, so the
//! encoder and the decoder cannot disagree on it. Both only ever go through
//! [`TypeId::from_raw`] and [`TypeId::to_raw`].
//!
//! # Examples
//!
//! ```rust
//! use sigcatalog::typesystem::{SpecialType, TypeId, WellKnownType, WELL_KNOWN_TYPE_BASE};
//!
//! assert_eq!(TypeId::from_raw(20), TypeId::Special(SpecialType::String.handle()));
//! assert_eq!(
//!     TypeId::from_raw(WELL_KNOWN_TYPE_BASE + 7),
//!     TypeId::from(WellKnownType::Task)
//! );
//! assert_eq!(TypeId::from(WellKnownType::Task).to_raw()?, WELL_KNOWN_TYPE_BASE + 7);
//! # Ok::<(), sigcatalog::Error>(())
//! ```

mod special;
mod wellknown;

use std::fmt;

pub use special::SpecialType;
pub use wellknown::WellKnownType;

use crate::{Error, Result};

/// First raw handle of the well-known partition.
pub const WELL_KNOWN_TYPE_BASE: u16 = 0x0200;

/// Raw handle reserved for [`TypeId::GenericParamOfSelf`].
pub const SELF_TYPE_HANDLE: u16 = 0xFFFF;

/// A reference to a type, tagged by the partition its raw handle falls into.
///
/// `Special(n)` holds the raw handle itself; `WellKnown(n)` holds the index relative to
/// [`WELL_KNOWN_TYPE_BASE`]. Neither is checked against the [`SpecialType`] /
/// [`WellKnownType`] enumerations: the codec only guarantees that the handle lies in the right
/// partition, resolving it is the binder's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeId {
    /// A fundamental runtime type
    Special(u16),
    /// A framework type, relative to [`WELL_KNOWN_TYPE_BASE`]
    WellKnown(u16),
    /// The declaring type's own generic definition; only valid inside a `Direct` node
    GenericParamOfSelf,
}

impl TypeId {
    /// Resolve a raw handle against the partition boundary. Every `u16` maps to exactly one id.
    #[must_use]
    pub const fn from_raw(raw: u16) -> TypeId {
        if raw == SELF_TYPE_HANDLE {
            TypeId::GenericParamOfSelf
        } else if raw >= WELL_KNOWN_TYPE_BASE {
            TypeId::WellKnown(raw - WELL_KNOWN_TYPE_BASE)
        } else {
            TypeId::Special(raw)
        }
    }

    /// Produce the raw handle for this id.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeIdOutOfRange`] if the value does not fit its partition, e.g.
    /// `Special(0x0300)` or a `WellKnown` index that would collide with [`SELF_TYPE_HANDLE`].
    pub fn to_raw(self) -> Result<u16> {
        match self {
            TypeId::Special(n) if n < WELL_KNOWN_TYPE_BASE => Ok(n),
            TypeId::WellKnown(n) if n < SELF_TYPE_HANDLE - WELL_KNOWN_TYPE_BASE => {
                Ok(WELL_KNOWN_TYPE_BASE + n)
            }
            TypeId::GenericParamOfSelf => Ok(SELF_TYPE_HANDLE),
            TypeId::Special(n) | TypeId::WellKnown(n) => Err(Error::TypeIdOutOfRange(n)),
        }
    }

    /// Returns `true` for ids in the special partition.
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, TypeId::Special(_))
    }

    /// Returns `true` for ids in the well-known partition.
    #[must_use]
    pub fn is_well_known(&self) -> bool {
        matches!(self, TypeId::WellKnown(_))
    }

    /// The [`SpecialType`] this id names, if it is one the enumeration knows.
    #[must_use]
    pub fn as_special(&self) -> Option<SpecialType> {
        match self {
            TypeId::Special(n) => SpecialType::from_repr(*n),
            _ => None,
        }
    }

    /// The [`WellKnownType`] this id names, if it is one the enumeration knows.
    #[must_use]
    pub fn as_well_known(&self) -> Option<WellKnownType> {
        match self {
            TypeId::WellKnown(n) => WellKnownType::from_repr(*n),
            _ => None,
        }
    }

    /// Fully qualified metadata name, or `None` for handles the enumerations do not cover.
    #[must_use]
    pub fn metadata_name(&self) -> Option<&'static str> {
        if let Some(special) = self.as_special() {
            return Some(special.metadata_name());
        }
        self.as_well_known().map(WellKnownType::metadata_name)
    }
}

impl From<SpecialType> for TypeId {
    fn from(value: SpecialType) -> Self {
        TypeId::Special(value.handle())
    }
}

impl From<WellKnownType> for TypeId {
    fn from(value: WellKnownType) -> Self {
        TypeId::WellKnown(value as u16)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = self.as_special().and_then(SpecialType::keyword) {
            return f.write_str(keyword);
        }
        if let Some(name) = self.metadata_name() {
            return f.write_str(name);
        }
        match self {
            TypeId::Special(n) => write!(f, "special#{n}"),
            TypeId::WellKnown(n) => write!(f, "wellknown#{n}"),
            TypeId::GenericParamOfSelf => f.write_str("<self>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_boundaries() {
        assert_eq!(TypeId::from_raw(0), TypeId::Special(0));
        assert_eq!(
            TypeId::from_raw(WELL_KNOWN_TYPE_BASE - 1),
            TypeId::Special(WELL_KNOWN_TYPE_BASE - 1)
        );
        assert_eq!(TypeId::from_raw(WELL_KNOWN_TYPE_BASE), TypeId::WellKnown(0));
        assert_eq!(
            TypeId::from_raw(SELF_TYPE_HANDLE - 1),
            TypeId::WellKnown(SELF_TYPE_HANDLE - 1 - WELL_KNOWN_TYPE_BASE)
        );
        assert_eq!(
            TypeId::from_raw(SELF_TYPE_HANDLE),
            TypeId::GenericParamOfSelf
        );
    }

    #[test]
    fn test_raw_is_inverse_of_from_raw() {
        for raw in [
            0,
            1,
            20,
            WELL_KNOWN_TYPE_BASE - 1,
            WELL_KNOWN_TYPE_BASE,
            0x1234,
            SELF_TYPE_HANDLE - 1,
            SELF_TYPE_HANDLE,
        ] {
            assert_eq!(TypeId::from_raw(raw).to_raw().unwrap(), raw);
        }
    }

    #[test]
    fn test_out_of_partition_ids() {
        assert_eq!(
            TypeId::Special(WELL_KNOWN_TYPE_BASE).to_raw(),
            Err(Error::TypeIdOutOfRange(WELL_KNOWN_TYPE_BASE))
        );
        let overflow = SELF_TYPE_HANDLE - WELL_KNOWN_TYPE_BASE;
        assert_eq!(
            TypeId::WellKnown(overflow).to_raw(),
            Err(Error::TypeIdOutOfRange(overflow))
        );
    }

    #[test]
    fn test_enum_conversions() {
        let string = TypeId::from(SpecialType::String);
        assert!(string.is_special());
        assert_eq!(string.as_special(), Some(SpecialType::String));
        assert_eq!(string.as_well_known(), None);

        let task = TypeId::from(WellKnownType::TaskT);
        assert!(task.is_well_known());
        assert_eq!(task.as_well_known(), Some(WellKnownType::TaskT));
        assert_eq!(
            task.metadata_name(),
            Some("System.Threading.Tasks.Task`1")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeId::from(SpecialType::Int32).to_string(), "int");
        assert_eq!(TypeId::from(SpecialType::Array).to_string(), "System.Array");
        assert_eq!(TypeId::from(WellKnownType::Math).to_string(), "System.Math");
        assert_eq!(TypeId::Special(0x1FF).to_string(), "special#511");
        assert_eq!(TypeId::WellKnown(0x800).to_string(), "wellknown#2048");
        assert_eq!(TypeId::GenericParamOfSelf.to_string(), "<self>");
    }
}
