//! Static member catalogs keyed by closed enumerations of member ids.
//!
//! Each catalog is a flat token table plus a parallel table of member names, decoded once on
//! first use into a [`Catalog`] that is shared by every caller for the rest of the process.
//! Two catalogs ship with the crate:
//!
//! - [`special_members`] - Members declared on special types (core primitives and collections)
//! - [`well_known_members`] - Members declared on the wider set of framework types
//!
//! Both are built with [`DecoderConfig::strict`]. A table that fails to decode is a defect in
//! the crate itself: it is logged and then aborts with a panic rather than surfacing a
//! `Result` to every lookup.
//!
//! # Examples
//!
//! ```rust
//! use sigcatalog::prelude::*;
//!
//! let concat = special_members().member(SpecialMember::StringConcatStringString);
//! assert_eq!(concat.name, "Concat");
//! assert!(concat.record.is_static());
//! assert_eq!(concat.record.parameter_count(), 2);
//!
//! // Names are not unique: overloads share them
//! assert!(special_members().find("op_Explicit").count() > 1);
//! ```

mod special;
mod tokens;
mod wellknown;

pub use special::*;
pub use wellknown::*;

use std::{fmt, marker::PhantomData};

use log::{debug, error};
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    signatures::{decode_with, DecoderConfig, MemberRecord},
    Error, Result,
};

/// A closed enumeration of the member ids of one catalog
///
/// Ids are dense: the member with id `i` is the `i`-th record in the catalog's token table.
pub trait CatalogId: Copy + fmt::Debug + EnumCount + IntoEnumIterator + 'static {
    /// Position of this id in its catalog
    fn index(self) -> usize;
}

/// A decoded catalog: one [`MemberRecord`] and one name per id of `I`
pub struct Catalog<I: CatalogId> {
    records: Vec<MemberRecord>,
    names: Vec<String>,
    _id: PhantomData<I>,
}

/// A catalog entry together with its id and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedMember<'a, I> {
    /// The member id
    pub id: I,
    /// The member name, as written in metadata (`.ctor`, `get_Length`, `op_Explicit`, ...)
    pub name: &'a str,
    /// The decoded signature
    pub record: &'a MemberRecord,
}

impl<I: CatalogId> Catalog<I> {
    /// Decode a catalog from its token table and name table
    ///
    /// ## Arguments
    /// * 'tokens' - The catalog's flat token stream
    /// * 'names'  - One name per id, in id order
    ///
    /// # Errors
    /// Returns [`crate::Error::CountMismatch`] if `names` does not hold exactly one entry per id,
    /// or the decoder error for the first record that fails to decode
    pub fn build(tokens: &[u16], names: &[&str]) -> Result<Self> {
        if names.len() != I::COUNT {
            return Err(Error::CountMismatch {
                expected: I::COUNT,
                actual: names.len(),
            });
        }

        let records = decode_with(tokens, I::COUNT, &DecoderConfig::strict())?;
        debug!(
            "decoded {} catalog: {} members from {} tokens",
            std::any::type_name::<I>(),
            records.len(),
            tokens.len()
        );

        Ok(Catalog {
            records,
            names: names.iter().map(|name| (*name).to_string()).collect(),
            _id: PhantomData,
        })
    }

    /// The signature of member `id`
    #[must_use]
    pub fn get(&self, id: I) -> &MemberRecord {
        &self.records[id.index()]
    }

    /// The name of member `id`
    #[must_use]
    pub fn name(&self, id: I) -> &str {
        &self.names[id.index()]
    }

    /// Member `id` with its name and signature
    #[must_use]
    pub fn member(&self, id: I) -> NamedMember<'_, I> {
        NamedMember {
            id,
            name: self.name(id),
            record: self.get(id),
        }
    }

    /// The signature at raw position `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`, like slice indexing
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> &MemberRecord {
        &self.records[index]
    }

    /// Number of members in the catalog, always `I::COUNT`
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All signatures, in id order
    #[must_use]
    pub fn records(&self) -> &[MemberRecord] {
        &self.records
    }

    /// Every member in id order
    pub fn iter(&self) -> impl Iterator<Item = NamedMember<'_, I>> + '_ {
        I::iter()
            .zip(self.records.iter().zip(&self.names))
            .map(|(id, (record, name))| NamedMember {
                id,
                name: name.as_str(),
                record,
            })
    }

    /// Every member called `name`; overloads yield more than one
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NamedMember<'a, I>> + 'a {
        self.iter().filter(move |member| member.name == name)
    }
}

impl<I: CatalogId> fmt::Debug for Catalog<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("id", &std::any::type_name::<I>())
            .field("len", &self.records.len())
            .finish()
    }
}

impl<I: CatalogId> fmt::Display for NamedMember<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record.display(self.name))
    }
}

/// Build a shipped catalog, treating any failure as fatal
fn build_shipped<I: CatalogId>(label: &str, tokens: &[u16], names: &[&str]) -> Catalog<I> {
    match Catalog::build(tokens, names) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{label} catalog is corrupt: {e}");
            panic!("{label} catalog is corrupt: {e}");
        }
    }
}
