//! # sigcatalog Prelude
//!
//! The types most callers need, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all sigcatalog operations
pub use crate::Error;

/// The result type used throughout sigcatalog
pub use crate::Result;

// ================================================================================================
// Type Identifiers
// ================================================================================================

pub use crate::typesystem::{SpecialType, TypeId, WellKnownType};

// ================================================================================================
// Signatures
// ================================================================================================

pub use crate::signatures::{
    decode, decode_with, encode, DecoderConfig, MemberFlags, MemberKind, MemberRecord,
    MemberShape, SignatureNode,
};

// ================================================================================================
// Catalogs
// ================================================================================================

pub use crate::catalog::{
    special_members, well_known_members, Catalog, CatalogId, NamedMember, SpecialMember,
    WellKnownMember,
};
