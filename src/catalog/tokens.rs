//! Shorthand constants the catalog tables are authored with.

use crate::{
    signatures::{MemberFlags, SIGNATURE_TAG},
    typesystem::{SpecialType, SELF_TYPE_HANDLE},
};

// Member kinds and modifiers
pub(crate) const FIELD: u16 = MemberFlags::FIELD.bits();
pub(crate) const METHOD: u16 = MemberFlags::METHOD.bits();
pub(crate) const CTOR: u16 = MemberFlags::CONSTRUCTOR.bits();
pub(crate) const PROPERTY: u16 = MemberFlags::PROPERTY.bits();
pub(crate) const GETTER: u16 = MemberFlags::PROPERTY_GET.bits();
pub(crate) const SETTER: u16 = MemberFlags::PROPERTY_SET.bits();
pub(crate) const STATIC: u16 = MemberFlags::STATIC.bits();
pub(crate) const VIRTUAL: u16 = MemberFlags::VIRTUAL.bits();

// Signature tags
pub(crate) const T: u16 = SIGNATURE_TAG::TYPE_HANDLE;
pub(crate) const SZ: u16 = SIGNATURE_TAG::SZ_ARRAY;
pub(crate) const PTR: u16 = SIGNATURE_TAG::POINTER;
pub(crate) const BYREF: u16 = SIGNATURE_TAG::BY_REFERENCE;
pub(crate) const VAR: u16 = SIGNATURE_TAG::GENERIC_TYPE_PARAMETER;
pub(crate) const MVAR: u16 = SIGNATURE_TAG::GENERIC_METHOD_PARAMETER;
pub(crate) const GINST: u16 = SIGNATURE_TAG::GENERIC_TYPE_INSTANCE;

// Raw handles used throughout both tables
pub(crate) const SELF: u16 = SELF_TYPE_HANDLE;
pub(crate) const OBJECT: u16 = SpecialType::Object.handle();
pub(crate) const VOID: u16 = SpecialType::Void.handle();
pub(crate) const BOOL: u16 = SpecialType::Boolean.handle();
pub(crate) const CHAR: u16 = SpecialType::Char.handle();
pub(crate) const INT32: u16 = SpecialType::Int32.handle();
pub(crate) const DOUBLE: u16 = SpecialType::Double.handle();
pub(crate) const DECIMAL: u16 = SpecialType::Decimal.handle();
pub(crate) const STRING: u16 = SpecialType::String.handle();
pub(crate) const INTPTR: u16 = SpecialType::IntPtr.handle();
