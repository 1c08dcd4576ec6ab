//! Members declared on special types.

use std::sync::OnceLock;

use strum::{EnumCount, EnumIter, FromRepr};

use super::{build_shipped, tokens::*, Catalog, CatalogId};
use crate::{
    signatures::MemberRecord,
    typesystem::{SpecialType, WellKnownType},
};

const ARRAY: u16 = SpecialType::Array.handle();
const DELEGATE: u16 = SpecialType::Delegate.handle();
const NULLABLE_T: u16 = SpecialType::NullableT.handle();
const IENUMERABLE_T: u16 = SpecialType::IEnumerableT.handle();
const IENUMERATOR: u16 = SpecialType::IEnumerator.handle();
const IENUMERATOR_T: u16 = SpecialType::IEnumeratorT.handle();
const ICOLLECTION_T: u16 = SpecialType::ICollectionT.handle();
const ILIST_T: u16 = SpecialType::IListT.handle();
const IREADONLYLIST_T: u16 = SpecialType::IReadOnlyListT.handle();
const IDISPOSABLE: u16 = SpecialType::IDisposable.handle();
const READONLYSPAN_T: u16 = WellKnownType::ReadOnlySpanT.handle();

/// Ids of the members in [`special_members`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, FromRepr)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum SpecialMember {
    StringConcatStringString,
    StringConcatStringStringString,
    StringConcatObjectArray,
    StringOpEquality,
    StringOpImplicitToReadOnlySpan,
    StringCtorCharArray,
    StringEmpty,
    StringLength,
    StringGetLength,
    StringGetChars,
    ObjectCtor,
    ObjectToString,
    ObjectEquals,
    ObjectGetHashCode,
    DelegateCombine,
    DelegateRemove,
    DecimalCtorInt32,
    DecimalOpExplicitToInt32,
    DecimalOpExplicitToDouble,
    DecimalOpExplicitFromDouble,
    DecimalZero,
    IntPtrOpExplicitToPointer,
    IntPtrOpExplicitFromPointer,
    IntPtrZero,
    NullableTCtor,
    NullableTGetValue,
    NullableTGetHasValue,
    NullableTGetValueOrDefault,
    IEnumerableTGetEnumerator,
    IEnumeratorTGetCurrent,
    IEnumeratorMoveNext,
    IDisposableDispose,
    ArrayGetLength,
    ArrayEmpty,
    ICollectionTCopyTo,
    IListTItem,
    IListTSetItem,
    IReadOnlyListTGetItem,
}

impl SpecialMember {
    /// The decoded signature of this member
    #[must_use]
    pub fn get_descriptor(self) -> &'static MemberRecord {
        special_members().get(self)
    }

    /// The metadata name of this member
    #[must_use]
    pub fn name(self) -> &'static str {
        SPECIAL_MEMBER_NAMES[self as usize]
    }
}

impl CatalogId for SpecialMember {
    fn index(self) -> usize {
        self as usize
    }
}

/// Member names of [`special_members`], indexed by [`SpecialMember`]
pub static SPECIAL_MEMBER_NAMES: [&str; SpecialMember::COUNT] = [
    "Concat",
    "Concat",
    "Concat",
    "op_Equality",
    "op_Implicit",
    ".ctor",
    "Empty",
    "Length",
    "get_Length",
    "get_Chars",
    ".ctor",
    "ToString",
    "Equals",
    "GetHashCode",
    "Combine",
    "Remove",
    ".ctor",
    "op_Explicit",
    "op_Explicit",
    "op_Explicit",
    "Zero",
    "op_Explicit",
    "op_Explicit",
    "Zero",
    ".ctor",
    "get_Value",
    "get_HasValue",
    "GetValueOrDefault",
    "GetEnumerator",
    "get_Current",
    "MoveNext",
    "Dispose",
    "get_Length",
    "Empty",
    "CopyTo",
    "Item",
    "set_Item",
    "get_Item",
];

/// Token table of [`special_members`], one record per [`SpecialMember`]
#[rustfmt::skip]
pub static SPECIAL_MEMBER_TOKENS: &[u16] = &[
    // static string String::Concat(string, string)
    METHOD | STATIC, STRING, 0, 2,
        T, STRING,
        T, STRING,
        T, STRING,

    // static string String::Concat(string, string, string)
    METHOD | STATIC, STRING, 0, 3,
        T, STRING,
        T, STRING,
        T, STRING,
        T, STRING,

    // static string String::Concat(object[])
    METHOD | STATIC, STRING, 0, 1,
        T, STRING,
        SZ, T, OBJECT,

    // static bool String::op_Equality(string, string)
    METHOD | STATIC, STRING, 0, 2,
        T, BOOL,
        T, STRING,
        T, STRING,

    // static ReadOnlySpan<char> String::op_Implicit(string)
    METHOD | STATIC, STRING, 0, 1,
        GINST, T, READONLYSPAN_T, 1,
            T, CHAR,
        T, STRING,

    // String::.ctor(char[])
    CTOR, STRING, 0, 1,
        T, VOID,
        SZ, T, CHAR,

    // static string String::Empty
    FIELD | STATIC, STRING, 0,
        T, STRING,

    // int String::Length
    PROPERTY, STRING, 0, 0,
        T, INT32,

    // int String::get_Length()
    GETTER, STRING, 0, 0,
        T, INT32,

    // char String::get_Chars(int)
    GETTER, STRING, 0, 1,
        T, CHAR,
        T, INT32,

    // Object::.ctor()
    CTOR, OBJECT, 0, 0,
        T, VOID,

    // virtual string Object::ToString()
    METHOD | VIRTUAL, OBJECT, 0, 0,
        T, STRING,

    // virtual bool Object::Equals(object)
    METHOD | VIRTUAL, OBJECT, 0, 1,
        T, BOOL,
        T, OBJECT,

    // virtual int Object::GetHashCode()
    METHOD | VIRTUAL, OBJECT, 0, 0,
        T, INT32,

    // static Delegate Delegate::Combine(Delegate, Delegate)
    METHOD | STATIC, DELEGATE, 0, 2,
        T, DELEGATE,
        T, DELEGATE,
        T, DELEGATE,

    // static Delegate Delegate::Remove(Delegate, Delegate)
    METHOD | STATIC, DELEGATE, 0, 2,
        T, DELEGATE,
        T, DELEGATE,
        T, DELEGATE,

    // Decimal::.ctor(int)
    CTOR, DECIMAL, 0, 1,
        T, VOID,
        T, INT32,

    // static int Decimal::op_Explicit(decimal)
    METHOD | STATIC, DECIMAL, 0, 1,
        T, INT32,
        T, DECIMAL,

    // static double Decimal::op_Explicit(decimal)
    METHOD | STATIC, DECIMAL, 0, 1,
        T, DOUBLE,
        T, DECIMAL,

    // static decimal Decimal::op_Explicit(double)
    METHOD | STATIC, DECIMAL, 0, 1,
        T, DECIMAL,
        T, DOUBLE,

    // static decimal Decimal::Zero
    FIELD | STATIC, DECIMAL, 0,
        T, DECIMAL,

    // static void* IntPtr::op_Explicit(IntPtr)
    METHOD | STATIC, INTPTR, 0, 1,
        PTR, T, VOID,
        T, INTPTR,

    // static IntPtr IntPtr::op_Explicit(void*)
    METHOD | STATIC, INTPTR, 0, 1,
        T, INTPTR,
        PTR, T, VOID,

    // static IntPtr IntPtr::Zero
    FIELD | STATIC, INTPTR, 0,
        T, INTPTR,

    // Nullable<T>::.ctor(!0)
    CTOR, NULLABLE_T, 0, 1,
        T, VOID,
        VAR, 0,

    // !0 Nullable<T>::get_Value()
    GETTER, NULLABLE_T, 0, 0,
        VAR, 0,

    // bool Nullable<T>::get_HasValue()
    GETTER, NULLABLE_T, 0, 0,
        T, BOOL,

    // !0 Nullable<T>::GetValueOrDefault()
    METHOD, NULLABLE_T, 0, 0,
        VAR, 0,

    // virtual IEnumerator<!0> IEnumerable<T>::GetEnumerator()
    METHOD | VIRTUAL, IENUMERABLE_T, 0, 0,
        GINST, T, IENUMERATOR_T, 1,
            VAR, 0,

    // virtual !0 IEnumerator<T>::get_Current()
    GETTER | VIRTUAL, IENUMERATOR_T, 0, 0,
        VAR, 0,

    // virtual bool IEnumerator::MoveNext()
    METHOD | VIRTUAL, IENUMERATOR, 0, 0,
        T, BOOL,

    // virtual void IDisposable::Dispose()
    METHOD | VIRTUAL, IDISPOSABLE, 0, 0,
        T, VOID,

    // int Array::get_Length()
    GETTER, ARRAY, 0, 0,
        T, INT32,

    // static !!0[] Array::Empty<T>()
    METHOD | STATIC, ARRAY, 1, 0,
        SZ, MVAR, 0,

    // virtual void ICollection<T>::CopyTo(!0[], int)
    METHOD | VIRTUAL, ICOLLECTION_T, 0, 2,
        T, VOID,
        SZ, VAR, 0,
        T, INT32,

    // virtual !0 IList<T>::Item[int]
    PROPERTY | VIRTUAL, ILIST_T, 0, 1,
        VAR, 0,
        T, INT32,

    // virtual void IList<T>::set_Item(int, !0)
    SETTER | VIRTUAL, ILIST_T, 0, 2,
        T, VOID,
        T, INT32,
        VAR, 0,

    // virtual !0 IReadOnlyList<T>::get_Item(int)
    GETTER | VIRTUAL, IREADONLYLIST_T, 0, 1,
        VAR, 0,
        T, INT32,
];

static SPECIAL_MEMBERS: OnceLock<Catalog<SpecialMember>> = OnceLock::new();

/// The catalog of members declared on special types, decoded on first use
///
/// # Panics
/// Panics on first use if the shipped token table is corrupt
pub fn special_members() -> &'static Catalog<SpecialMember> {
    SPECIAL_MEMBERS.get_or_init(|| {
        build_shipped("special member", SPECIAL_MEMBER_TOKENS, &SPECIAL_MEMBER_NAMES)
    })
}
