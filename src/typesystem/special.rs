use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// Fundamental runtime types every compiler targeting the CLR must recognise.
///
/// The discriminant is the raw type handle used in the catalog token tables. `0` is reserved
/// for "no type" and never appears in catalog data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter, FromRepr,
    IntoStaticStr,
)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum SpecialType {
    Object = 1,
    Enum = 2,
    MulticastDelegate = 3,
    Delegate = 4,
    ValueType = 5,
    Void = 6,
    Boolean = 7,
    Char = 8,
    SByte = 9,
    Byte = 10,
    Int16 = 11,
    UInt16 = 12,
    Int32 = 13,
    UInt32 = 14,
    Int64 = 15,
    UInt64 = 16,
    Decimal = 17,
    Single = 18,
    Double = 19,
    String = 20,
    IntPtr = 21,
    UIntPtr = 22,
    Array = 23,
    IEnumerable = 24,
    IEnumerableT = 25,
    IListT = 26,
    ICollectionT = 27,
    IEnumerator = 28,
    IEnumeratorT = 29,
    IReadOnlyListT = 30,
    IReadOnlyCollectionT = 31,
    NullableT = 32,
    DateTime = 33,
    IDisposable = 34,
    TypedReference = 35,
    RuntimeTypeHandle = 36,
    RuntimeFieldHandle = 37,
    RuntimeMethodHandle = 38,
    IAsyncResult = 39,
    AsyncCallback = 40,
}

impl SpecialType {
    /// Raw handle of this type as it appears in a token table.
    #[must_use]
    pub const fn handle(self) -> u16 {
        self as u16
    }

    /// Fully qualified metadata name, including the generic arity suffix.
    #[must_use]
    pub fn metadata_name(self) -> &'static str {
        match self {
            SpecialType::Object => "System.Object",
            SpecialType::Enum => "System.Enum",
            SpecialType::MulticastDelegate => "System.MulticastDelegate",
            SpecialType::Delegate => "System.Delegate",
            SpecialType::ValueType => "System.ValueType",
            SpecialType::Void => "System.Void",
            SpecialType::Boolean => "System.Boolean",
            SpecialType::Char => "System.Char",
            SpecialType::SByte => "System.SByte",
            SpecialType::Byte => "System.Byte",
            SpecialType::Int16 => "System.Int16",
            SpecialType::UInt16 => "System.UInt16",
            SpecialType::Int32 => "System.Int32",
            SpecialType::UInt32 => "System.UInt32",
            SpecialType::Int64 => "System.Int64",
            SpecialType::UInt64 => "System.UInt64",
            SpecialType::Decimal => "System.Decimal",
            SpecialType::Single => "System.Single",
            SpecialType::Double => "System.Double",
            SpecialType::String => "System.String",
            SpecialType::IntPtr => "System.IntPtr",
            SpecialType::UIntPtr => "System.UIntPtr",
            SpecialType::Array => "System.Array",
            SpecialType::IEnumerable => "System.Collections.IEnumerable",
            SpecialType::IEnumerableT => "System.Collections.Generic.IEnumerable`1",
            SpecialType::IListT => "System.Collections.Generic.IList`1",
            SpecialType::ICollectionT => "System.Collections.Generic.ICollection`1",
            SpecialType::IEnumerator => "System.Collections.IEnumerator",
            SpecialType::IEnumeratorT => "System.Collections.Generic.IEnumerator`1",
            SpecialType::IReadOnlyListT => "System.Collections.Generic.IReadOnlyList`1",
            SpecialType::IReadOnlyCollectionT => {
                "System.Collections.Generic.IReadOnlyCollection`1"
            }
            SpecialType::NullableT => "System.Nullable`1",
            SpecialType::DateTime => "System.DateTime",
            SpecialType::IDisposable => "System.IDisposable",
            SpecialType::TypedReference => "System.TypedReference",
            SpecialType::RuntimeTypeHandle => "System.RuntimeTypeHandle",
            SpecialType::RuntimeFieldHandle => "System.RuntimeFieldHandle",
            SpecialType::RuntimeMethodHandle => "System.RuntimeMethodHandle",
            SpecialType::IAsyncResult => "System.IAsyncResult",
            SpecialType::AsyncCallback => "System.AsyncCallback",
        }
    }

    /// C# keyword alias, for the types that have one.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            SpecialType::Object => "object",
            SpecialType::Void => "void",
            SpecialType::Boolean => "bool",
            SpecialType::Char => "char",
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Int16 => "short",
            SpecialType::UInt16 => "ushort",
            SpecialType::Int32 => "int",
            SpecialType::UInt32 => "uint",
            SpecialType::Int64 => "long",
            SpecialType::UInt64 => "ulong",
            SpecialType::Decimal => "decimal",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::String => "string",
            SpecialType::IntPtr => "nint",
            SpecialType::UIntPtr => "nuint",
            _ => return None,
        })
    }
}
