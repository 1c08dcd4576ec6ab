use strum::{EnumCount, EnumIter, FromRepr};

use crate::typesystem::WELL_KNOWN_TYPE_BASE;

/// Framework types recognised structurally by the compiler (attributes, tasks, reflection, ...).
///
/// The discriminant is an index relative to [`WELL_KNOWN_TYPE_BASE`]; the raw handle stored in a
/// token table is `WELL_KNOWN_TYPE_BASE + index`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter, FromRepr,
)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum WellKnownType {
    Math = 0,
    Type = 1,
    Attribute = 2,
    Exception = 3,
    Activator = 4,
    Interlocked = 5,
    Monitor = 6,
    Task = 7,
    TaskT = 8,
    ListT = 9,
    DictionaryKV = 10,
    KeyValuePairKV = 11,
    IDictionaryKV = 12,
    EqualityComparerT = 13,
    FuncT2 = 14,
    ActionT = 15,
    CompilerGeneratedAttribute = 16,
    RuntimeHelpers = 17,
    AsyncTaskMethodBuilderT = 18,
    IAsyncStateMachine = 19,
    DebuggerHiddenAttribute = 20,
    ParamArrayAttribute = 21,
    MethodBase = 22,
    MethodInfo = 23,
    FieldInfo = 24,
    Enumerable = 25,
    Marshal = 26,
    SpanT = 27,
    ReadOnlySpanT = 28,
    Unsafe = 29,
}

impl WellKnownType {
    /// Raw handle of this type as it appears in a token table.
    #[must_use]
    pub const fn handle(self) -> u16 {
        WELL_KNOWN_TYPE_BASE + self as u16
    }

    /// Fully qualified metadata name, including the generic arity suffix.
    #[must_use]
    pub fn metadata_name(self) -> &'static str {
        match self {
            WellKnownType::Math => "System.Math",
            WellKnownType::Type => "System.Type",
            WellKnownType::Attribute => "System.Attribute",
            WellKnownType::Exception => "System.Exception",
            WellKnownType::Activator => "System.Activator",
            WellKnownType::Interlocked => "System.Threading.Interlocked",
            WellKnownType::Monitor => "System.Threading.Monitor",
            WellKnownType::Task => "System.Threading.Tasks.Task",
            WellKnownType::TaskT => "System.Threading.Tasks.Task`1",
            WellKnownType::ListT => "System.Collections.Generic.List`1",
            WellKnownType::DictionaryKV => "System.Collections.Generic.Dictionary`2",
            WellKnownType::KeyValuePairKV => "System.Collections.Generic.KeyValuePair`2",
            WellKnownType::IDictionaryKV => "System.Collections.Generic.IDictionary`2",
            WellKnownType::EqualityComparerT => "System.Collections.Generic.EqualityComparer`1",
            WellKnownType::FuncT2 => "System.Func`2",
            WellKnownType::ActionT => "System.Action`1",
            WellKnownType::CompilerGeneratedAttribute => {
                "System.Runtime.CompilerServices.CompilerGeneratedAttribute"
            }
            WellKnownType::RuntimeHelpers => "System.Runtime.CompilerServices.RuntimeHelpers",
            WellKnownType::AsyncTaskMethodBuilderT => {
                "System.Runtime.CompilerServices.AsyncTaskMethodBuilder`1"
            }
            WellKnownType::IAsyncStateMachine => {
                "System.Runtime.CompilerServices.IAsyncStateMachine"
            }
            WellKnownType::DebuggerHiddenAttribute => "System.Diagnostics.DebuggerHiddenAttribute",
            WellKnownType::ParamArrayAttribute => "System.ParamArrayAttribute",
            WellKnownType::MethodBase => "System.Reflection.MethodBase",
            WellKnownType::MethodInfo => "System.Reflection.MethodInfo",
            WellKnownType::FieldInfo => "System.Reflection.FieldInfo",
            WellKnownType::Enumerable => "System.Linq.Enumerable",
            WellKnownType::Marshal => "System.Runtime.InteropServices.Marshal",
            WellKnownType::SpanT => "System.Span`1",
            WellKnownType::ReadOnlySpanT => "System.ReadOnlySpan`1",
            WellKnownType::Unsafe => "System.Runtime.CompilerServices.Unsafe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_handles_start_at_partition_base() {
        assert_eq!(WellKnownType::Math.handle(), WELL_KNOWN_TYPE_BASE);
        for (i, ty) in WellKnownType::iter().enumerate() {
            assert_eq!(usize::from(ty as u16), i);
            assert_eq!(WellKnownType::from_repr(ty as u16), Some(ty));
        }
    }

    #[test]
    fn test_metadata_names_are_unique() {
        let mut names: Vec<_> = WellKnownType::iter().map(WellKnownType::metadata_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WellKnownType::COUNT);
    }
}
