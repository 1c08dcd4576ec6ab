//! Members declared on well-known framework types.

use std::sync::OnceLock;

use strum::{EnumCount, EnumIter, FromRepr};

use super::{build_shipped, tokens::*, Catalog, CatalogId};
use crate::{
    signatures::MemberRecord,
    typesystem::{SpecialType, WellKnownType},
};

const ARRAY: u16 = SpecialType::Array.handle();
const IENUMERABLE_T: u16 = SpecialType::IEnumerableT.handle();
const RUNTIME_TYPE_HANDLE: u16 = SpecialType::RuntimeTypeHandle.handle();
const RUNTIME_FIELD_HANDLE: u16 = SpecialType::RuntimeFieldHandle.handle();
const RUNTIME_METHOD_HANDLE: u16 = SpecialType::RuntimeMethodHandle.handle();

const MATH: u16 = WellKnownType::Math.handle();
const TYPE: u16 = WellKnownType::Type.handle();
const ATTRIBUTE: u16 = WellKnownType::Attribute.handle();
const EXCEPTION: u16 = WellKnownType::Exception.handle();
const ACTIVATOR: u16 = WellKnownType::Activator.handle();
const INTERLOCKED: u16 = WellKnownType::Interlocked.handle();
const MONITOR: u16 = WellKnownType::Monitor.handle();
const TASK: u16 = WellKnownType::Task.handle();
const TASK_T: u16 = WellKnownType::TaskT.handle();
const LIST_T: u16 = WellKnownType::ListT.handle();
const DICTIONARY_KV: u16 = WellKnownType::DictionaryKV.handle();
const KEY_VALUE_PAIR_KV: u16 = WellKnownType::KeyValuePairKV.handle();
const EQUALITY_COMPARER_T: u16 = WellKnownType::EqualityComparerT.handle();
const FUNC_T2: u16 = WellKnownType::FuncT2.handle();
const ACTION_T: u16 = WellKnownType::ActionT.handle();
const COMPILER_GENERATED: u16 = WellKnownType::CompilerGeneratedAttribute.handle();
const RUNTIME_HELPERS: u16 = WellKnownType::RuntimeHelpers.handle();
const ASYNC_BUILDER_T: u16 = WellKnownType::AsyncTaskMethodBuilderT.handle();
const IASYNC_STATE_MACHINE: u16 = WellKnownType::IAsyncStateMachine.handle();
const DEBUGGER_HIDDEN: u16 = WellKnownType::DebuggerHiddenAttribute.handle();
const PARAM_ARRAY: u16 = WellKnownType::ParamArrayAttribute.handle();
const METHOD_BASE: u16 = WellKnownType::MethodBase.handle();
const METHOD_INFO: u16 = WellKnownType::MethodInfo.handle();
const FIELD_INFO: u16 = WellKnownType::FieldInfo.handle();
const ENUMERABLE: u16 = WellKnownType::Enumerable.handle();
const MARSHAL: u16 = WellKnownType::Marshal.handle();
const SPAN_T: u16 = WellKnownType::SpanT.handle();
const READONLYSPAN_T: u16 = WellKnownType::ReadOnlySpanT.handle();
const UNSAFE: u16 = WellKnownType::Unsafe.handle();

/// Ids of the members in [`well_known_members`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, FromRepr)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum WellKnownMember {
    MathRoundDouble,
    MathRoundDecimal,
    MathMaxInt32,
    TypeGetTypeFromHandle,
    TypeOpEquality,
    TypeEmptyTypes,
    TypeMissing,
    AttributeCtor,
    ExceptionCtorString,
    ExceptionGetMessage,
    ActivatorCreateInstanceT,
    InterlockedExchangeT,
    InterlockedCompareExchangeT,
    InterlockedIncrementInt32,
    MonitorEnter,
    MonitorExit,
    TaskFromResult,
    TaskGetCompletedTask,
    TaskTGetResult,
    ListTCtor,
    ListTAdd,
    ListTToArray,
    DictionaryKVTryGetValue,
    DictionaryKVItem,
    DictionaryKVSetItem,
    KeyValuePairKVGetKey,
    EqualityComparerTGetDefault,
    EqualityComparerTEquals,
    FuncT2Invoke,
    ActionTInvoke,
    CompilerGeneratedAttributeCtor,
    DebuggerHiddenAttributeCtor,
    ParamArrayAttributeCtor,
    RuntimeHelpersInitializeArray,
    RuntimeHelpersGetOffsetToStringData,
    AsyncTaskMethodBuilderTCreate,
    AsyncTaskMethodBuilderTStart,
    AsyncTaskMethodBuilderTSetResult,
    AsyncTaskMethodBuilderTGetTask,
    IAsyncStateMachineMoveNext,
    MethodBaseGetMethodFromHandle,
    MethodInfoGetReturnType,
    FieldInfoGetFieldFromHandle,
    EnumerableSelect,
    EnumerableToDictionaryKeyValuePairs,
    MarshalAllocHGlobal,
    SpanTCtorPointer,
    ReadOnlySpanTGetItem,
    UnsafeAsPointer,
    UnsafeAs,
}

impl WellKnownMember {
    /// The decoded signature of this member
    #[must_use]
    pub fn get_descriptor(self) -> &'static MemberRecord {
        well_known_members().get(self)
    }

    /// The metadata name of this member
    #[must_use]
    pub fn name(self) -> &'static str {
        WELL_KNOWN_MEMBER_NAMES[self as usize]
    }
}

impl CatalogId for WellKnownMember {
    fn index(self) -> usize {
        self as usize
    }
}

/// Member names of [`well_known_members`], indexed by [`WellKnownMember`]
pub static WELL_KNOWN_MEMBER_NAMES: [&str; WellKnownMember::COUNT] = [
    "Round",
    "Round",
    "Max",
    "GetTypeFromHandle",
    "op_Equality",
    "EmptyTypes",
    "Missing",
    ".ctor",
    ".ctor",
    "get_Message",
    "CreateInstance",
    "Exchange",
    "CompareExchange",
    "Increment",
    "Enter",
    "Exit",
    "FromResult",
    "get_CompletedTask",
    "get_Result",
    ".ctor",
    "Add",
    "ToArray",
    "TryGetValue",
    "Item",
    "set_Item",
    "get_Key",
    "get_Default",
    "Equals",
    "Invoke",
    "Invoke",
    ".ctor",
    ".ctor",
    ".ctor",
    "InitializeArray",
    "get_OffsetToStringData",
    "Create",
    "Start",
    "SetResult",
    "get_Task",
    "MoveNext",
    "GetMethodFromHandle",
    "get_ReturnType",
    "GetFieldFromHandle",
    "Select",
    "ToDictionary",
    "AllocHGlobal",
    ".ctor",
    "get_Item",
    "AsPointer",
    "As",
];

/// Token table of [`well_known_members`], one record per [`WellKnownMember`]
#[rustfmt::skip]
pub static WELL_KNOWN_MEMBER_TOKENS: &[u16] = &[
    // static double Math::Round(double)
    METHOD | STATIC, MATH, 0, 1,
        T, DOUBLE,
        T, DOUBLE,

    // static decimal Math::Round(decimal)
    METHOD | STATIC, MATH, 0, 1,
        T, DECIMAL,
        T, DECIMAL,

    // static int Math::Max(int, int)
    METHOD | STATIC, MATH, 0, 2,
        T, INT32,
        T, INT32,
        T, INT32,

    // static Type Type::GetTypeFromHandle(RuntimeTypeHandle)
    METHOD | STATIC, TYPE, 0, 1,
        T, TYPE,
        T, RUNTIME_TYPE_HANDLE,

    // static bool Type::op_Equality(Type, Type)
    METHOD | STATIC, TYPE, 0, 2,
        T, BOOL,
        T, TYPE,
        T, TYPE,

    // static Type[] Type::EmptyTypes
    FIELD | STATIC, TYPE, 0,
        SZ, T, TYPE,

    // static object Type::Missing
    FIELD | STATIC, TYPE, 0,
        T, OBJECT,

    // Attribute::.ctor()
    CTOR, ATTRIBUTE, 0, 0,
        T, VOID,

    // Exception::.ctor(string)
    CTOR, EXCEPTION, 0, 1,
        T, VOID,
        T, STRING,

    // virtual string Exception::get_Message()
    GETTER | VIRTUAL, EXCEPTION, 0, 0,
        T, STRING,

    // static !!0 Activator::CreateInstance<T>()
    METHOD | STATIC, ACTIVATOR, 1, 0,
        MVAR, 0,

    // static !!0 Interlocked::Exchange<T>(ref !!0, !!0)
    METHOD | STATIC, INTERLOCKED, 1, 2,
        MVAR, 0,
        BYREF, MVAR, 0,
        MVAR, 0,

    // static !!0 Interlocked::CompareExchange<T>(ref !!0, !!0, !!0)
    METHOD | STATIC, INTERLOCKED, 1, 3,
        MVAR, 0,
        BYREF, MVAR, 0,
        MVAR, 0,
        MVAR, 0,

    // static int Interlocked::Increment(ref int)
    METHOD | STATIC, INTERLOCKED, 0, 1,
        T, INT32,
        BYREF, T, INT32,

    // static void Monitor::Enter(object, ref bool)
    METHOD | STATIC, MONITOR, 0, 2,
        T, VOID,
        T, OBJECT,
        BYREF, T, BOOL,

    // static void Monitor::Exit(object)
    METHOD | STATIC, MONITOR, 0, 1,
        T, VOID,
        T, OBJECT,

    // static Task<!!0> Task::FromResult<T>(!!0)
    METHOD | STATIC, TASK, 1, 1,
        GINST, T, TASK_T, 1,
            MVAR, 0,
        MVAR, 0,

    // static Task Task::get_CompletedTask()
    GETTER | STATIC, TASK, 0, 0,
        T, TASK,

    // !0 Task<T>::get_Result()
    GETTER, TASK_T, 0, 0,
        VAR, 0,

    // List<T>::.ctor()
    CTOR, LIST_T, 0, 0,
        T, VOID,

    // void List<T>::Add(!0)
    METHOD, LIST_T, 0, 1,
        T, VOID,
        VAR, 0,

    // !0[] List<T>::ToArray()
    METHOD, LIST_T, 0, 0,
        SZ, VAR, 0,

    // virtual bool Dictionary<K, V>::TryGetValue(!0, ref !1)
    METHOD | VIRTUAL, DICTIONARY_KV, 0, 2,
        T, BOOL,
        VAR, 0,
        BYREF, VAR, 1,

    // virtual !1 Dictionary<K, V>::Item[!0]
    PROPERTY | VIRTUAL, DICTIONARY_KV, 0, 1,
        VAR, 1,
        VAR, 0,

    // virtual void Dictionary<K, V>::set_Item(!0, !1)
    SETTER | VIRTUAL, DICTIONARY_KV, 0, 2,
        T, VOID,
        VAR, 0,
        VAR, 1,

    // !0 KeyValuePair<K, V>::get_Key()
    GETTER, KEY_VALUE_PAIR_KV, 0, 0,
        VAR, 0,

    // static EqualityComparer<T> EqualityComparer<T>::get_Default()
    GETTER | STATIC, EQUALITY_COMPARER_T, 0, 0,
        T, SELF,

    // virtual bool EqualityComparer<T>::Equals(!0, !0)
    METHOD | VIRTUAL, EQUALITY_COMPARER_T, 0, 2,
        T, BOOL,
        VAR, 0,
        VAR, 0,

    // virtual !1 Func<T, TResult>::Invoke(!0)
    METHOD | VIRTUAL, FUNC_T2, 0, 1,
        VAR, 1,
        VAR, 0,

    // virtual void Action<T>::Invoke(!0)
    METHOD | VIRTUAL, ACTION_T, 0, 1,
        T, VOID,
        VAR, 0,

    // CompilerGeneratedAttribute::.ctor()
    CTOR, COMPILER_GENERATED, 0, 0,
        T, VOID,

    // DebuggerHiddenAttribute::.ctor()
    CTOR, DEBUGGER_HIDDEN, 0, 0,
        T, VOID,

    // ParamArrayAttribute::.ctor()
    CTOR, PARAM_ARRAY, 0, 0,
        T, VOID,

    // static void RuntimeHelpers::InitializeArray(Array, RuntimeFieldHandle)
    METHOD | STATIC, RUNTIME_HELPERS, 0, 2,
        T, VOID,
        T, ARRAY,
        T, RUNTIME_FIELD_HANDLE,

    // static int RuntimeHelpers::get_OffsetToStringData()
    GETTER | STATIC, RUNTIME_HELPERS, 0, 0,
        T, INT32,

    // static AsyncTaskMethodBuilder<T> AsyncTaskMethodBuilder<T>::Create()
    METHOD | STATIC, ASYNC_BUILDER_T, 0, 0,
        T, SELF,

    // void AsyncTaskMethodBuilder<T>::Start<TStateMachine>(ref !!0)
    METHOD, ASYNC_BUILDER_T, 1, 1,
        T, VOID,
        BYREF, MVAR, 0,

    // void AsyncTaskMethodBuilder<T>::SetResult(!0)
    METHOD, ASYNC_BUILDER_T, 0, 1,
        T, VOID,
        VAR, 0,

    // Task<!0> AsyncTaskMethodBuilder<T>::get_Task()
    GETTER, ASYNC_BUILDER_T, 0, 0,
        GINST, T, TASK_T, 1,
            VAR, 0,

    // virtual void IAsyncStateMachine::MoveNext()
    METHOD | VIRTUAL, IASYNC_STATE_MACHINE, 0, 0,
        T, VOID,

    // static MethodBase MethodBase::GetMethodFromHandle(RuntimeMethodHandle)
    METHOD | STATIC, METHOD_BASE, 0, 1,
        T, METHOD_BASE,
        T, RUNTIME_METHOD_HANDLE,

    // virtual Type MethodInfo::get_ReturnType()
    GETTER | VIRTUAL, METHOD_INFO, 0, 0,
        T, TYPE,

    // static FieldInfo FieldInfo::GetFieldFromHandle(RuntimeFieldHandle)
    METHOD | STATIC, FIELD_INFO, 0, 1,
        T, FIELD_INFO,
        T, RUNTIME_FIELD_HANDLE,

    // static IEnumerable<!!1> Enumerable::Select<TSource, TResult>(IEnumerable<!!0>, Func<!!0, !!1>)
    METHOD | STATIC, ENUMERABLE, 2, 2,
        GINST, T, IENUMERABLE_T, 1,
            MVAR, 1,
        GINST, T, IENUMERABLE_T, 1,
            MVAR, 0,
        GINST, T, FUNC_T2, 2,
            MVAR, 0,
            MVAR, 1,

    // static Dictionary<!!0, !!1> Enumerable::ToDictionary<TKey, TValue>(IEnumerable<KeyValuePair<!!0, !!1>>)
    METHOD | STATIC, ENUMERABLE, 2, 1,
        GINST, T, DICTIONARY_KV, 2,
            MVAR, 0,
            MVAR, 1,
        GINST, T, IENUMERABLE_T, 1,
            GINST, T, KEY_VALUE_PAIR_KV, 2,
                MVAR, 0,
                MVAR, 1,

    // static IntPtr Marshal::AllocHGlobal(int)
    METHOD | STATIC, MARSHAL, 0, 1,
        T, INTPTR,
        T, INT32,

    // Span<T>::.ctor(void*, int)
    CTOR, SPAN_T, 0, 2,
        T, VOID,
        PTR, T, VOID,
        T, INT32,

    // ref !0 ReadOnlySpan<T>::get_Item(int)
    GETTER, READONLYSPAN_T, 0, 1,
        BYREF, VAR, 0,
        T, INT32,

    // static void* Unsafe::AsPointer<T>(ref !!0)
    METHOD | STATIC, UNSAFE, 1, 1,
        PTR, T, VOID,
        BYREF, MVAR, 0,

    // static ref !!1 Unsafe::As<TFrom, TTo>(ref !!0)
    METHOD | STATIC, UNSAFE, 2, 1,
        BYREF, MVAR, 1,
        BYREF, MVAR, 0,
];

static WELL_KNOWN_MEMBERS: OnceLock<Catalog<WellKnownMember>> = OnceLock::new();

/// The catalog of members declared on well-known types, decoded on first use
///
/// # Panics
/// Panics on first use if the shipped token table is corrupt
pub fn well_known_members() -> &'static Catalog<WellKnownMember> {
    WELL_KNOWN_MEMBERS.get_or_init(|| {
        build_shipped(
            "well-known member",
            WELL_KNOWN_MEMBER_TOKENS,
            &WELL_KNOWN_MEMBER_NAMES,
        )
    })
}
