use std::fmt;

use bitflags::bitflags;

use crate::{signatures::MAX_NESTING_DEPTH, typesystem::TypeId, Error, Result};

/// Bitmask for the one-hot member kind held in the low bits of [`MemberFlags`]
pub const MEMBER_KIND_MASK: u16 = 0x003F;

#[allow(non_snake_case, dead_code, missing_docs)]
/// Tag tokens that open a signature node - values follow the ECMA-335 element types
pub mod SIGNATURE_TAG {
    // Followed by type
    pub const POINTER: u16 = 0x0f;
    // Followed by type
    pub const BY_REFERENCE: u16 = 0x10;
    // Followed by the parameter index
    pub const GENERIC_TYPE_PARAMETER: u16 = 0x13;
    // Followed by TYPE_HANDLE, definition, arg-count, arg-1 ... arg-n
    pub const GENERIC_TYPE_INSTANCE: u16 = 0x15;
    // Followed by type
    pub const SZ_ARRAY: u16 = 0x1d;
    // Followed by the parameter index
    pub const GENERIC_METHOD_PARAMETER: u16 = 0x1e;
    // Followed by a raw type handle
    pub const TYPE_HANDLE: u16 = 0x40;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Kind and modifier bits of a catalog member
    pub struct MemberFlags: u16 {
        /// Member is a method
        const METHOD = 0x0001;
        /// Member is a field
        const FIELD = 0x0002;
        /// Member is an instance constructor
        const CONSTRUCTOR = 0x0004;
        /// Member is a property getter
        const PROPERTY_GET = 0x0008;
        /// Member is a property
        const PROPERTY = 0x0010;
        /// Member is a property setter
        const PROPERTY_SET = 0x0020;
        /// Member is static
        const STATIC = 0x0040;
        /// Member is virtual
        const VIRTUAL = 0x0080;
    }
}

impl MemberFlags {
    /// Extract the member kind, if exactly one kind bit is set
    #[must_use]
    pub fn kind(self) -> Option<MemberKind> {
        match self.bits() & MEMBER_KIND_MASK {
            0x0001 => Some(MemberKind::Method),
            0x0002 => Some(MemberKind::Field),
            0x0004 => Some(MemberKind::Constructor),
            0x0008 => Some(MemberKind::PropertyGet),
            0x0010 => Some(MemberKind::Property),
            0x0020 => Some(MemberKind::PropertySet),
            _ => None,
        }
    }

    /// Extract the member kind, rejecting unknown bits and anything but exactly one kind bit
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidRecord`] describing the offending flag value.
    pub fn validated_kind(self) -> Result<MemberKind> {
        if MemberFlags::from_bits(self.bits()).is_none() {
            return Err(Error::InvalidRecord(format!(
                "unknown flag bits 0x{:04X}",
                self.bits()
            )));
        }

        self.kind().ok_or_else(|| {
            Error::InvalidRecord(format!(
                "flags 0x{:04X} do not name exactly one member kind",
                self.bits()
            ))
        })
    }
}

/// The kind of a catalog member, decoded from [`MemberFlags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A field, the only kind with a single-type shape
    Field,
    /// An ordinary method
    Method,
    /// An instance constructor
    Constructor,
    /// A property
    Property,
    /// A property getter
    PropertyGet,
    /// A property setter
    PropertySet,
}

impl MemberKind {
    /// The single flag bit representing this kind
    #[must_use]
    pub fn flag(self) -> MemberFlags {
        match self {
            MemberKind::Field => MemberFlags::FIELD,
            MemberKind::Method => MemberFlags::METHOD,
            MemberKind::Constructor => MemberFlags::CONSTRUCTOR,
            MemberKind::Property => MemberFlags::PROPERTY,
            MemberKind::PropertyGet => MemberFlags::PROPERTY_GET,
            MemberKind::PropertySet => MemberFlags::PROPERTY_SET,
        }
    }
}

/// One type reference inside a member signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureNode {
    /// A type named by its handle
    Direct(TypeId),
    /// Single dimension, zero-based array
    Array(Box<SignatureNode>),
    /// A pointer to a type
    Pointer(Box<SignatureNode>),
    /// Type by reference
    ByRef(Box<SignatureNode>),
    /// The N-th generic parameter of the declaring type
    GenericTypeParam(u16),
    /// The N-th generic parameter of the member itself
    GenericMethodParam(u16),
    /// A generic definition and its type arguments
    GenericInstance(TypeId, Vec<SignatureNode>),
}

impl SignatureNode {
    /// Number of tokens this node occupies in a token table
    #[must_use]
    pub fn token_len(&self) -> usize {
        match self {
            SignatureNode::Direct(_)
            | SignatureNode::GenericTypeParam(_)
            | SignatureNode::GenericMethodParam(_) => 2,
            SignatureNode::Array(inner)
            | SignatureNode::Pointer(inner)
            | SignatureNode::ByRef(inner) => 1 + inner.token_len(),
            // tag, TYPE_HANDLE, definition, count, args
            SignatureNode::GenericInstance(_, args) => {
                4 + args.iter().map(SignatureNode::token_len).sum::<usize>()
            }
        }
    }

    /// Nesting depth, where a leaf node has depth 1
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            SignatureNode::Direct(_)
            | SignatureNode::GenericTypeParam(_)
            | SignatureNode::GenericMethodParam(_) => 1,
            SignatureNode::Array(inner)
            | SignatureNode::Pointer(inner)
            | SignatureNode::ByRef(inner) => 1 + inner.depth(),
            SignatureNode::GenericInstance(_, args) => {
                1 + args.iter().map(SignatureNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Highest `GenericMethodParam` index referenced anywhere in this node
    #[must_use]
    pub fn max_method_param(&self) -> Option<u16> {
        match self {
            SignatureNode::GenericMethodParam(index) => Some(*index),
            SignatureNode::Direct(_) | SignatureNode::GenericTypeParam(_) => None,
            SignatureNode::Array(inner)
            | SignatureNode::Pointer(inner)
            | SignatureNode::ByRef(inner) => inner.max_method_param(),
            SignatureNode::GenericInstance(_, args) => {
                args.iter().filter_map(SignatureNode::max_method_param).max()
            }
        }
    }

    /// Check that every method generic parameter is below `arity`
    ///
    /// # Errors
    /// Returns [`crate::Error::GenericParamOutOfRange`] for the first offending parameter.
    pub fn check_arity(&self, arity: u16) -> Result<()> {
        match self.max_method_param() {
            Some(index) if index >= arity => Err(Error::GenericParamOutOfRange { index, arity }),
            _ => Ok(()),
        }
    }

    /// Check that [`TypeId::GenericParamOfSelf`] only appears as a `Direct` handle
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidRecord`] if it is used as a generic definition.
    pub fn check_self_references(&self) -> Result<()> {
        match self {
            SignatureNode::Direct(_)
            | SignatureNode::GenericTypeParam(_)
            | SignatureNode::GenericMethodParam(_) => Ok(()),
            SignatureNode::Array(inner)
            | SignatureNode::Pointer(inner)
            | SignatureNode::ByRef(inner) => inner.check_self_references(),
            SignatureNode::GenericInstance(definition, args) => {
                if *definition == TypeId::GenericParamOfSelf {
                    return Err(Error::InvalidRecord(
                        "self type used as a generic definition".to_string(),
                    ));
                }
                args.iter().try_for_each(SignatureNode::check_self_references)
            }
        }
    }
}

impl fmt::Display for SignatureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureNode::Direct(id) => write!(f, "{id}"),
            SignatureNode::Array(inner) => write!(f, "{inner}[]"),
            SignatureNode::Pointer(inner) => write!(f, "{inner}*"),
            SignatureNode::ByRef(inner) => write!(f, "ref {inner}"),
            SignatureNode::GenericTypeParam(index) => write!(f, "!{index}"),
            SignatureNode::GenericMethodParam(index) => write!(f, "!!{index}"),
            SignatureNode::GenericInstance(definition, args) => {
                let name = definition.to_string();
                let name = name.split_once('`').map_or(name.as_str(), |(base, _)| base);
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// The type information carried by a member record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberShape {
    /// The type of a field
    Field(SignatureNode),
    /// Return type and parameters of every other member kind
    Invocable {
        /// The return type (`void` for constructors and setters)
        return_type: SignatureNode,
        /// The parameters, in declaration order
        parameters: Vec<SignatureNode>,
    },
}

/// One entry of a member catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRecord {
    /// Kind and modifier bits
    pub flags: MemberFlags,
    /// The type that declares this member
    pub declaring_type: TypeId,
    /// Count of the member's own generic parameters
    pub arity: u16,
    /// Field type or return type and parameters
    pub shape: MemberShape,
}

impl MemberRecord {
    /// Create a new record, rejecting combinations the record grammar cannot express
    ///
    /// # Errors
    /// Returns an error under the same conditions as [`MemberRecord::validate`].
    pub fn new(
        flags: MemberFlags,
        declaring_type: TypeId,
        arity: u16,
        shape: MemberShape,
    ) -> Result<Self> {
        let record = MemberRecord {
            flags,
            declaring_type,
            arity,
            shape,
        };
        record.validate()?;
        Ok(record)
    }

    /// Convenience constructor for a non-generic field
    ///
    /// # Errors
    /// Returns an error if the combination is invalid, see [`MemberRecord::validate`].
    pub fn field(modifiers: MemberFlags, declaring_type: TypeId, ty: SignatureNode) -> Result<Self> {
        Self::new(
            modifiers | MemberFlags::FIELD,
            declaring_type,
            0,
            MemberShape::Field(ty),
        )
    }

    /// Convenience constructor for any invocable member
    ///
    /// # Errors
    /// Returns an error if the combination is invalid, see [`MemberRecord::validate`].
    pub fn invocable(
        flags: MemberFlags,
        declaring_type: TypeId,
        arity: u16,
        return_type: SignatureNode,
        parameters: Vec<SignatureNode>,
    ) -> Result<Self> {
        Self::new(
            flags,
            declaring_type,
            arity,
            MemberShape::Invocable {
                return_type,
                parameters,
            },
        )
    }

    /// Check the structural invariants of this record
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidRecord`] if the flags hold unknown bits, the kind is not
    /// exactly one bit, the shape does not match the kind, or the self type is misplaced;
    /// [`crate::Error::GenericParamOutOfRange`] if a method generic parameter exceeds `arity`;
    /// [`crate::Error::RecursionLimit`] if a node is nested deeper than [`MAX_NESTING_DEPTH`].
    pub fn validate(&self) -> Result<()> {
        self.validate_structure()?;
        self.validate_arity()?;
        self.validate_depth()
    }

    // The decoder enforces its own configured limit while parsing
    fn validate_depth(&self) -> Result<()> {
        if self.nodes().any(|node| node.depth() > MAX_NESTING_DEPTH) {
            return Err(Error::RecursionLimit(MAX_NESTING_DEPTH));
        }
        Ok(())
    }

    pub(crate) fn validate_structure(&self) -> Result<()> {
        let kind = self.flags.validated_kind()?;
        match (&self.shape, kind) {
            (MemberShape::Field(_), MemberKind::Field) => {}
            (MemberShape::Invocable { .. }, kind) if kind != MemberKind::Field => {}
            (_, kind) => {
                return Err(Error::InvalidRecord(format!(
                    "{kind:?} member with a {} shape",
                    if matches!(self.shape, MemberShape::Field(_)) {
                        "field"
                    } else {
                        "invocable"
                    }
                )))
            }
        }

        if self.declaring_type == TypeId::GenericParamOfSelf {
            return Err(Error::InvalidRecord(
                "self type used as a declaring type".to_string(),
            ));
        }

        self.nodes().try_for_each(SignatureNode::check_self_references)
    }

    pub(crate) fn validate_arity(&self) -> Result<()> {
        self.nodes().try_for_each(|node| node.check_arity(self.arity))
    }

    /// All signature nodes of this record: the field type, or the return type then parameters
    pub fn nodes(&self) -> impl Iterator<Item = &SignatureNode> {
        let (head, tail): (&SignatureNode, &[SignatureNode]) = match &self.shape {
            MemberShape::Field(ty) => (ty, &[]),
            MemberShape::Invocable {
                return_type,
                parameters,
            } => (return_type, parameters.as_slice()),
        };
        std::iter::once(head).chain(tail.iter())
    }

    /// Highest `GenericMethodParam` index referenced anywhere in this record
    #[must_use]
    pub fn max_method_param(&self) -> Option<u16> {
        self.nodes().filter_map(SignatureNode::max_method_param).max()
    }

    /// The member kind, if the flags name exactly one
    #[must_use]
    pub fn kind(&self) -> Option<MemberKind> {
        self.flags.kind()
    }

    /// Returns `true` if the member is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    /// Returns `true` if the member is virtual
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.flags.contains(MemberFlags::VIRTUAL)
    }

    /// The field type, for field records
    #[must_use]
    pub fn field_type(&self) -> Option<&SignatureNode> {
        match &self.shape {
            MemberShape::Field(ty) => Some(ty),
            MemberShape::Invocable { .. } => None,
        }
    }

    /// The return type, for invocable records
    #[must_use]
    pub fn return_type(&self) -> Option<&SignatureNode> {
        match &self.shape {
            MemberShape::Field(_) => None,
            MemberShape::Invocable { return_type, .. } => Some(return_type),
        }
    }

    /// The parameters; empty for field records
    #[must_use]
    pub fn parameters(&self) -> &[SignatureNode] {
        match &self.shape {
            MemberShape::Field(_) => &[],
            MemberShape::Invocable { parameters, .. } => parameters,
        }
    }

    /// Number of parameters; `0` for field records
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    /// Number of tokens this record occupies in a token table
    #[must_use]
    pub fn token_len(&self) -> usize {
        // flags, declaring type, arity
        let header = 3;
        match &self.shape {
            MemberShape::Field(ty) => header + ty.token_len(),
            MemberShape::Invocable {
                return_type,
                parameters,
            } => {
                header
                    + 1
                    + return_type.token_len()
                    + parameters.iter().map(SignatureNode::token_len).sum::<usize>()
            }
        }
    }

    /// Render this record as a C#-like declaration under the given member name
    ///
    /// ```rust
    /// use sigcatalog::prelude::*;
    ///
    /// let string = SignatureNode::Direct(SpecialType::String.into());
    /// let concat = MemberRecord::invocable(
    ///     MemberFlags::METHOD | MemberFlags::STATIC,
    ///     SpecialType::String.into(),
    ///     0,
    ///     string.clone(),
    ///     vec![string.clone(), string],
    /// )?;
    /// assert_eq!(
    ///     concat.display("Concat").to_string(),
    ///     "static string System.String::Concat(string, string)"
    /// );
    /// # Ok::<(), sigcatalog::Error>(())
    /// ```
    #[must_use]
    pub fn display<'a>(&'a self, name: &'a str) -> MemberDisplay<'a> {
        MemberDisplay { record: self, name }
    }
}

/// Helper returned by [`MemberRecord::display`]
pub struct MemberDisplay<'a> {
    record: &'a MemberRecord,
    name: &'a str,
}

impl fmt::Display for MemberDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        if record.is_static() {
            f.write_str("static ")?;
        }
        if record.is_virtual() {
            f.write_str("virtual ")?;
        }

        let declaring = record
            .declaring_type
            .metadata_name()
            .map_or_else(|| record.declaring_type.to_string(), str::to_string);

        match &record.shape {
            MemberShape::Field(ty) => write!(f, "{ty} {declaring}::{}", self.name),
            MemberShape::Invocable {
                return_type,
                parameters,
            } => {
                write!(f, "{return_type} {declaring}::{}", self.name)?;
                if record.arity > 0 {
                    f.write_str("<")?;
                    for i in 0..record.arity {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "!!{i}")?;
                    }
                    f.write_str(">")?;
                }
                f.write_str("(")?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typesystem::{SpecialType, WellKnownType};

    fn direct(ty: SpecialType) -> SignatureNode {
        SignatureNode::Direct(ty.into())
    }

    #[test]
    fn test_flag_kinds() {
        assert_eq!(
            (MemberFlags::METHOD | MemberFlags::STATIC).kind(),
            Some(MemberKind::Method)
        );
        assert_eq!(MemberFlags::PROPERTY_SET.kind(), Some(MemberKind::PropertySet));
        assert_eq!((MemberFlags::METHOD | MemberFlags::FIELD).kind(), None);
        assert_eq!(MemberFlags::STATIC.kind(), None);
        for kind in [
            MemberKind::Field,
            MemberKind::Method,
            MemberKind::Constructor,
            MemberKind::Property,
            MemberKind::PropertyGet,
            MemberKind::PropertySet,
        ] {
            assert_eq!(kind.flag().kind(), Some(kind));
        }
    }

    #[test]
    fn test_token_len() {
        assert_eq!(direct(SpecialType::Int32).token_len(), 2);
        assert_eq!(
            SignatureNode::ByRef(Box::new(SignatureNode::Array(Box::new(direct(
                SpecialType::Char
            )))))
            .token_len(),
            4
        );
        let list_of_int = SignatureNode::GenericInstance(
            WellKnownType::ListT.into(),
            vec![direct(SpecialType::Int32)],
        );
        assert_eq!(list_of_int.token_len(), 6);

        let concat = MemberRecord::invocable(
            MemberFlags::METHOD | MemberFlags::STATIC,
            SpecialType::String.into(),
            0,
            direct(SpecialType::String),
            vec![direct(SpecialType::String), direct(SpecialType::String)],
        )
        .unwrap();
        assert_eq!(concat.token_len(), 10);
    }

    #[test]
    fn test_shape_must_match_kind() {
        let result = MemberRecord::new(
            MemberFlags::METHOD,
            SpecialType::Array.into(),
            0,
            MemberShape::Field(SignatureNode::Array(Box::new(
                SignatureNode::GenericTypeParam(0),
            ))),
        );
        assert!(matches!(result, Err(Error::InvalidRecord(_))));

        let result = MemberRecord::new(
            MemberFlags::FIELD,
            SpecialType::String.into(),
            0,
            MemberShape::Invocable {
                return_type: direct(SpecialType::Void),
                parameters: vec![],
            },
        );
        assert!(matches!(result, Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_method_param_requires_arity() {
        let result = MemberRecord::invocable(
            MemberFlags::METHOD | MemberFlags::STATIC,
            WellKnownType::Activator.into(),
            1,
            SignatureNode::GenericMethodParam(1),
            vec![],
        );
        assert_eq!(
            result,
            Err(Error::GenericParamOutOfRange { index: 1, arity: 1 })
        );

        // Type parameters are not checked against anything
        assert!(MemberRecord::field(
            MemberFlags::empty(),
            WellKnownType::KeyValuePairKV.into(),
            SignatureNode::GenericTypeParam(5),
        )
        .is_ok());
    }

    #[test]
    fn test_self_type_placement() {
        let result = MemberRecord::field(
            MemberFlags::STATIC,
            TypeId::GenericParamOfSelf,
            direct(SpecialType::Int32),
        );
        assert!(matches!(result, Err(Error::InvalidRecord(_))));

        let result = MemberRecord::field(
            MemberFlags::STATIC,
            WellKnownType::EqualityComparerT.into(),
            SignatureNode::GenericInstance(TypeId::GenericParamOfSelf, vec![]),
        );
        assert!(matches!(result, Err(Error::InvalidRecord(_))));

        assert!(MemberRecord::field(
            MemberFlags::STATIC,
            WellKnownType::EqualityComparerT.into(),
            SignatureNode::Direct(TypeId::GenericParamOfSelf),
        )
        .is_ok());
    }

    #[test]
    fn test_unknown_flag_bits() {
        let result = MemberRecord::new(
            MemberFlags::from_bits_retain(0x0101),
            SpecialType::String.into(),
            0,
            MemberShape::Invocable {
                return_type: direct(SpecialType::Void),
                parameters: vec![],
            },
        );
        assert!(matches!(result, Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_display() {
        let nested = SignatureNode::GenericInstance(
            WellKnownType::DictionaryKV.into(),
            vec![
                direct(SpecialType::String),
                SignatureNode::GenericInstance(
                    WellKnownType::ListT.into(),
                    vec![SignatureNode::Pointer(Box::new(direct(SpecialType::Int32)))],
                ),
            ],
        );
        assert_eq!(
            nested.to_string(),
            "System.Collections.Generic.Dictionary<string, System.Collections.Generic.List<int*>>"
        );
        assert_eq!(nested.depth(), 4);

        let exchange = MemberRecord::invocable(
            MemberFlags::METHOD | MemberFlags::STATIC,
            WellKnownType::Interlocked.into(),
            1,
            SignatureNode::GenericMethodParam(0),
            vec![
                SignatureNode::ByRef(Box::new(SignatureNode::GenericMethodParam(0))),
                SignatureNode::GenericMethodParam(0),
            ],
        )
        .unwrap();
        assert_eq!(
            exchange.display("Exchange").to_string(),
            "static !!0 System.Threading.Interlocked::Exchange<!!0>(ref !!0, !!0)"
        );

        let empty = MemberRecord::field(
            MemberFlags::STATIC,
            SpecialType::String.into(),
            direct(SpecialType::String),
        )
        .unwrap();
        assert_eq!(
            empty.display("Empty").to_string(),
            "static string System.String::Empty"
        );
    }
}
