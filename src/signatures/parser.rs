use log::trace;

use crate::{
    reader::TokenReader,
    signatures::{
        DecoderConfig, MemberFlags, MemberKind, MemberRecord, MemberShape, SignatureNode,
        SIGNATURE_TAG,
    },
    typesystem::TypeId,
    Error::{self, RecursionLimit},
    Result,
};

/// Recursive-descent decoder for member record token streams
///
/// The parser keeps a single forward cursor. Every record is read by walking its signature
/// nodes, which is the only way to know where the next record begins: the stream carries no
/// separators or length prefixes.
///
/// # Example
///
/// ```rust
/// use sigcatalog::signatures::{MemberKind, RecordParser};
///
/// // static string String::Concat(string, string)
/// let tokens = [
///     0x0041, 20, 0, // METHOD | STATIC, System.String, arity 0
///     2, // parameter count
///     0x40, 20, // return: string
///     0x40, 20, // string
///     0x40, 20, // string
/// ];
/// let mut parser = RecordParser::new(&tokens);
/// let record = parser.parse_record()?;
/// assert_eq!(record.kind(), Some(MemberKind::Method));
/// assert_eq!(record.parameter_count(), 2);
/// assert!(parser.is_finished());
/// # Ok::<(), sigcatalog::Error>(())
/// ```
pub struct RecordParser<'a> {
    reader: TokenReader<'a>,
    config: DecoderConfig,
    depth: usize,
}

impl<'a> RecordParser<'a> {
    /// Create a new `RecordParser` with the default configuration
    ///
    /// ## Arguments
    /// * 'data' - The token slice to read from
    #[must_use]
    pub fn new(data: &'a [u16]) -> Self {
        Self::with_config(data, DecoderConfig::default())
    }

    /// Create a new `RecordParser` with an explicit configuration
    #[must_use]
    pub fn with_config(data: &'a [u16], config: DecoderConfig) -> Self {
        RecordParser {
            reader: TokenReader::new(data),
            config,
            depth: 0,
        }
    }

    /// Current cursor position
    #[must_use]
    pub fn pos(&self) -> usize {
        self.reader.pos()
    }

    /// Returns `true` once every token has been consumed
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.reader.has_more_data()
    }

    /// Parse a single signature node
    fn parse_node(&mut self) -> Result<SignatureNode> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(RecursionLimit(self.config.max_nesting_depth));
        }

        self.depth += 1;
        let node = self.parse_node_body();
        self.depth -= 1;
        node
    }

    fn parse_node_body(&mut self) -> Result<SignatureNode> {
        let position = self.reader.pos();
        let tag = self.reader.read()?;
        match tag {
            SIGNATURE_TAG::TYPE_HANDLE => {
                Ok(SignatureNode::Direct(TypeId::from_raw(self.reader.read()?)))
            }
            SIGNATURE_TAG::SZ_ARRAY => Ok(SignatureNode::Array(Box::new(self.parse_node()?))),
            SIGNATURE_TAG::POINTER => Ok(SignatureNode::Pointer(Box::new(self.parse_node()?))),
            SIGNATURE_TAG::BY_REFERENCE => Ok(SignatureNode::ByRef(Box::new(self.parse_node()?))),
            SIGNATURE_TAG::GENERIC_TYPE_PARAMETER => {
                Ok(SignatureNode::GenericTypeParam(self.reader.read()?))
            }
            SIGNATURE_TAG::GENERIC_METHOD_PARAMETER => {
                Ok(SignatureNode::GenericMethodParam(self.reader.read()?))
            }
            SIGNATURE_TAG::GENERIC_TYPE_INSTANCE => {
                let handle_tag = self.reader.read()?;
                if handle_tag != SIGNATURE_TAG::TYPE_HANDLE {
                    return Err(malformed_error!(
                        "GENERIC_TYPE_INSTANCE at token {} - definition is not a TYPE_HANDLE - 0x{:04X}",
                        position,
                        handle_tag
                    ));
                }

                let definition = TypeId::from_raw(self.reader.read()?);
                let arg_count = self.reader.read_count()?;

                let mut args = Vec::with_capacity(arg_count);
                for _ in 0..arg_count {
                    args.push(self.parse_node()?);
                }

                Ok(SignatureNode::GenericInstance(definition, args))
            }
            _ => Err(Error::UnknownTag { tag, position }),
        }
    }

    /// Parse one member record from the current cursor position
    ///
    /// # Errors
    /// Returns an error if the stream ends mid-record, a tag is unknown, nesting exceeds the
    /// configured depth, or an enabled record check fails.
    pub fn parse_record(&mut self) -> Result<MemberRecord> {
        let flags = MemberFlags::from_bits_retain(self.reader.read()?);
        if self.config.enable_record_validation {
            flags.validated_kind()?;
        }

        let declaring_type = TypeId::from_raw(self.reader.read()?);
        let arity = self.reader.read()?;

        let shape = if flags.kind() == Some(MemberKind::Field) {
            MemberShape::Field(self.parse_node()?)
        } else {
            let param_count = self.reader.read_count()?;
            let return_type = self.parse_node()?;

            let mut parameters = Vec::with_capacity(param_count);
            for _ in 0..param_count {
                parameters.push(self.parse_node()?);
            }

            MemberShape::Invocable {
                return_type,
                parameters,
            }
        };

        let record = MemberRecord {
            flags,
            declaring_type,
            arity,
            shape,
        };

        if self.config.enable_record_validation {
            record.validate_structure()?;
        }
        if self.config.enable_arity_validation {
            record.validate_arity()?;
        }

        Ok(record)
    }

    /// Parse exactly `count` records, requiring them to consume the whole stream
    ///
    /// # Errors
    /// Any record failure is returned wrapped in [`crate::Error::Record`]; tokens left over after
    /// the last record produce [`crate::Error::TrailingTokens`].
    pub fn parse_records(&mut self, count: usize) -> Result<Vec<MemberRecord>> {
        let mut records = Vec::with_capacity(count.min(self.reader.remaining()));
        for index in 0..count {
            let start = self.reader.pos();
            let record = self.parse_record().map_err(|e| e.in_record(index))?;
            trace!(
                "decoded record {} at token {} ({} tokens)",
                index,
                start,
                self.reader.pos() - start
            );
            records.push(record);
        }

        if !self.is_finished() {
            return Err(Error::TrailingTokens {
                consumed: self.reader.pos(),
                len: self.reader.len(),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typesystem::{SpecialType, WellKnownType};

    const STRING: u16 = SpecialType::String.handle();
    const CHAR: u16 = SpecialType::Char.handle();
    const INT32: u16 = SpecialType::Int32.handle();

    fn parse_node(tokens: &[u16]) -> Result<SignatureNode> {
        let mut parser = RecordParser::new(tokens);
        let node = parser.parse_node()?;
        assert!(parser.is_finished(), "node left tokens behind");
        Ok(node)
    }

    #[test]
    fn test_parse_leaf_nodes() {
        assert_eq!(
            parse_node(&[0x40, STRING]).unwrap(),
            SignatureNode::Direct(SpecialType::String.into())
        );
        assert_eq!(
            parse_node(&[0x40, WellKnownType::Task.handle()]).unwrap(),
            SignatureNode::Direct(WellKnownType::Task.into())
        );
        assert_eq!(
            parse_node(&[0x40, 0xFFFF]).unwrap(),
            SignatureNode::Direct(TypeId::GenericParamOfSelf)
        );
        assert_eq!(
            parse_node(&[0x13, 1]).unwrap(),
            SignatureNode::GenericTypeParam(1)
        );
        assert_eq!(
            parse_node(&[0x1E, 0]).unwrap(),
            SignatureNode::GenericMethodParam(0)
        );
    }

    #[test]
    fn test_parse_wrappers() {
        assert_eq!(
            parse_node(&[0x10, 0x1D, 0x0F, 0x40, INT32]).unwrap(),
            SignatureNode::ByRef(Box::new(SignatureNode::Array(Box::new(
                SignatureNode::Pointer(Box::new(SignatureNode::Direct(
                    SpecialType::Int32.into()
                )))
            ))))
        );
    }

    #[test]
    fn test_parse_generic_instance() {
        // Dictionary<string, List<int>>
        let node = parse_node(&[
            0x15, 0x40, WellKnownType::DictionaryKV.handle(), 2,
            0x40, STRING,
            0x15, 0x40, WellKnownType::ListT.handle(), 1,
            0x40, INT32,
        ])
        .unwrap();
        assert_eq!(
            node,
            SignatureNode::GenericInstance(
                WellKnownType::DictionaryKV.into(),
                vec![
                    SignatureNode::Direct(SpecialType::String.into()),
                    SignatureNode::GenericInstance(
                        WellKnownType::ListT.into(),
                        vec![SignatureNode::Direct(SpecialType::Int32.into())]
                    ),
                ]
            )
        );
    }

    #[test]
    fn test_generic_instance_requires_type_handle() {
        let result = parse_node(&[0x15, 0x13, 0, 0]);
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            parse_node(&[0x1D, 0x99, 0]),
            Err(Error::UnknownTag {
                tag: 0x99,
                position: 1
            })
        );
    }

    #[test]
    fn test_recursion_limit() {
        let mut tokens = vec![0x1D; 10];
        tokens.extend([0x40, CHAR]);

        let config = DecoderConfig {
            max_nesting_depth: 8,
            ..DecoderConfig::default()
        };
        let mut parser = RecordParser::with_config(&tokens, config);
        assert_eq!(parser.parse_node(), Err(RecursionLimit(8)));

        // The limit applies per node, not accumulated over the parser's lifetime
        let tokens = [0x1D, 0x40, CHAR, 0x1D, 0x40, CHAR, 0x1D, 0x40, CHAR];
        let config = DecoderConfig {
            max_nesting_depth: 2,
            ..DecoderConfig::default()
        };
        let mut parser = RecordParser::with_config(&tokens, config);
        for _ in 0..3 {
            parser.parse_node().unwrap();
        }
        assert!(parser.is_finished());
    }

    #[test]
    fn test_parse_field_record() {
        // static readonly string String.Empty
        let mut parser = RecordParser::new(&[0x0042, STRING, 0, 0x40, STRING]);
        let record = parser.parse_record().unwrap();
        assert_eq!(record.kind(), Some(MemberKind::Field));
        assert!(record.is_static());
        assert_eq!(
            record.field_type(),
            Some(&SignatureNode::Direct(SpecialType::String.into()))
        );
        assert!(parser.is_finished());
    }

    #[test]
    fn test_parse_constructor_with_array_parameter() {
        // String::.ctor(char[])
        let mut parser = RecordParser::new(&[0x0004, STRING, 0, 1, 0x40, 6, 0x1D, 0x40, CHAR]);
        let record = parser.parse_record().unwrap();
        assert_eq!(record.kind(), Some(MemberKind::Constructor));
        assert_eq!(
            record.parameters(),
            &[SignatureNode::Array(Box::new(SignatureNode::Direct(
                SpecialType::Char.into()
            )))]
        );
        assert_eq!(parser.pos(), 9);
    }

    #[test]
    fn test_record_validation_toggles() {
        // METHOD | FIELD is not a single kind
        let tokens = [0x0003, STRING, 0, 0, 0x40, 6];
        let mut parser = RecordParser::new(&tokens);
        assert!(matches!(
            parser.parse_record(),
            Err(Error::InvalidRecord(_))
        ));

        let mut parser = RecordParser::with_config(&tokens, DecoderConfig::minimal());
        let record = parser.parse_record().unwrap();
        assert_eq!(record.kind(), None);
        assert!(parser.is_finished());
    }

    #[test]
    fn test_arity_validation_toggles() {
        // !!1 Activator::CreateInstance<!!0>()
        let tokens = [0x0041, WellKnownType::Activator.handle(), 1, 0, 0x1E, 1];
        let mut parser = RecordParser::new(&tokens);
        assert_eq!(
            parser.parse_record(),
            Err(Error::GenericParamOutOfRange { index: 1, arity: 1 })
        );

        let mut parser = RecordParser::with_config(&tokens, DecoderConfig::minimal());
        assert!(parser.parse_record().is_ok());
    }

    #[test]
    fn test_parse_records_exactness() {
        let tokens = [
            0x0042, STRING, 0, 0x40, STRING, // String.Empty
            0x0004, STRING, 0, 1, 0x40, 6, 0x1D, 0x40, CHAR, // String::.ctor(char[])
        ];

        let records = RecordParser::new(&tokens).parse_records(2).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(
            RecordParser::new(&tokens).parse_records(1),
            Err(Error::TrailingTokens {
                consumed: 5,
                len: 14
            })
        );

        let err = RecordParser::new(&tokens).parse_records(3).unwrap_err();
        assert!(matches!(err, Error::Record { index: 2, .. }));
        assert!(matches!(err.root(), Error::OutOfBounds { .. }));
    }
}
