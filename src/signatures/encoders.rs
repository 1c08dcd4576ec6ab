//! Signature and record encoders producing catalog token streams.
//!
//! These functions are the structural inverse of [`crate::signatures::RecordParser`]. They exist
//! so the format's self-consistency can be checked by round-tripping instead of being trusted by
//! inspection, and so test and tooling code can author token tables from typed records.
//!
//! # Available Encoders
//!
//! - [`encode_signature_node`] - A single type reference
//! - [`encode_member_record`] - One complete catalog entry
//!
//! Records are validated before a single token is written, so a buffer is never left holding
//! half of an invalid record.

use crate::{
    signatures::{MemberRecord, MemberShape, SignatureNode, SIGNATURE_TAG},
    Error, Result,
};

fn encode_count(count: usize, what: &str) -> Result<u16> {
    u16::try_from(count)
        .map_err(|_| Error::InvalidRecord(format!("{count} {what} exceed the 16-bit count")))
}

/// Encodes a signature node into `buffer`.
///
/// # Arguments
///
/// * `node` - The node to encode
/// * `buffer` - The output buffer to append the tokens to
///
/// # Errors
///
/// Returns [`crate::Error::TypeIdOutOfRange`] if a type id has no raw handle, or
/// [`crate::Error::InvalidRecord`] if a generic instance has more than `u16::MAX` arguments.
///
/// # Examples
///
/// ```rust
/// use sigcatalog::signatures::{encode_signature_node, SignatureNode};
/// use sigcatalog::typesystem::SpecialType;
///
/// let mut buffer = Vec::new();
/// let char_array = SignatureNode::Array(Box::new(SignatureNode::Direct(SpecialType::Char.into())));
/// encode_signature_node(&char_array, &mut buffer)?;
/// assert_eq!(buffer, vec![0x1D, 0x40, SpecialType::Char.handle()]);
/// # Ok::<(), sigcatalog::Error>(())
/// ```
pub fn encode_signature_node(node: &SignatureNode, buffer: &mut Vec<u16>) -> Result<()> {
    match node {
        SignatureNode::Direct(id) => {
            buffer.push(SIGNATURE_TAG::TYPE_HANDLE);
            buffer.push(id.to_raw()?);
        }
        SignatureNode::Array(inner) => {
            buffer.push(SIGNATURE_TAG::SZ_ARRAY);
            encode_signature_node(inner, buffer)?;
        }
        SignatureNode::Pointer(inner) => {
            buffer.push(SIGNATURE_TAG::POINTER);
            encode_signature_node(inner, buffer)?;
        }
        SignatureNode::ByRef(inner) => {
            buffer.push(SIGNATURE_TAG::BY_REFERENCE);
            encode_signature_node(inner, buffer)?;
        }
        SignatureNode::GenericTypeParam(index) => {
            buffer.push(SIGNATURE_TAG::GENERIC_TYPE_PARAMETER);
            buffer.push(*index);
        }
        SignatureNode::GenericMethodParam(index) => {
            buffer.push(SIGNATURE_TAG::GENERIC_METHOD_PARAMETER);
            buffer.push(*index);
        }
        SignatureNode::GenericInstance(definition, args) => {
            buffer.push(SIGNATURE_TAG::GENERIC_TYPE_INSTANCE);
            buffer.push(SIGNATURE_TAG::TYPE_HANDLE);
            buffer.push(definition.to_raw()?);
            buffer.push(encode_count(args.len(), "type arguments")?);
            for arg in args {
                encode_signature_node(arg, buffer)?;
            }
        }
    }

    Ok(())
}

/// Encodes a complete member record into `buffer`.
///
/// Layout: flags, declaring type, arity, then either the field type, or the parameter count
/// followed by the return type and each parameter.
///
/// # Errors
///
/// Returns the error of [`MemberRecord::validate`] for records the decoder would reject, and
/// the errors of [`encode_signature_node`]. On error `buffer` is left as it was.
pub fn encode_member_record(record: &MemberRecord, buffer: &mut Vec<u16>) -> Result<()> {
    record.validate()?;

    let start = buffer.len();
    let result = encode_member_record_unchecked(record, buffer);
    if result.is_err() {
        buffer.truncate(start);
    }
    result
}

pub(crate) fn encode_member_record_unchecked(record: &MemberRecord, buffer: &mut Vec<u16>) -> Result<()> {
    buffer.push(record.flags.bits());
    buffer.push(record.declaring_type.to_raw()?);
    buffer.push(record.arity);

    match &record.shape {
        MemberShape::Field(ty) => encode_signature_node(ty, buffer),
        MemberShape::Invocable {
            return_type,
            parameters,
        } => {
            buffer.push(encode_count(parameters.len(), "parameters")?);
            encode_signature_node(return_type, buffer)?;
            for param in parameters {
                encode_signature_node(param, buffer)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        signatures::MemberFlags,
        typesystem::{SpecialType, TypeId, WellKnownType},
    };

    fn direct(ty: SpecialType) -> SignatureNode {
        SignatureNode::Direct(ty.into())
    }

    #[test]
    fn test_encode_leaf_nodes() {
        let mut buffer = Vec::new();
        encode_signature_node(&direct(SpecialType::String), &mut buffer).unwrap();
        encode_signature_node(&SignatureNode::GenericTypeParam(3), &mut buffer).unwrap();
        encode_signature_node(&SignatureNode::GenericMethodParam(1), &mut buffer).unwrap();
        encode_signature_node(&SignatureNode::Direct(TypeId::GenericParamOfSelf), &mut buffer)
            .unwrap();

        assert_eq!(
            buffer,
            vec![0x40, 20, 0x13, 3, 0x1E, 1, 0x40, 0xFFFF]
        );
    }

    #[test]
    fn test_encode_generic_instance() {
        let node = SignatureNode::GenericInstance(
            WellKnownType::TaskT.into(),
            vec![SignatureNode::Pointer(Box::new(direct(SpecialType::Byte)))],
        );
        let mut buffer = Vec::new();
        encode_signature_node(&node, &mut buffer).unwrap();

        assert_eq!(
            buffer,
            vec![0x15, 0x40, WellKnownType::TaskT.handle(), 1, 0x0F, 0x40, 10]
        );
        assert_eq!(buffer.len(), node.token_len());
    }

    #[test]
    fn test_encode_record() {
        let ctor = MemberRecord::invocable(
            MemberFlags::CONSTRUCTOR,
            SpecialType::String.into(),
            0,
            direct(SpecialType::Void),
            vec![SignatureNode::Array(Box::new(direct(SpecialType::Char)))],
        )
        .unwrap();

        let mut buffer = Vec::new();
        encode_member_record(&ctor, &mut buffer).unwrap();
        assert_eq!(buffer, vec![0x0004, 20, 0, 1, 0x40, 6, 0x1D, 0x40, 8]);
        assert_eq!(buffer.len(), ctor.token_len());
    }

    #[test]
    fn test_encode_rejects_shape_mismatch() {
        let record = MemberRecord {
            flags: MemberFlags::METHOD,
            declaring_type: SpecialType::Array.into(),
            arity: 0,
            shape: MemberShape::Field(SignatureNode::Array(Box::new(
                SignatureNode::GenericTypeParam(0),
            ))),
        };

        let mut buffer = vec![0xAAAA];
        assert!(matches!(
            encode_member_record(&record, &mut buffer),
            Err(Error::InvalidRecord(_))
        ));
        assert_eq!(buffer, vec![0xAAAA]);
    }

    #[test]
    fn test_encode_out_of_range_type_leaves_buffer_untouched() {
        let record = MemberRecord {
            flags: MemberFlags::FIELD | MemberFlags::STATIC,
            declaring_type: SpecialType::String.into(),
            arity: 0,
            shape: MemberShape::Field(SignatureNode::Direct(TypeId::Special(0x0300))),
        };

        let mut buffer = Vec::new();
        assert_eq!(
            encode_member_record(&record, &mut buffer),
            Err(Error::TypeIdOutOfRange(0x0300))
        );
        assert!(buffer.is_empty());
    }
}
