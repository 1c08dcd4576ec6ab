//! Member signature grammar, decoder and encoder.
//!
//! A catalog is a flat stream of 16-bit tokens holding many member records back to back, with
//! no separators, headers or length prefixes. Each record's extent is implied entirely by the
//! shapes it declares, so the only way to find record `n + 1` is to walk record `n`.
//!
//! # Record Layout
//!
//! ```text
//! Record    ::= Flags DeclaringType Arity ( FieldType | ParamCount ReturnType Param* )
//! Node      ::= TYPE_HANDLE Handle
//!             | SZ_ARRAY Node
//!             | POINTER Node
//!             | BY_REFERENCE Node
//!             | GENERIC_TYPE_PARAMETER Index
//!             | GENERIC_METHOD_PARAMETER Index
//!             | GENERIC_TYPE_INSTANCE TYPE_HANDLE Handle Count Node{Count}
//! ```
//!
//! A record is a field iff its flags name the field kind; every other kind carries a parameter
//! count `n` followed by `n + 1` nodes, the return type first.
//!
//! # Guarantees
//!
//! [`decode`] consumes exactly the tokens each shape implies and requires the cursor to land on
//! the end of the stream after the requested number of records. Truncation, unknown tags and
//! left-over tokens are all errors; there is no partial result.
//!
//! # Examples
//!
//! ```rust
//! use sigcatalog::prelude::*;
//!
//! let string = SignatureNode::Direct(SpecialType::String.into());
//! let records = vec![
//!     MemberRecord::field(MemberFlags::STATIC, SpecialType::String.into(), string.clone())?,
//!     MemberRecord::invocable(
//!         MemberFlags::METHOD | MemberFlags::STATIC,
//!         SpecialType::String.into(),
//!         0,
//!         string.clone(),
//!         vec![string.clone(), string],
//!     )?,
//! ];
//!
//! let tokens = encode(&records)?;
//! assert_eq!(decode(&tokens, records.len())?, records);
//!
//! // One extra token is never silently absorbed
//! let mut padded = tokens.clone();
//! padded.push(0);
//! assert!(decode(&padded, records.len()).is_err());
//! # Ok::<(), sigcatalog::Error>(())
//! ```

mod config;
mod encoders;
mod parser;
mod types;

pub use config::*;
pub use encoders::*;
pub use parser::*;
pub use types::*;

use crate::Result;

/// Decode exactly `record_count` records from `tokens` with the default configuration
///
/// ## Arguments
/// * 'tokens' - The complete token stream
/// * 'record_count' - Number of records the stream must hold
///
/// # Errors
/// Returns an error if the stream is truncated or malformed, a record fails validation, or the
/// records do not consume the whole stream
pub fn decode(tokens: &[u16], record_count: usize) -> Result<Vec<MemberRecord>> {
    decode_with(tokens, record_count, &DecoderConfig::default())
}

/// Decode exactly `record_count` records from `tokens` with an explicit configuration
///
/// # Errors
/// See [`decode`]
pub fn decode_with(
    tokens: &[u16],
    record_count: usize,
    config: &DecoderConfig,
) -> Result<Vec<MemberRecord>> {
    let mut parser = RecordParser::with_config(tokens, *config);
    parser.parse_records(record_count)
}

/// Encode `records` into a single token stream, the inverse of [`decode`]
///
/// # Errors
/// Returns the first record that fails to encode, wrapped in [`crate::Error::Record`]
pub fn encode(records: &[MemberRecord]) -> Result<Vec<u16>> {
    let mut buffer = Vec::with_capacity(records.iter().map(MemberRecord::token_len).sum());
    for (index, record) in records.iter().enumerate() {
        encode_member_record(record, &mut buffer).map_err(|e| e.in_record(index))?;
    }

    Ok(buffer)
}
