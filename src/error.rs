use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which covers every failure the codec and the catalogs can report.
///
/// Catalog data is compiled into the binary, so every variant here describes an authoring bug
/// in a token or name table rather than a condition a caller is expected to recover from. The
/// process-wide catalogs turn any of these into a startup panic; the lower-level
/// [`crate::signatures::decode`] and [`crate::signatures::encode`] functions hand them back so
/// tests and tooling can inspect them.
///
/// # Error Categories
///
/// ## Stream Errors
/// - [`Error::OutOfBounds`] - A record needed more tokens than the stream holds
/// - [`Error::UnknownTag`] - A signature tag outside the known set
/// - [`Error::TrailingTokens`] - Tokens left over after the last record
///
/// ## Record Errors
/// - [`Error::InvalidRecord`] - Flags and shape disagree, or flags are not a valid kind
/// - [`Error::GenericParamOutOfRange`] - A method generic parameter beyond the record's arity
/// - [`Error::TypeIdOutOfRange`] - A type handle that has no raw encoding
/// - [`Error::Record`] - Any of the above, tagged with the offending record index
///
/// ## Catalog Errors
/// - [`Error::CountMismatch`] - Name table, id space and decoded records disagree in length
///
/// # Examples
///
/// ```rust
/// use sigcatalog::{signatures::decode, Error};
///
/// // A single method record that ends before its return type
/// match decode(&[0x0001, 0x000E, 0x0000, 0x0000], 1) {
///     Err(Error::Record { index, source }) => {
///         assert_eq!(index, 0);
///         assert!(matches!(*source, Error::OutOfBounds { .. }));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The token stream or a record is damaged in a way no more specific variant covers.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A read past the end of the token stream was attempted.
    #[error("Out of bound read at token {position} of {len}")]
    OutOfBounds {
        /// Cursor position of the failed read
        position: usize,
        /// Total number of tokens in the stream
        len: usize,
    },

    /// A signature node started with a tag value the grammar does not define.
    #[error("Unknown signature tag 0x{tag:04X} at token {position}")]
    UnknownTag {
        /// The offending tag value
        tag: u16,
        /// Cursor position of the tag
        position: usize,
    },

    /// All requested records were decoded but the cursor did not land on the end of the stream.
    #[error("Decoded records consumed {consumed} tokens, stream holds {len}")]
    TrailingTokens {
        /// Tokens consumed by the requested records
        consumed: usize,
        /// Total number of tokens in the stream
        len: usize,
    },

    /// Two tables that must be index-aligned have different lengths.
    #[error("Expected {expected} entries, found {actual}")]
    CountMismatch {
        /// Length required by the id space
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// A record's flags or shape violate the record grammar.
    #[error("Invalid member record - {0}")]
    InvalidRecord(String),

    /// A `GenericMethodParam` index is not below the arity of its enclosing record.
    #[error("Generic method parameter !!{index} used in a member of arity {arity}")]
    GenericParamOutOfRange {
        /// The referenced generic parameter index
        index: u16,
        /// The arity of the enclosing record
        arity: u16,
    },

    /// A type id cannot be represented as a raw 16-bit handle.
    #[error("Type id {0} has no raw handle encoding")]
    TypeIdOutOfRange(u16),

    /// Recursion limit reached while walking nested signature nodes.
    ///
    /// The associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// A failure while decoding or encoding one specific record.
    #[error("Record {index}: {source}")]
    Record {
        /// 0-based position of the record in its stream
        index: usize,
        /// The underlying failure
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` with the index of the record being processed.
    ///
    /// Already-wrapped errors are returned unchanged so the innermost record index wins.
    #[must_use]
    pub fn in_record(self, index: usize) -> Self {
        match self {
            Error::Record { .. } => self,
            other => Error::Record {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through any [`Error::Record`] wrapper.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
