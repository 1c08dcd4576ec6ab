//! Decoder configuration
//!
//! The checks that keep a decode from going out of sync with the token stream (bounds,
//! unknown tags, the final cursor position) are part of the grammar and always run. This
//! configuration only controls the semantic record checks layered on top of them.

/// Deepest signature node a record may hold by default, counting a leaf as depth 1
///
/// [`crate::signatures::MemberRecord::validate`] enforces the same bound, so every record the
/// encoder accepts decodes again under [`DecoderConfig::default`].
pub const MAX_NESTING_DEPTH: usize = 64;

/// Configuration for [`crate::signatures::decode_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting depth of a single signature node (default: 64)
    pub max_nesting_depth: usize,

    /// Reject `GenericMethodParam(i)` nodes with `i >= arity` of the enclosing record
    pub enable_arity_validation: bool,

    /// Reject unknown flag bits, a kind that is not exactly one bit, and a misplaced self type
    pub enable_record_validation: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
            enable_arity_validation: true,
            enable_record_validation: true,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration with every record check enabled
    ///
    /// This is what [`crate::catalog::Catalog::build`] uses.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Creates a configuration that only enforces the grammar itself
    ///
    /// Useful for inspecting damaged tables: records decode as long as the token structure
    /// is intact, even if their flags or generic parameters are inconsistent.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
            enable_arity_validation: false,
            enable_record_validation: false,
        }
    }
}
