//! Bounds-checked cursor over a flat 16-bit token stream.
//!
//! This module provides [`crate::reader::TokenReader`], the cursor the record decoder walks the
//! catalog token tables with. Every read validates availability first and reports
//! [`crate::Error::OutOfBounds`] with the failing position, so a record that runs past the end
//! of its table can never silently wrap or read a neighbouring table.
//!
//! # Examples
//!
//! ```rust
//! use sigcatalog::TokenReader;
//!
//! let tokens = [0x0001, 0x000E, 0x0000];
//! let mut reader = TokenReader::new(&tokens);
//!
//! assert_eq!(reader.read()?, 0x0001);
//! assert_eq!(reader.peek()?, 0x000E);
//! assert_eq!(reader.pos(), 1);
//! assert_eq!(reader.remaining(), 2);
//! # Ok::<(), sigcatalog::Error>(())
//! ```

use crate::{Error, Result};

/// A cursor-based reader over a slice of `u16` tokens.
///
/// `TokenReader` maintains a single forward position. It never seeks backwards: the catalog
/// grammar is self-delimiting, so the only way to find where a record ends is to walk it.
pub struct TokenReader<'a> {
    /// The tokens being read
    data: &'a [u16],
    /// Current position within the token slice
    position: usize,
}

impl<'a> TokenReader<'a> {
    /// Create a new [`TokenReader`] positioned at the first token.
    ///
    /// # Arguments
    /// * `data` - The token slice to read from
    #[must_use]
    pub fn new(data: &'a [u16]) -> Self {
        TokenReader { data, position: 0 }
    }

    /// Returns the total number of tokens in the underlying slice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying slice holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if at least one unread token remains.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the cursor.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of tokens not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Read the token under the cursor and advance by one.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the cursor is already at the end.
    pub fn read(&mut self) -> Result<u16> {
        let value = self.peek()?;
        self.position += 1;
        Ok(value)
    }

    /// Read the token under the cursor without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the cursor is already at the end.
    pub fn peek(&self) -> Result<u16> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(Error::OutOfBounds {
                position: self.position,
                len: self.data.len(),
            })
    }

    /// Read a token used as a count and widen it for allocation.
    ///
    /// Counts that claim more entries than there are tokens left are rejected up front,
    /// since every entry occupies at least one token.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the count token is missing or larger than the
    /// remaining stream.
    pub fn read_count(&mut self) -> Result<usize> {
        let count = usize::from(self.read()?);
        if count > self.remaining() {
            return Err(Error::OutOfBounds {
                position: self.position + count,
                len: self.data.len(),
            });
        }

        Ok(count)
    }
}
