// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # sigcatalog
//!
//! Compact member-signature catalogs for .NET framework members.
//!
//! A compiler that targets the CLR needs to know the exact shape of a few hundred framework
//! members it calls implicitly: string concatenation, delegate combination, array helpers,
//! async state machine builders and so on. `sigcatalog` stores those shapes as a dense stream
//! of 16-bit tokens and decodes them once, on first use, into typed [`signatures::MemberRecord`]
//! values addressed by a closed enumeration of member ids.
//!
//! ## Architecture
//!
//! - [`typesystem`] - Type identifiers, split into a special and a well-known partition
//! - [`signatures`] - The record grammar: types, decoder, encoder and decoder configuration
//! - [`catalog`] - Once-built, id-indexed catalogs and the two shipped tables
//! - [`reader`] - The token cursor the decoder walks
//!
//! ## Quick Start
//!
//! ```rust
//! use sigcatalog::prelude::*;
//!
//! let exchange = WellKnownMember::InterlockedExchangeT.get_descriptor();
//! assert_eq!(exchange.arity, 1);
//! assert_eq!(exchange.parameters().len(), 2);
//!
//! let ctor = special_members().member(SpecialMember::StringCtorCharArray);
//! assert_eq!(ctor.to_string(), "void System.String::.ctor(char[])");
//! ```
//!
//! ## Decoding Custom Tables
//!
//! The decoder and encoder are public, so tooling can author and check its own tables:
//!
//! ```rust
//! use sigcatalog::prelude::*;
//!
//! let empty = MemberRecord::field(
//!     MemberFlags::STATIC,
//!     SpecialType::String.into(),
//!     SignatureNode::Direct(SpecialType::String.into()),
//! )?;
//! let tokens = encode(std::slice::from_ref(&empty))?;
//! assert_eq!(tokens, vec![0x0042, 20, 0, 0x40, 20]);
//! assert_eq!(decode(&tokens, 1)?, vec![empty]);
//! # Ok::<(), sigcatalog::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: catalog builds at `debug`, each decoded record
//! at `trace`, and a corrupt shipped table at `error` just before it panics. Install any
//! `log` backend to see them.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use sigcatalog::prelude::*;
///
/// let record = special_members().get(SpecialMember::ObjectToString);
/// assert!(record.is_virtual());
/// ```
pub mod prelude;

pub mod catalog;
pub mod reader;
pub mod signatures;
pub mod typesystem;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `sigcatalog` Error type
///
/// Every fallible operation of the crate reports one of these. Errors raised inside a record
/// are wrapped once in [`Error::Record`] so the failing entry can be located.
pub use error::Error;

/// Cursor over a token stream.
pub use reader::TokenReader;
