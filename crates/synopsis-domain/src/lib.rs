//! Synopsis Domain Layer
//!
//! This crate contains the core domain model for Synopsis. It has ZERO
//! external dependencies and defines the concepts and trait interfaces that
//! every other crate in the workspace builds on.
//!
//! ## Key Concepts
//!
//! - **Row**: one document's filename and its optional summary
//! - **Ledger**: the ordered set of rows tracking summarization progress
//! - **DocumentKind**: the document formats Synopsis knows how to read
//! - **ChatMessage**: one turn of a chat exchange sent to a language model
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod ledger;
pub mod message;
pub mod row;
pub mod traits;

// Re-exports for convenience
pub use document::{DocumentKind, SUPPORTED_EXTENSIONS};
pub use ledger::{Ledger, LedgerStats, LedgerViolation};
pub use message::{ChatMessage, Role};
pub use row::{Row, PLACEHOLDER_SUMMARY};
