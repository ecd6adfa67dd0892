//! Flujo Core Types and Definitions
//!
//! This crate provides the foundational types for the Flujo flow language:
//!
//! - **Document**: the output document model, serialized with the exact
//!   field names the downstream messaging platform expects ([`document`] module)
//! - **Slugs**: stable identifier derivation from free-form text ([`slug`] module)
//! - **Vocabulary**: the keyword table shared by the grammar and any tooling
//!   that needs the same word list, such as editor autocompletion ([`vocab`] module)

pub mod document;
pub mod slug;
pub mod vocab;
