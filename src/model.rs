//! Record Model
//!
//! The two value types that travel through a transfer: the [`Scope`] that says where
//! variables live, and the [`Variable`] records themselves, together with the
//! normalization and portable-record rules that let an export from one process be
//! read back by an independent import process.

pub mod scope;
pub mod variable;

pub use scope::{normalize_base_url, normalize_scope, RawScope, Scope, ScopeTarget};
pub use variable::{
    decode_transfer_stream, decode_variable, encode_variable, PortableRecord, Variable,
    WILDCARD_ENVIRONMENT,
};
