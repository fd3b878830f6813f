#![deny(unsafe_code)]

//! Reference lookups, the matching oracle, and per-field resolvers.

pub mod chat;
pub mod index;
pub mod oracle;
pub mod reply;
pub mod resolvers;

pub use chat::{ChatOracle, OracleConfig};
pub use index::ReferenceIndex;
pub use oracle::{DisabledOracle, MatchKind, MatchingOracle, OracleError};
pub use reply::extract_mapped_value;
pub use resolvers::{resolve_adherence, resolve_affiliation, resolve_drug_name, resolve_identifier};
