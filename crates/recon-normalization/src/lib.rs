//! Pure, deterministic per-field normalizers.

pub mod adherence;
pub mod identifier;

pub use adherence::{AdherenceBucket, bucket_adherence, parse_percentage};
pub use identifier::{CANONICAL_ID_LENGTH, clean_identifier, is_canonical_identifier};
