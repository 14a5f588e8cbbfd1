//! URL normalization and validation
//!
//! Everything here is purely syntactic; validation happens before any
//! network access.

mod domain;
mod normalize;

pub use domain::{brand_term, host_matches};
pub use normalize::{canonical_key, normalize_target, path_segment_count, AuditTarget};
