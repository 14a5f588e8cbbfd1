//! Score aggregation

mod composite;

pub use composite::{composite_score, CategoryScore, CompositeScore};
