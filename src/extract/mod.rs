//! Turning provider pages into track lists

pub mod error;
pub mod json_tree;
pub mod patterns;

pub use json_tree::JsonTreeExtractor;
pub use patterns::{PatternExtractor, TrackPattern};
