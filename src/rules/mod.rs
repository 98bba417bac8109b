//! Declarative stream-compatibility rules.
//!
//! Profiles describe what a playback device accepts. Matching policy (hard
//! filter vs. preference) lives with the caller; this module only evaluates
//! the individual comparisons.

pub mod condition;

pub use condition::{CodecProfile, CodecType, ConditionProperty, ConditionType, ProfileCondition};
