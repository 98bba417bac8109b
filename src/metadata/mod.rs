//! Critic-rating metadata enrichment.
//!
//! The enrichment flow has three layers: [`fingerprint`] decides whether a
//! refresh needs to run at all, [`resolver`] maps a local item to a remote
//! catalog record, and [`enrichment`] drives one refresh attempt end to end
//! and writes the result back onto the item.

pub mod enrichment;
pub mod fingerprint;
pub mod resolver;
