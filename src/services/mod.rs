//! Catalog services
//!
//! The reconciliation and validation logic built on top of the parsed
//! playlists and the loaded reference data.

pub mod blocklist;
pub mod channel_index;
pub mod reconciler;
pub mod report;
pub mod validation;

pub use blocklist::BlocklistMatcher;
pub use channel_index::ChannelIndex;
pub use reconciler::StreamReconciler;
pub use validation::{FileReport, ValidationEngine, ValidationSummary};
