// Port Layer - Interfaces for external dependencies

pub mod community_source;
pub mod probe;

// Re-exports
pub use community_source::{CommunitySource, ProbeError};
pub use probe::Probe;
