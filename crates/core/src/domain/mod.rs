// Domain Layer - Poll session state and remote records

pub mod community;
pub mod error;
pub mod session;

// Re-exports
pub use community::{CommunitiesResponse, CommunityRecord};
pub use error::DomainError;
pub use session::{PollSession, PollState};
