// Application Layer - Use Cases and Business Logic

pub mod cancel;
pub mod constants;
pub mod poller;
pub mod probe;

// Re-exports
pub use cancel::{cancel_channel, CancelSender, CancelToken};
pub use poller::{poll_until_true, PollConfig};
pub use probe::ExistenceProbe;
