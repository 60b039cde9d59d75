// Poll constants (No magic values)
// These are defaults for callers; the poller itself takes everything from PollConfig.
use std::time::Duration;

/// Default spacing between probe attempts (15s)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Default maximum total wait, in minutes, for the `exists` command
pub const DEFAULT_TIMELIMIT_MINUTES: u64 = 4;
