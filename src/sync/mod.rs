//! Record assembly and submission to the task service

mod record;
mod submitter;

pub use record::{SyncRecord, TaskAssignment};
pub use submitter::{HttpSyncTransport, SyncError, SyncSubmitter, SyncTransport};

#[cfg(test)]
pub use submitter::fake;
