use std::time::Duration;

use crate::JobId;

/// Delay between the completion of one poll and the start of the next.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadAudio { source: SubmitSource },
    StartProcessing { job_id: JobId, enable_tts: bool },
    FetchStatus { job_id: JobId, generation: u64 },
    SchedulePoll { generation: u64, delay: Duration },
}

/// What the user supplied on the home form. Exactly one alternative; the
/// update function rejects empty submissions before any effect is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitSource {
    File { path: String },
    RemoteUrl { url: String },
}
