use crate::{JobId, ResultsSnapshot, StatusSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the home form with a file path and/or a podcast URL.
    SubmitRequested {
        file: Option<String>,
        url: Option<String>,
        enable_tts: bool,
    },
    /// The upload call resolved; `Err` carries the transport message.
    UploadFinished { result: Result<JobId, String> },
    /// The start-processing call resolved for an already-uploaded job.
    StartFinished {
        job_id: JobId,
        result: Result<(), String>,
    },
    /// Status view entered: after submission, or independently via a direct
    /// link or reload (which is why `enable_tts` travels with it).
    StatusViewEntered { job_id: JobId, enable_tts: bool },
    /// The poll interval elapsed for the given poll generation.
    PollDue { generation: u64 },
    /// A status fetch resolved. `results` fields are empty until the backend
    /// has produced them.
    StatusFetched {
        generation: u64,
        snapshot: StatusSnapshot,
        results: ResultsSnapshot,
    },
    /// A status fetch failed at the transport level (network/HTTP).
    StatusFetchFailed { generation: u64, message: String },
    /// The job view is being torn down; late replies must be discarded.
    ViewClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}
