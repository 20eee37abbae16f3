//! PodSummarize job API: typed HTTP client for the backend pipeline.
mod client;
mod handle;
mod types;

pub use client::{ApiSettings, HttpJobApi, JobApi, TransportError, UploadSource};
pub use handle::{ApiEvent, ApiHandle};
pub use types::{
    ProcessRequest, ProcessResponse, ProcessingStatus, ResultsResponse, SpeakerTurn, Stage,
    SummaryResult, SummarySection, TranscriptResult, UploadResponse,
};
