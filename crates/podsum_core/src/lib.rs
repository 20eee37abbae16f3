//! PodSummarize core: pure job-tracking state machine and view-model helpers.
mod effect;
mod msg;
mod snapshot;
mod stage;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SubmitSource, POLL_INTERVAL};
pub use msg::Msg;
pub use snapshot::{
    JobId, ResultsSnapshot, SpeakerTurn, StatusSnapshot, Summary, SummarySection, Transcript,
};
pub use stage::{active_index, compute_sequence, Stage};
pub use state::{AppState, JobViewState, PollPhase, Route, SubmitError};
pub use update::update;
pub use view_model::{
    speaker_color, unique_speakers, AppViewModel, ResultsViewModel, SectionView, SpeakerView,
    StageRowView, StatusViewModel, SubmissionViewModel, TurnView, SPEAKER_PALETTE,
};
