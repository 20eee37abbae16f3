use crate::view_model::AppViewModel;
use crate::{compute_sequence, JobId, ResultsSnapshot, Stage, StatusSnapshot};

/// Client-side view identifier. Navigation is a state change observed by the
/// shell through the view model, never a side effect of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Status {
        job_id: JobId,
        enable_tts: bool,
    },
    Results {
        job_id: JobId,
    },
}

/// Poller lifecycle for one job view.
///
/// `Completed`, `Failed` and `Errored` are terminal: no further fetch is
/// issued once any of them is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    Polling,
    Completed,
    Failed,
    /// The fetch itself failed (network/HTTP); distinct from a backend
    /// pipeline failure and rendered differently.
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SubmissionPhase {
    #[default]
    Editing,
    Uploading,
    Starting,
}

/// Errors surfaced on the home view. Validation never reaches the network;
/// transport carries the failed operation's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Validation(String),
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SubmissionState {
    pub(crate) phase: SubmissionPhase,
    pub(crate) enable_tts: bool,
    /// Survives a failed `start` so a retry can skip the re-upload.
    pub(crate) job_id: Option<JobId>,
    pub(crate) error: Option<SubmitError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobViewState {
    pub(crate) job_id: JobId,
    /// Computed once on view entry; immutable for the view's lifetime.
    pub(crate) sequence: Vec<Stage>,
    pub(crate) phase: PollPhase,
    /// Copied from the app-level counter on entry; stale poll timers and
    /// late fetch replies carry an older value and are discarded.
    pub(crate) generation: u64,
    pub(crate) latest: Option<StatusSnapshot>,
    pub(crate) results: Option<ResultsSnapshot>,
    pub(crate) transport_error: Option<String>,
    /// Guards the one-time handoff to the results view.
    pub(crate) navigated: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) route: Route,
    pub(crate) submission: SubmissionState,
    pub(crate) job: Option<JobViewState>,
    pub(crate) generation: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> AppViewModel {
        crate::view_model::derive(self)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn dirty(&self) -> bool {
        self.dirty
    }

    /// Tears down any previous job view and starts polling `job_id`.
    /// Returns the generation the new view's fetches must carry.
    pub(crate) fn enter_job_view(&mut self, job_id: JobId, enable_tts: bool) -> u64 {
        self.generation += 1;
        self.route = Route::Status {
            job_id: job_id.clone(),
            enable_tts,
        };
        self.job = Some(JobViewState {
            job_id,
            sequence: compute_sequence(enable_tts),
            phase: PollPhase::Polling,
            generation: self.generation,
            latest: None,
            results: None,
            transport_error: None,
            navigated: false,
        });
        self.mark_dirty();
        self.generation
    }
}
