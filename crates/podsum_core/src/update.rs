use crate::state::{SubmissionPhase, SubmitError};
use crate::{AppState, Effect, Msg, PollPhase, Route, Stage, SubmitSource, POLL_INTERVAL};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitRequested {
            file,
            url,
            enable_tts,
        } => {
            if state.submission.phase != SubmissionPhase::Editing {
                // A submission is already in flight.
                return (state, Vec::new());
            }
            let source = match validate_source(file, url) {
                Ok(source) => source,
                Err(message) => {
                    state.submission.error = Some(SubmitError::Validation(message));
                    state.mark_dirty();
                    return (state, Vec::new());
                }
            };
            state.submission.phase = SubmissionPhase::Uploading;
            state.submission.enable_tts = enable_tts;
            state.submission.error = None;
            state.mark_dirty();
            vec![Effect::UploadAudio { source }]
        }
        Msg::UploadFinished { result } => match result {
            Ok(job_id) => {
                state.submission.job_id = Some(job_id.clone());
                state.submission.phase = SubmissionPhase::Starting;
                state.mark_dirty();
                vec![Effect::StartProcessing {
                    job_id,
                    enable_tts: state.submission.enable_tts,
                }]
            }
            Err(message) => {
                state.submission.phase = SubmissionPhase::Editing;
                state.submission.error = Some(SubmitError::Transport(message));
                state.mark_dirty();
                Vec::new()
            }
        },
        Msg::StartFinished { job_id, result } => match result {
            Ok(()) => {
                let enable_tts = state.submission.enable_tts;
                state.submission = Default::default();
                let generation = state.enter_job_view(job_id.clone(), enable_tts);
                vec![Effect::FetchStatus { job_id, generation }]
            }
            Err(message) => {
                // The job exists server-side in `uploaded` stage; keep its id
                // so a retry of `start` alone stays possible.
                state.submission.phase = SubmissionPhase::Editing;
                state.submission.error = Some(SubmitError::Transport(message));
                state.mark_dirty();
                Vec::new()
            }
        },
        Msg::StatusViewEntered { job_id, enable_tts } => {
            let generation = state.enter_job_view(job_id.clone(), enable_tts);
            vec![Effect::FetchStatus { job_id, generation }]
        }
        Msg::PollDue { generation } => match &state.job {
            Some(job) if job.phase == PollPhase::Polling && job.generation == generation => {
                vec![Effect::FetchStatus {
                    job_id: job.job_id.clone(),
                    generation,
                }]
            }
            _ => Vec::new(),
        },
        Msg::StatusFetched {
            generation,
            snapshot,
            results,
        } => {
            let mut effects = Vec::new();
            let mut navigate_to = None;
            let mut applied = false;
            if let Some(job) = state.job.as_mut() {
                // Anything else is a stale reply from a torn-down view, or a
                // duplicate racing a terminal transition; absorbing states
                // stay absorbed.
                if job.generation == generation && job.phase == PollPhase::Polling {
                    let stage = snapshot.stage;
                    job.latest = Some(snapshot);
                    match stage {
                        Stage::Completed => {
                            job.phase = PollPhase::Completed;
                            job.results = Some(results);
                            if !job.navigated {
                                job.navigated = true;
                                navigate_to = Some(Route::Results {
                                    job_id: job.job_id.clone(),
                                });
                            }
                        }
                        Stage::Failed => {
                            job.phase = PollPhase::Failed;
                        }
                        _ => effects.push(Effect::SchedulePoll {
                            generation,
                            delay: POLL_INTERVAL,
                        }),
                    }
                    applied = true;
                }
            }
            if let Some(route) = navigate_to {
                state.route = route;
            }
            if applied {
                state.mark_dirty();
            }
            effects
        }
        Msg::StatusFetchFailed {
            generation,
            message,
        } => {
            let mut applied = false;
            if let Some(job) = state.job.as_mut() {
                if job.generation == generation && job.phase == PollPhase::Polling {
                    job.phase = PollPhase::Errored;
                    job.transport_error = Some(message);
                    applied = true;
                }
            }
            if applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewClosed => {
            if state.job.take().is_some() {
                // Invalidate any in-flight fetch or pending timer.
                state.generation += 1;
                state.route = Route::Home;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn validate_source(file: Option<String>, url: Option<String>) -> Result<SubmitSource, String> {
    let file = file.filter(|path| !path.trim().is_empty());
    let url = url.filter(|url| !url.trim().is_empty());
    match (file, url) {
        (Some(path), _) => Ok(SubmitSource::File { path }),
        (None, Some(raw)) => {
            let trimmed = raw.trim().to_owned();
            url::Url::parse(&trimmed).map_err(|err| format!("invalid podcast URL: {err}"))?;
            Ok(SubmitSource::RemoteUrl { url: trimmed })
        }
        (None, None) => Err("provide an audio file or a podcast URL".to_owned()),
    }
}
