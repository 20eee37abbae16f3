use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use podsum_api::{ApiEvent, ApiHandle, ApiSettings, ResultsResponse, TransportError, UploadSource};
use podsum_core::{Effect, Msg, ResultsSnapshot, StatusSnapshot, SubmitSource};

/// Executes core effects against the API handle and feeds completions back
/// into the message loop.
pub struct EffectRunner {
    api: ApiHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, TransportError> {
        let api = ApiHandle::new(settings)?;
        let runner = Self { api, msg_tx };
        runner.spawn_event_pump();
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadAudio { source } => match load_source(source) {
                    Ok(upload) => {
                        client_info!("uploading podcast");
                        self.api.upload(upload);
                    }
                    Err(message) => {
                        // Local read failure; surfaced like any upload failure.
                        let _ = self.msg_tx.send(Msg::UploadFinished {
                            result: Err(message),
                        });
                    }
                },
                Effect::StartProcessing { job_id, enable_tts } => {
                    client_info!("starting pipeline job_id={} tts={}", job_id, enable_tts);
                    self.api.start(job_id, enable_tts);
                }
                Effect::FetchStatus { job_id, generation } => {
                    self.api.fetch_status(job_id, generation);
                }
                Effect::SchedulePoll { generation, delay } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = tx.send(Msg::PollDue { generation });
                    });
                }
            }
        }
    }

    fn spawn_event_pump(&self) {
        let api = self.api.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = api.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn load_source(source: SubmitSource) -> Result<UploadSource, String> {
    match source {
        SubmitSource::File { path } => {
            let bytes =
                fs::read(&path).map_err(|err| format!("could not read {path}: {err}"))?;
            let file_name = Path::new(&path)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("audio")
                .to_owned();
            Ok(UploadSource::File { file_name, bytes })
        }
        SubmitSource::RemoteUrl { url } => Ok(UploadSource::RemoteUrl { url }),
    }
}

fn map_stage(stage: podsum_api::Stage) -> podsum_core::Stage {
    match stage {
        podsum_api::Stage::Uploaded => podsum_core::Stage::Uploaded,
        podsum_api::Stage::Transcribing => podsum_core::Stage::Transcribing,
        podsum_api::Stage::Diarizing => podsum_core::Stage::Diarizing,
        podsum_api::Stage::Summarizing => podsum_core::Stage::Summarizing,
        podsum_api::Stage::Tts => podsum_core::Stage::Tts,
        podsum_api::Stage::Completed => podsum_core::Stage::Completed,
        podsum_api::Stage::Failed => podsum_core::Stage::Failed,
    }
}

fn map_status(status: podsum_api::ProcessingStatus) -> StatusSnapshot {
    StatusSnapshot {
        job_id: status.job_id,
        stage: map_stage(status.stage),
        detail: status.detail,
        created_at: status.created_at.to_rfc3339(),
        updated_at: status.updated_at.to_rfc3339(),
        errors: status.errors,
        assets: status.assets.into_iter().collect::<BTreeMap<_, _>>(),
    }
}

fn map_results(response: ResultsResponse) -> (StatusSnapshot, ResultsSnapshot) {
    let snapshot = map_status(response.status);
    let results = ResultsSnapshot {
        transcript: response.transcript.map(|transcript| podsum_core::Transcript {
            language: transcript.language,
            duration: transcript.duration,
            turns: transcript
                .turns
                .into_iter()
                .map(|turn| podsum_core::SpeakerTurn {
                    speaker: turn.speaker,
                    start: turn.start,
                    end: turn.end,
                    text: turn.text,
                })
                .collect(),
        }),
        summary: response.summary.map(|summary| podsum_core::Summary {
            overview: summary.overview,
            per_speaker: summary
                .per_speaker
                .into_iter()
                .map(|section| podsum_core::SummarySection {
                    speaker: section.speaker,
                    highlights: section.highlights,
                })
                .collect(),
            key_points: summary.key_points,
        }),
        audio_url: response.audio_url,
        summary_audio_url: response.summary_audio_url,
    };
    (snapshot, results)
}

pub(crate) fn map_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::UploadFinished { result } => Msg::UploadFinished {
            result: result
                .map(|response| response.job_id)
                .map_err(|err| err.to_string()),
        },
        ApiEvent::StartFinished { job_id, result } => Msg::StartFinished {
            job_id,
            result: result.map(|_| ()).map_err(|err| err.to_string()),
        },
        ApiEvent::StatusFetched { generation, result } => match result {
            Ok(response) => {
                let (snapshot, results) = map_results(response);
                Msg::StatusFetched {
                    generation,
                    snapshot,
                    results,
                }
            }
            Err(err) => {
                client_warn!("status fetch failed: {}", err);
                Msg::StatusFetchFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podsum_api::ProcessingStatus;

    fn status(stage: podsum_api::Stage) -> ProcessingStatus {
        ProcessingStatus {
            job_id: "j1".to_string(),
            stage,
            detail: Some("working".to_string()),
            created_at: "2026-01-05T10:00:00Z".parse().expect("timestamp"),
            updated_at: "2026-01-05T10:00:07Z".parse().expect("timestamp"),
            errors: vec!["ffmpeg decode error".to_string()],
            assets: [("audio".to_string(), "/files/j1/audio".to_string())]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn status_maps_onto_core_snapshot() {
        let snapshot = map_status(status(podsum_api::Stage::Diarizing));

        assert_eq!(snapshot.job_id, "j1");
        assert_eq!(snapshot.stage, podsum_core::Stage::Diarizing);
        assert_eq!(snapshot.detail.as_deref(), Some("working"));
        assert_eq!(snapshot.created_at, "2026-01-05T10:00:00+00:00");
        assert_eq!(snapshot.errors, vec!["ffmpeg decode error".to_string()]);
        assert_eq!(
            snapshot.assets.get("audio").map(String::as_str),
            Some("/files/j1/audio")
        );
    }

    #[test]
    fn fetch_failure_maps_onto_transport_message() {
        let msg = map_event(ApiEvent::StatusFetched {
            generation: 4,
            result: Err(TransportError::Timeout),
        });

        assert_eq!(
            msg,
            Msg::StatusFetchFailed {
                generation: 4,
                message: "request timed out".to_string(),
            }
        );
    }

    #[test]
    fn missing_file_becomes_an_upload_error() {
        let err = load_source(SubmitSource::File {
            path: "/definitely/not/here.mp3".to_string(),
        })
        .unwrap_err();

        assert!(err.contains("/definitely/not/here.mp3"));
    }
}
