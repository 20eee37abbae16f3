use crate::state::SubmissionPhase;
use crate::{
    active_index, AppState, JobId, PollPhase, ResultsSnapshot, Route, SpeakerTurn, Stage,
    SubmitError,
};

/// Fixed speaker palette, cycled in first-appearance order. Keeping the
/// assignment deterministic is what makes a speaker's color match between
/// the transcript and the per-speaker summary sections.
pub const SPEAKER_PALETTE: [&str; 6] = [
    "#2563eb", "#db2777", "#059669", "#d97706", "#7c3aed", "#0891b2",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub submission: SubmissionViewModel,
    pub status: Option<StatusViewModel>,
    pub results: Option<ResultsViewModel>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionViewModel {
    /// An upload or start call is in flight.
    pub busy: bool,
    pub error: Option<SubmitError>,
    /// Set once upload succeeded; kept after a failed start for retry.
    pub job_id: Option<JobId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusViewModel {
    pub job_id: JobId,
    pub phase: PollPhase,
    pub rows: Vec<StageRowView>,
    /// Backend-reported pipeline errors, rendered verbatim as a list.
    pub pipeline_errors: Vec<String>,
    /// Client/network failure, kept visually distinct from pipeline errors.
    pub transport_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRowView {
    pub stage: Stage,
    pub reached: bool,
    pub current: bool,
    /// Status detail text, attached only to the current row.
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsViewModel {
    pub job_id: JobId,
    pub overview: Option<String>,
    pub key_points: Vec<String>,
    pub speakers: Vec<SpeakerView>,
    pub turns: Vec<TurnView>,
    pub sections: Vec<SectionView>,
    pub audio_url: Option<String>,
    pub summary_audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerView {
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnView {
    pub speaker: String,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub speaker: String,
    pub color: &'static str,
    pub highlights: Vec<String>,
}

/// Distinct speaker labels in first-appearance order (stable de-duplication).
pub fn unique_speakers(turns: &[SpeakerTurn]) -> Vec<String> {
    let mut speakers = Vec::new();
    for turn in turns {
        if !speakers.iter().any(|known| known == &turn.speaker) {
            speakers.push(turn.speaker.clone());
        }
    }
    speakers
}

/// Palette color for `speaker`, indexed by its first-appearance position.
/// A speaker missing from the de-duplicated list (should not occur) falls
/// back to the raw turn index so rendering still produces a stable color.
pub fn speaker_color(speakers: &[String], speaker: &str, turn_index: usize) -> &'static str {
    let index = speakers
        .iter()
        .position(|known| known == speaker)
        .unwrap_or(turn_index);
    SPEAKER_PALETTE[index % SPEAKER_PALETTE.len()]
}

pub(crate) fn derive(state: &AppState) -> AppViewModel {
    let status = state.job.as_ref().map(|job| {
        let current = job.latest.as_ref().map(|snapshot| snapshot.stage);
        let reached_through = current.map(|stage| active_index(&job.sequence, stage));
        let rows = job
            .sequence
            .iter()
            .enumerate()
            .map(|(index, stage)| {
                let is_current = current == Some(*stage);
                StageRowView {
                    stage: *stage,
                    reached: reached_through.is_some_and(|through| index <= through),
                    current: is_current,
                    detail: if is_current {
                        job.latest.as_ref().and_then(|s| s.detail.clone())
                    } else {
                        None
                    },
                }
            })
            .collect();
        StatusViewModel {
            job_id: job.job_id.clone(),
            phase: job.phase,
            rows,
            pipeline_errors: job
                .latest
                .as_ref()
                .map(|snapshot| snapshot.errors.clone())
                .unwrap_or_default(),
            transport_error: job.transport_error.clone(),
        }
    });

    let results = state.job.as_ref().and_then(|job| {
        job.results
            .as_ref()
            .map(|payload| derive_results(job.job_id.clone(), payload))
    });

    AppViewModel {
        route: state.route.clone(),
        submission: SubmissionViewModel {
            busy: state.submission.phase != SubmissionPhase::Editing,
            error: state.submission.error.clone(),
            job_id: state.submission.job_id.clone(),
        },
        status,
        results,
        dirty: state.dirty(),
    }
}

fn derive_results(job_id: JobId, payload: &ResultsSnapshot) -> ResultsViewModel {
    let turns = payload
        .transcript
        .as_ref()
        .map(|transcript| transcript.turns.as_slice())
        .unwrap_or_default();
    let speakers = unique_speakers(turns);

    let turn_views = turns
        .iter()
        .enumerate()
        .map(|(index, turn)| TurnView {
            speaker: turn.speaker.clone(),
            color: speaker_color(&speakers, &turn.speaker, index),
            start: turn.start,
            end: turn.end,
            text: turn.text.clone(),
        })
        .collect();

    let (overview, key_points, sections) = match payload.summary.as_ref() {
        Some(summary) => {
            let sections = summary
                .per_speaker
                .iter()
                .enumerate()
                .map(|(index, section)| SectionView {
                    speaker: section.speaker.clone(),
                    color: speaker_color(&speakers, &section.speaker, index),
                    highlights: section.highlights.clone(),
                })
                .collect();
            (
                Some(summary.overview.clone()),
                summary.key_points.clone(),
                sections,
            )
        }
        None => (None, Vec::new(), Vec::new()),
    };

    ResultsViewModel {
        job_id,
        overview,
        key_points,
        speakers: speakers
            .iter()
            .enumerate()
            .map(|(index, label)| SpeakerView {
                label: label.clone(),
                color: SPEAKER_PALETTE[index % SPEAKER_PALETTE.len()],
            })
            .collect(),
        turns: turn_views,
        sections,
        audio_url: payload.audio_url.clone(),
        summary_audio_url: payload.summary_audio_url.clone(),
    }
}
