use std::collections::BTreeMap;

use crate::Stage;

pub type JobId = String;

/// One server-reported status observation. Never mutated locally; each poll
/// replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub job_id: JobId,
    pub stage: Stage,
    pub detail: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Accumulated pipeline errors; the server only ever appends.
    pub errors: Vec<String>,
    pub assets: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    pub language: Option<String>,
    pub duration: Option<f64>,
    pub turns: Vec<SpeakerTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub speaker: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub overview: String,
    pub per_speaker: Vec<SummarySection>,
    pub key_points: Vec<String>,
}

/// Terminal data carried alongside the status once the job completes.
/// Fields stay empty until the backend has produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsSnapshot {
    pub transcript: Option<Transcript>,
    pub summary: Option<Summary>,
    pub audio_url: Option<String>,
    pub summary_audio_url: Option<String>,
}
