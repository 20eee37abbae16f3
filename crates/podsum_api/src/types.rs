//! Wire types for the backend HTTP contract. Field names are the interop
//! contract and must not be renamed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Uploaded,
    Transcribing,
    Diarizing,
    Summarizing,
    Tts,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStatus {
    pub job_id: String,
    pub stage: Stage,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub assets: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub language: Option<String>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub turns: Vec<SpeakerTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub speaker: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub overview: String,
    #[serde(default)]
    pub per_speaker: Vec<SummarySection>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub job_id: String,
    pub status: ProcessingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub job_id: String,
    pub enable_tts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub job_id: String,
    pub status: ProcessingStatus,
}

/// Unified shape served by `GET /results/{job_id}` for both in-progress
/// polling and final results; callers inspect `status.stage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub job_id: String,
    pub status: ProcessingStatus,
    pub transcript: Option<TranscriptResult>,
    pub summary: Option<SummaryResult>,
    pub audio_url: Option<String>,
    pub summary_audio_url: Option<String>,
}
