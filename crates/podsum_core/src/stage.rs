/// A named step in the backend processing pipeline.
///
/// `Completed` and `Failed` are absorbing: once either is observed the poller
/// must not issue another fetch for that job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uploaded,
    Transcribing,
    Diarizing,
    Summarizing,
    Tts,
    Completed,
    Failed,
}

impl Stage {
    /// The lowercase name used by the backend wire protocol.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Uploaded => "uploaded",
            Stage::Transcribing => "transcribing",
            Stage::Diarizing => "diarizing",
            Stage::Summarizing => "summarizing",
            Stage::Tts => "tts",
            Stage::Completed => "completed",
            Stage::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Failed)
    }
}

const CANONICAL_ORDER: [Stage; 6] = [
    Stage::Uploaded,
    Stage::Transcribing,
    Stage::Diarizing,
    Stage::Summarizing,
    Stage::Tts,
    Stage::Completed,
];

/// The ordered stage list shown for one job view.
///
/// `Tts` is omitted when speech synthesis was disabled at submission time.
/// `Failed` never appears; failure is a separate terminal branch, not a
/// position in the progress sequence.
pub fn compute_sequence(enable_tts: bool) -> Vec<Stage> {
    CANONICAL_ORDER
        .iter()
        .copied()
        .filter(|stage| enable_tts || *stage != Stage::Tts)
        .collect()
}

/// Index of `current` within `sequence`.
///
/// A stage missing from the sequence (`Failed`, or `Tts` when excluded) maps
/// to the last index: an unrecognized stage never moves the displayed
/// progress backwards.
pub fn active_index(sequence: &[Stage], current: Stage) -> usize {
    sequence
        .iter()
        .position(|stage| *stage == current)
        .unwrap_or_else(|| sequence.len().saturating_sub(1))
}
