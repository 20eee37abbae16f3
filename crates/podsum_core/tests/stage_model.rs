use podsum_core::{active_index, compute_sequence, Stage};

#[test]
fn sequence_with_tts_contains_all_six_stages_in_order() {
    let sequence = compute_sequence(true);
    assert_eq!(
        sequence,
        vec![
            Stage::Uploaded,
            Stage::Transcribing,
            Stage::Diarizing,
            Stage::Summarizing,
            Stage::Tts,
            Stage::Completed,
        ]
    );
}

#[test]
fn sequence_without_tts_skips_only_the_tts_stage() {
    let sequence = compute_sequence(false);
    assert_eq!(
        sequence,
        vec![
            Stage::Uploaded,
            Stage::Transcribing,
            Stage::Diarizing,
            Stage::Summarizing,
            Stage::Completed,
        ]
    );
}

#[test]
fn sequence_never_contains_failed() {
    for enable_tts in [true, false] {
        assert!(!compute_sequence(enable_tts).contains(&Stage::Failed));
    }
}

#[test]
fn active_index_matches_position_for_present_stages() {
    for enable_tts in [true, false] {
        let sequence = compute_sequence(enable_tts);
        for (position, stage) in sequence.iter().enumerate() {
            assert_eq!(active_index(&sequence, *stage), position);
        }
    }
}

#[test]
fn absent_stages_map_to_the_last_index() {
    let sequence = compute_sequence(false);
    let last = sequence.len() - 1;

    // Failed is never part of a sequence; tts was excluded above.
    assert_eq!(active_index(&sequence, Stage::Failed), last);
    assert_eq!(active_index(&sequence, Stage::Tts), last);
}
