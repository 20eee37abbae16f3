use std::collections::BTreeMap;

use podsum_core::{
    speaker_color, unique_speakers, update, AppState, Msg, ResultsSnapshot, SpeakerTurn, Stage,
    StatusSnapshot, Summary, SummarySection, Transcript, SPEAKER_PALETTE,
};

fn turn(speaker: &str, start: f64, text: &str) -> SpeakerTurn {
    SpeakerTurn {
        speaker: speaker.to_string(),
        start,
        end: start + 5.0,
        text: text.to_string(),
    }
}

#[test]
fn unique_speakers_keeps_first_appearance_order() {
    let turns = vec![
        turn("A", 0.0, "hello"),
        turn("B", 5.0, "hi"),
        turn("A", 10.0, "so"),
        turn("C", 15.0, "anyway"),
    ];
    assert_eq!(unique_speakers(&turns), vec!["A", "B", "C"]);
}

#[test]
fn speaker_colors_are_deterministic_across_calls() {
    let speakers = vec!["A".to_string(), "B".to_string(), "C".to_string()];

    let first = speaker_color(&speakers, "A", 0);
    let again = speaker_color(&speakers, "A", 2);
    assert_eq!(first, again, "same speaker, same color, any turn index");
    assert_eq!(first, SPEAKER_PALETTE[0]);
    assert_eq!(speaker_color(&speakers, "B", 1), SPEAKER_PALETTE[1]);
    assert_eq!(speaker_color(&speakers, "C", 3), SPEAKER_PALETTE[2]);
}

#[test]
fn palette_cycles_when_speakers_outnumber_it() {
    let speakers: Vec<String> = (0..SPEAKER_PALETTE.len() + 2)
        .map(|index| format!("S{index}"))
        .collect();

    let wrapped = speaker_color(&speakers, &speakers[SPEAKER_PALETTE.len()], 0);
    assert_eq!(wrapped, SPEAKER_PALETTE[0]);
}

#[test]
fn unknown_speaker_falls_back_to_turn_index() {
    let speakers = vec!["A".to_string()];
    assert_eq!(speaker_color(&speakers, "ghost", 4), SPEAKER_PALETTE[4]);
    assert_eq!(
        speaker_color(&speakers, "ghost", SPEAKER_PALETTE.len()),
        SPEAKER_PALETTE[0]
    );
}

#[test]
fn results_view_ties_transcript_and_sections_to_one_palette() {
    let state = AppState::new();
    let (state, effects) = update(
        state,
        Msg::StatusViewEntered {
            job_id: "j1".to_string(),
            enable_tts: false,
        },
    );
    let generation = match effects.as_slice() {
        [podsum_core::Effect::FetchStatus { generation, .. }] => *generation,
        other => panic!("expected FetchStatus, got {other:?}"),
    };

    let results = ResultsSnapshot {
        transcript: Some(Transcript {
            language: Some("en".to_string()),
            duration: Some(120.0),
            turns: vec![
                turn("A", 0.0, "welcome"),
                turn("B", 5.0, "thanks"),
                turn("A", 10.0, "today"),
            ],
        }),
        summary: Some(Summary {
            overview: "Two hosts talk.".to_string(),
            per_speaker: vec![
                SummarySection {
                    speaker: "B".to_string(),
                    highlights: vec!["guest intro".to_string()],
                },
                SummarySection {
                    speaker: "A".to_string(),
                    highlights: vec!["opening".to_string()],
                },
            ],
            key_points: vec!["a podcast happened".to_string()],
        }),
        audio_url: Some("/files/j1/audio".to_string()),
        summary_audio_url: None,
    };
    let (state, _) = update(
        state,
        Msg::StatusFetched {
            generation,
            snapshot: StatusSnapshot {
                job_id: "j1".to_string(),
                stage: Stage::Completed,
                detail: None,
                created_at: "2026-01-05T10:00:00+00:00".to_string(),
                updated_at: "2026-01-05T10:04:00+00:00".to_string(),
                errors: Vec::new(),
                assets: BTreeMap::new(),
            },
            results,
        },
    );

    let view = state.view().results.expect("results view model");
    assert_eq!(view.overview.as_deref(), Some("Two hosts talk."));
    assert_eq!(view.key_points, vec!["a podcast happened".to_string()]);

    // Speaker colors come from transcript first-appearance order, so the
    // sections (listed B before A) still match the transcript turns.
    let color_of = |label: &str| {
        view.speakers
            .iter()
            .find(|speaker| speaker.label == label)
            .expect("speaker present")
            .color
    };
    assert_eq!(color_of("A"), SPEAKER_PALETTE[0]);
    assert_eq!(color_of("B"), SPEAKER_PALETTE[1]);

    for section in &view.sections {
        assert_eq!(section.color, color_of(&section.speaker));
    }
    for turn_view in &view.turns {
        assert_eq!(turn_view.color, color_of(&turn_view.speaker));
    }
    assert_eq!(view.audio_url.as_deref(), Some("/files/j1/audio"));
}

#[test]
fn polling_a_completed_job_twice_yields_identical_results() {
    // Idempotence: applying the same completed payload to two fresh views
    // derives the same view model both times.
    let build = || {
        let (state, effects) = update(
            AppState::new(),
            Msg::StatusViewEntered {
                job_id: "j1".to_string(),
                enable_tts: true,
            },
        );
        let generation = match effects.as_slice() {
            [podsum_core::Effect::FetchStatus { generation, .. }] => *generation,
            other => panic!("expected FetchStatus, got {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::StatusFetched {
                generation,
                snapshot: StatusSnapshot {
                    job_id: "j1".to_string(),
                    stage: Stage::Completed,
                    detail: None,
                    created_at: "2026-01-05T10:00:00+00:00".to_string(),
                    updated_at: "2026-01-05T10:04:00+00:00".to_string(),
                    errors: Vec::new(),
                    assets: BTreeMap::new(),
                },
                results: ResultsSnapshot {
                    transcript: Some(Transcript {
                        language: None,
                        duration: None,
                        turns: vec![turn("A", 0.0, "hello")],
                    }),
                    summary: None,
                    audio_url: None,
                    summary_audio_url: None,
                },
            },
        );
        state.view().results.expect("results view model")
    };

    assert_eq!(build(), build());
}
