//! Plain-text rendering of the status and results views.

use podsum_core::{
    AppViewModel, PollPhase, ResultsViewModel, Route, StatusViewModel, SubmitError,
};

const RESET: &str = "\x1b[0m";

/// Terminal color for a palette entry. Unknown entries render uncolored.
fn ansi_for(color: &str) -> &'static str {
    match color {
        "#2563eb" => "\x1b[34m",
        "#db2777" => "\x1b[35m",
        "#059669" => "\x1b[32m",
        "#d97706" => "\x1b[33m",
        "#7c3aed" => "\x1b[95m",
        "#0891b2" => "\x1b[36m",
        _ => "",
    }
}

pub fn render(view: &AppViewModel) {
    match &view.route {
        Route::Home => render_home(view),
        Route::Status { .. } => {
            if let Some(status) = &view.status {
                render_status(status);
            }
        }
        Route::Results { .. } => {
            if let Some(results) = &view.results {
                render_results(results);
            }
        }
    }
}

fn render_home(view: &AppViewModel) {
    match &view.submission.error {
        Some(SubmitError::Validation(message)) => eprintln!("error: {message}"),
        Some(SubmitError::Transport(message)) => {
            eprintln!("error: {message}");
            if let Some(job_id) = &view.submission.job_id {
                // Upload succeeded; only the start call failed.
                eprintln!("job {job_id} was uploaded; rerun to retry processing");
            }
        }
        None if view.submission.busy => println!("submitting..."),
        None => {}
    }
}

fn render_status(status: &StatusViewModel) {
    println!("job {}", status.job_id);
    for row in &status.rows {
        let marker = if row.current {
            ">"
        } else if row.reached {
            "x"
        } else {
            " "
        };
        match &row.detail {
            Some(detail) => println!("  [{marker}] {} - {detail}", row.stage.label()),
            None => println!("  [{marker}] {}", row.stage.label()),
        }
    }
    match status.phase {
        PollPhase::Failed => {
            eprintln!("processing failed:");
            for error in &status.pipeline_errors {
                eprintln!("  - {error}");
            }
        }
        PollPhase::Errored => {
            let message = status.transport_error.as_deref().unwrap_or("unknown error");
            eprintln!("unable to fetch status: {message}");
        }
        _ => {}
    }
    println!();
}

fn render_results(results: &ResultsViewModel) {
    println!("results for job {}", results.job_id);

    if let Some(overview) = &results.overview {
        println!("\noverview:\n  {overview}");
    }
    if !results.key_points.is_empty() {
        println!("\nkey points:");
        for point in &results.key_points {
            println!("  - {point}");
        }
    }
    if !results.sections.is_empty() {
        println!("\nspeaker highlights:");
        for section in &results.sections {
            let color = ansi_for(section.color);
            println!("  {color}{}{RESET}:", section.speaker);
            for highlight in &section.highlights {
                println!("    - {highlight}");
            }
        }
    }
    if !results.turns.is_empty() {
        println!("\ntranscript:");
        for turn in &results.turns {
            let color = ansi_for(turn.color);
            println!(
                "  [{} - {}] {color}{}{RESET}: {}",
                format_offset(turn.start),
                format_offset(turn.end),
                turn.speaker,
                turn.text
            );
        }
    }
    if let Some(url) = &results.audio_url {
        println!("\naudio: {url}");
    }
    if let Some(url) = &results.summary_audio_url {
        println!("summary audio: {url}");
    }
}

/// Seconds offset rendered as `m:ss` (hours fold into minutes).
fn format_offset(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_offset;

    #[test]
    fn offsets_render_as_minutes_and_seconds() {
        assert_eq!(format_offset(0.0), "0:00");
        assert_eq!(format_offset(59.6), "1:00");
        assert_eq!(format_offset(61.2), "1:01");
        assert_eq!(format_offset(3605.0), "60:05");
        assert_eq!(format_offset(-3.0), "0:00");
    }
}
