mod effects;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use podsum_api::ApiSettings;
use podsum_core::{update, AppState, Msg, PollPhase};

use effects::EffectRunner;

#[derive(Debug, Parser)]
#[command(name = "podsum", about = "Submit podcasts for processing and track them to completion")]
struct Cli {
    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a podcast (file or URL), start processing, and watch it.
    Submit {
        /// Path to a local audio file.
        file: Option<PathBuf>,
        /// Public URL of the podcast audio.
        #[arg(long)]
        url: Option<String>,
        /// Also synthesize a spoken summary.
        #[arg(long)]
        tts: bool,
    },
    /// Watch an existing job's progress.
    Watch {
        job_id: String,
        /// Whether the job was started with speech synthesis; controls the
        /// stage list shown.
        #[arg(long)]
        tts: bool,
    },
    /// Fetch and render the results of a completed job.
    Results { job_id: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(logging::LogDestination::File);

    let initial = match cli.command {
        Command::Submit { file, url, tts } => Msg::SubmitRequested {
            file: file.map(|path| path.display().to_string()),
            url,
            enable_tts: tts,
        },
        Command::Watch { job_id, tts } => Msg::StatusViewEntered {
            job_id,
            enable_tts: tts,
        },
        // A completed job ignores the stage list; show the full one.
        Command::Results { job_id } => Msg::StatusViewEntered {
            job_id,
            enable_tts: true,
        },
    };

    let settings = ApiSettings {
        base_url: cli.server,
        ..ApiSettings::default()
    };

    let code = run(initial, settings)?;
    std::process::exit(code);
}

/// Drives the core state machine until a terminal phase is reached.
fn run(initial: Msg, settings: ApiSettings) -> anyhow::Result<i32> {
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, msg_tx.clone()).context("connecting to backend")?;
    msg_tx.send(initial).expect("receiver alive");

    let mut state = AppState::new();
    loop {
        let msg = msg_rx.recv().context("message channel closed")?;
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            let view = state.view();
            render::render(&view);
            if let Some(code) = exit_code(&view) {
                return Ok(code);
            }
        }
    }
}

/// Terminal phases end the process; everything else keeps the loop alive.
fn exit_code(view: &podsum_core::AppViewModel) -> Option<i32> {
    if let Some(status) = &view.status {
        return match status.phase {
            PollPhase::Completed => Some(0),
            PollPhase::Failed => Some(1),
            PollPhase::Errored => Some(2),
            PollPhase::Idle | PollPhase::Polling => None,
        };
    }
    // Submission error with nothing in flight: nothing further will happen.
    if !view.submission.busy && view.submission.error.is_some() {
        return Some(1);
    }
    None
}
