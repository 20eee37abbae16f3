use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::client::{ApiSettings, HttpJobApi, JobApi, TransportError, UploadSource};
use crate::types::{ProcessResponse, ResultsResponse, UploadResponse};

enum ApiCommand {
    Upload {
        source: UploadSource,
    },
    Start {
        job_id: String,
        enable_tts: bool,
    },
    FetchStatus {
        job_id: String,
        generation: u64,
    },
}

/// Completion of one API command, delivered on the event channel.
#[derive(Debug)]
pub enum ApiEvent {
    UploadFinished {
        result: Result<UploadResponse, TransportError>,
    },
    StartFinished {
        job_id: String,
        result: Result<ProcessResponse, TransportError>,
    },
    StatusFetched {
        generation: u64,
        result: Result<ResultsResponse, TransportError>,
    },
}

/// Bridges the async client onto a command/event channel pair so the
/// synchronous app loop can drive it without owning a runtime.
#[derive(Clone)]
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ApiEvent>>>,
}

impl ApiHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, TransportError> {
        let api: Arc<dyn JobApi> = Arc::new(HttpJobApi::new(settings)?);
        Ok(Self::with_api(api))
    }

    pub fn with_api(api: Arc<dyn JobApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn upload(&self, source: UploadSource) {
        let _ = self.cmd_tx.send(ApiCommand::Upload { source });
    }

    pub fn start(&self, job_id: impl Into<String>, enable_tts: bool) {
        let _ = self.cmd_tx.send(ApiCommand::Start {
            job_id: job_id.into(),
            enable_tts,
        });
    }

    pub fn fetch_status(&self, job_id: impl Into<String>, generation: u64) {
        let _ = self.cmd_tx.send(ApiCommand::FetchStatus {
            job_id: job_id.into(),
            generation,
        });
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn JobApi,
    command: ApiCommand,
    event_tx: mpsc::Sender<ApiEvent>,
) {
    match command {
        ApiCommand::Upload { source } => {
            let result = api.submit(source).await;
            let _ = event_tx.send(ApiEvent::UploadFinished { result });
        }
        ApiCommand::Start { job_id, enable_tts } => {
            let result = api.start(&job_id, enable_tts).await;
            let _ = event_tx.send(ApiEvent::StartFinished { job_id, result });
        }
        ApiCommand::FetchStatus { job_id, generation } => {
            let result = api.fetch_status(&job_id).await;
            let _ = event_tx.send(ApiEvent::StatusFetched { generation, result });
        }
    }
}
