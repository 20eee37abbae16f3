use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use podsum_api::{
    ApiEvent, ApiHandle, JobApi, ProcessResponse, ProcessingStatus, ResultsResponse, Stage,
    TransportError, UploadResponse, UploadSource,
};

struct StubApi;

fn status(job_id: &str, stage: Stage) -> ProcessingStatus {
    ProcessingStatus {
        job_id: job_id.to_string(),
        stage,
        detail: None,
        created_at: "2026-01-05T10:00:00Z".parse().expect("timestamp"),
        updated_at: "2026-01-05T10:00:07Z".parse().expect("timestamp"),
        errors: Vec::new(),
        assets: HashMap::new(),
    }
}

#[async_trait::async_trait]
impl JobApi for StubApi {
    async fn submit(&self, _source: UploadSource) -> Result<UploadResponse, TransportError> {
        Ok(UploadResponse {
            job_id: "j1".to_string(),
            status: status("j1", Stage::Uploaded),
        })
    }

    async fn start(
        &self,
        job_id: &str,
        _enable_tts: bool,
    ) -> Result<ProcessResponse, TransportError> {
        Ok(ProcessResponse {
            job_id: job_id.to_string(),
            status: status(job_id, Stage::Uploaded),
        })
    }

    async fn fetch_status(&self, job_id: &str) -> Result<ResultsResponse, TransportError> {
        Ok(ResultsResponse {
            job_id: job_id.to_string(),
            status: status(job_id, Stage::Transcribing),
            transcript: None,
            summary: None,
            audio_url: None,
            summary_audio_url: None,
        })
    }
}

fn wait_event(handle: &ApiHandle) -> ApiEvent {
    for _ in 0..200 {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("no event within 2s");
}

#[test]
fn upload_command_resolves_to_an_upload_event() {
    let handle = ApiHandle::with_api(Arc::new(StubApi));
    handle.upload(UploadSource::RemoteUrl {
        url: "https://example.com/a.mp3".to_string(),
    });

    match wait_event(&handle) {
        ApiEvent::UploadFinished { result } => {
            assert_eq!(result.expect("upload ok").job_id, "j1");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn fetch_command_carries_its_generation_through() {
    let handle = ApiHandle::with_api(Arc::new(StubApi));
    handle.fetch_status("j1", 7);

    match wait_event(&handle) {
        ApiEvent::StatusFetched { generation, result } => {
            assert_eq!(generation, 7);
            assert_eq!(result.expect("fetch ok").status.stage, Stage::Transcribing);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
