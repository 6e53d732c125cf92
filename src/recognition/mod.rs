//! Recognition Client
//!
//! Sends the encoded drawing to a recognition backend off the UI thread and
//! reports each settled request back over a channel.

pub mod encode;
pub mod error;
pub mod http;

pub use encode::image_to_data_url;
pub use error::RecognitionError;
pub use http::HttpBackend;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::session::SubmissionId;

/// Anything that can turn a PNG data URL into text
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    async fn recognize(&self, image_data_url: &str) -> Result<String, RecognitionError>;
}

/// A request ready to go out
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub submission: SubmissionId,
    pub image_data_url: String,
}

/// The settled outcome of one request
#[derive(Debug, Clone)]
pub struct Completion {
    pub submission: SubmissionId,
    pub outcome: Result<String, RecognitionError>,
}

/// Callback run after a completion is queued
pub type SettledCallback = Box<dyn Fn() + Send + Sync>;

/// Dispatches requests on its own runtime
pub struct RecognitionClient {
    runtime: Runtime,
    backend: Arc<dyn RecognitionBackend>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
}

impl RecognitionClient {
    pub fn new(backend: Arc<dyn RecognitionBackend>) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (completions_tx, completions_rx) = unbounded();

        Ok(Self {
            runtime,
            backend,
            completions_tx,
            completions_rx,
        })
    }

    /// Send a request; its completion arrives via [`Self::try_completion`]
    ///
    /// There is no cancellation. Every dispatched request yields exactly one
    /// completion.
    pub fn dispatch(&self, request: RecognitionRequest, on_settled: Option<SettledCallback>) {
        let backend = self.backend.clone();
        let tx = self.completions_tx.clone();

        info!("Submitting drawing {}", request.submission);

        self.runtime.spawn(async move {
            let outcome = backend.recognize(&request.image_data_url).await;
            match &outcome {
                Ok(text) => info!("Submission {} recognized: {:?}", request.submission, text),
                Err(e) => warn!("Submission {} failed: {}", request.submission, e),
            }

            let completion = Completion {
                submission: request.submission,
                outcome,
            };
            if tx.send(completion).is_err() {
                warn!("Completion for {} dropped: receiver gone", request.submission);
            }
            if let Some(callback) = on_settled {
                callback();
            }
        });
    }

    /// Next settled request, if any, without blocking
    pub fn try_completion(&self) -> Option<Completion> {
        self.completions_rx.try_recv().ok()
    }

    /// Run one recognition to completion on the calling thread
    pub fn recognize_blocking(&self, image_data_url: &str) -> Result<String, RecognitionError> {
        self.runtime.block_on(self.backend.recognize(image_data_url))
    }
}
