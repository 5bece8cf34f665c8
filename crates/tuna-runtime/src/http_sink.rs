use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use tuna_core::{Envelope, Sink};

use crate::error::TunaError;

/// Posts envelopes to the local listener.
///
/// Each send runs as its own task; a slow or absent listener never holds up
/// the polling loop. There is no retry: the next admitted state supersedes a
/// lost one.
#[derive(Debug, Clone)]
pub struct HttpSink {
    endpoint: String,
    http: Client,
}

impl HttpSink {
    /// Sink for `http://localhost:<port>/`.
    pub fn new(port: u16) -> Self {
        Self::with_endpoint(format!("http://localhost:{port}/"))
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one envelope and wait for the listener's answer.
    pub async fn post(&self, envelope: &Envelope) -> Result<(), TunaError> {
        let resp = self.http.post(&self.endpoint).json(envelope).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(TunaError::Rejected(resp.status().as_u16()))
        }
    }
}

impl Sink for HttpSink {
    fn send(&self, envelope: Envelope) {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime; report dropped");
            return;
        };

        let sink = self.clone();
        handle.spawn(async move {
            match sink.post(&envelope).await {
                Ok(()) => debug!(endpoint = %sink.endpoint, "Report delivered"),
                Err(e) => warn!(endpoint = %sink.endpoint, "Connection error: {e}"),
            }
        });
    }
}
