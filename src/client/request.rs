//! Request construction, dispatch, and completion delivery.
//!
//! A [`RestRequest`] is built from a snapshot of its client's configuration
//! and a completion delegate, then consumed by [`RestRequest::start`], which
//! spawns the exchange onto the tokio runtime and returns a cancellable
//! [`RequestHandle`]. The spawned task is the only code path that invokes
//! the delegate, and it does so exactly once in every branch (success,
//! HTTP-status failure, transport failure, or cancellation), so the
//! exactly-once completion guarantee is structural rather than policed.
//!
//! # Completion Targets
//!
//! The delegate is a [`ResponseDelegate`] trait object. Plain closures
//! work directly through a blanket impl:
//!
//! ```ignore
//! let handle = client.get("/users", Arc::new(|outcome: RequestOutcome| {
//!     println!("finished: {:?}", outcome.map(|r| r.status));
//! }))?;
//! ```
//!
//! For await-style consumption, [`OutcomeChannel`] adapts the delegate to a
//! channel receiver:
//!
//! ```ignore
//! let (delegate, mut outcomes) = OutcomeChannel::new();
//! client.get("/users", delegate)?;
//! let (id, outcome) = outcomes.recv().await.unwrap();
//! ```

use crate::error::{RestError, Result};
use crate::types::{RequestOutcome, RestResponse};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use url::Url;
use uuid::Uuid;

/// Receives the outcome of an asynchronous request, exactly once.
///
/// Delivery may run on any tokio worker thread; implementations must not
/// assume affinity with the thread that started the request.
#[async_trait]
pub trait ResponseDelegate: Send + Sync {
    /// Called once when the exchange finishes, whatever the outcome.
    async fn on_complete(&self, request_id: Uuid, outcome: RequestOutcome);
}

#[async_trait]
impl<F> ResponseDelegate for F
where
    F: Fn(RequestOutcome) + Send + Sync,
{
    async fn on_complete(&self, _request_id: Uuid, outcome: RequestOutcome) {
        self(outcome);
    }
}

/// A delegate that forwards outcomes into an unbounded channel.
pub struct OutcomeChannel {
    tx: mpsc::UnboundedSender<(Uuid, RequestOutcome)>,
}

impl OutcomeChannel {
    /// Create a delegate and the receiver its outcomes arrive on.
    pub fn new() -> (
        Arc<Self>,
        mpsc::UnboundedReceiver<(Uuid, RequestOutcome)>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(OutcomeChannel { tx }), rx)
    }
}

#[async_trait]
impl ResponseDelegate for OutcomeChannel {
    async fn on_complete(&self, request_id: Uuid, outcome: RequestOutcome) {
        // A dropped receiver means nobody is listening anymore; the outcome
        // is discarded, not redelivered.
        let _ = self.tx.send((request_id, outcome));
    }
}

/// An HTTP request carrying a snapshot of its client's configuration.
///
/// Built by a client's request factory; not yet started. The header map and
/// credentials are deep copies taken at construction time, so mutating the
/// client afterwards never changes a request that already exists.
pub struct RestRequest {
    id: Uuid,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<(Bytes, String)>,
    delegate: Arc<dyn ResponseDelegate>,
    http: reqwest::Client,
    log: bool,
}

impl std::fmt::Debug for RestRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestRequest")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl RestRequest {
    /// Build a request from a client's state snapshot.
    ///
    /// Header names/values are validated here, not when they were set on
    /// the client. When credentials are present and no explicit
    /// `Authorization` header was set, a Basic-auth header is derived from
    /// them.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        http: reqwest::Client,
        method: Method,
        url: Url,
        headers: &BTreeMap<String, String>,
        credentials: Option<(&str, &str)>,
        body: Option<(Bytes, String)>,
        delegate: Arc<dyn ResponseDelegate>,
        log: bool,
    ) -> Result<Self> {
        let mut map = HeaderMap::with_capacity(headers.len() + 1);
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RestError::InvalidHeader(format!("{name}: {e}")))?;
            map.insert(name, value);
        }

        if let Some((username, password)) = credentials {
            if !map.contains_key(AUTHORIZATION) {
                map.insert(AUTHORIZATION, basic_auth_value(username, password)?);
            }
        }

        Ok(RestRequest {
            id: Uuid::new_v4(),
            method,
            url,
            headers: map,
            body,
            delegate,
            http,
            log,
        })
    }

    /// The request's unique identifier, echoed to the delegate.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The fully composed target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The header snapshot this request will be sent with.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The serialized body, when one was attached.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref().map(|(bytes, _)| bytes)
    }

    /// The content type of the attached body.
    pub fn content_type(&self) -> Option<&str> {
        self.body.as_ref().map(|(_, content_type)| content_type.as_str())
    }

    /// Start the exchange asynchronously.
    ///
    /// Returns immediately; the exchange runs on the tokio runtime and the
    /// outcome is reported through the delegate. Dropping the returned
    /// handle detaches the request (it still completes and the delegate
    /// still fires); only [`RequestHandle::cancel`] aborts it.
    pub fn start(self) -> RequestHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let id = self.id;
        let task = tokio::spawn(self.execute(cancel_rx));

        RequestHandle {
            id,
            cancel: Mutex::new(Some(cancel_tx)),
            task,
        }
    }

    async fn execute(self, cancel: oneshot::Receiver<()>) {
        if self.log {
            tracing::debug!(id = %self.id, method = %self.method, url = %self.url, "request started");
        }

        // A dropped handle drops the sender without sending; that must not
        // read as a cancellation, so the receiver error parks forever.
        let cancelled = async {
            if cancel.await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        let outcome = tokio::select! {
            _ = cancelled => Err(RestError::Cancelled),
            outcome = self.exchange() => outcome,
        };

        if self.log {
            match &outcome {
                Ok(response) => {
                    tracing::debug!(id = %self.id, status = %response.status, "request completed");
                }
                Err(RestError::Cancelled) => {
                    tracing::debug!(id = %self.id, "request cancelled");
                }
                Err(e) => {
                    tracing::warn!(id = %self.id, url = %self.url, "request failed: {e}");
                }
            }
        }

        self.delegate.on_complete(self.id, outcome).await;
    }

    async fn exchange(&self) -> RequestOutcome {
        let mut builder = self
            .http
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());

        if let Some((body, content_type)) = &self.body {
            builder = builder
                .header(CONTENT_TYPE, content_type.as_str())
                .body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RestError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RestResponse {
            status,
            headers,
            body,
        })
    }
}

/// Handle to an in-flight request.
///
/// Returned by [`RestRequest::start`] and by the client's dispatch methods.
#[derive(Debug)]
pub struct RequestHandle {
    id: Uuid,
    cancel: Mutex<Option<oneshot::Sender<()>>>,
    task: tokio::task::JoinHandle<()>,
}

impl RequestHandle {
    /// The identifier of the request this handle tracks.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Cancel the in-flight exchange.
    ///
    /// Idempotent. The delegate still fires exactly once, reporting
    /// [`RestError::Cancelled`]; a request that already finished is
    /// unaffected.
    pub fn cancel(&self) {
        if let Some(tx) = self.cancel.lock().take() {
            let _ = tx.send(());
        }
    }

    /// True once the exchange has finished and the delegate has run.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the exchange (and its delegate call) to finish.
    pub async fn finished(self) {
        let _ = self.task.await;
    }
}

fn basic_auth_value(username: &str, password: &str) -> Result<HeaderValue> {
    let token = BASE64.encode(format!("{username}:{password}"));
    HeaderValue::from_str(&format!("Basic {token}"))
        .map_err(|e| RestError::InvalidHeader(format!("authorization: {e}")))
}
