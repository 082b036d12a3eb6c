//! Scripted transport for unit tests

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use transport::{HttpRequest, HttpResponse, Transport};

type Handler = Box<dyn Fn(&HttpRequest) -> transport::Result<HttpResponse> + Send + Sync>;

/// Records every request and answers from a closure, optionally after a delay.
pub(crate) struct FakeTransport {
    handler: Handler,
    latency: Option<Duration>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new(
        handler: impl Fn(&HttpRequest) -> transport::Result<HttpResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Hold every response back for `latency` so concurrent callers overlap.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose URL (ignoring the query) equals `url`.
    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.split('?').next() == Some(url))
            .count()
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = transport::Result<HttpResponse>> + Send + '_>> {
        self.requests.lock().unwrap().push(request.clone());
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            (self.handler)(&request)
        })
    }
}

/// Handler imitating the Twitter endpoints: each token request mints
/// `TOK1`, `TOK2`, ...; invalidation succeeds; resources echo their URL.
pub(crate) fn twitter_like() -> impl Fn(&HttpRequest) -> transport::Result<HttpResponse> + Send + Sync + 'static
{
    let minted = AtomicUsize::new(0);
    move |request: &HttpRequest| {
        let path = request.url.split('?').next().unwrap_or_default();
        let response = if path.ends_with("/oauth2/token") {
            let n = minted.fetch_add(1, Ordering::SeqCst) + 1;
            HttpResponse::new(
                200,
                format!(r#"{{"token_type":"bearer","access_token":"TOK{n}"}}"#),
            )
        } else if path.ends_with("/oauth2/invalidate_token") {
            HttpResponse::new(200, r#"{"access_token":"invalidated"}"#)
        } else {
            HttpResponse::new(200, serde_json::json!({ "url": request.url }).to_string())
        };
        Ok(response)
    }
}
