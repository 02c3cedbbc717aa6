//! Test doubles for the custodian seams

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::TransportError;
use super::http::{HttpClient, HttpRequest, HttpResponse};
use super::registry::WalletDisconnector;

/// Scripted HTTP client
///
/// Replies are consumed in order; an exhausted script answers 500.
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    card_count: AtomicUsize,
    create_count: AtomicUsize,
    commit_count: AtomicUsize,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            card_count: AtomicUsize::new(0),
            create_count: AtomicUsize::new(0),
            commit_count: AtomicUsize::new(0),
        }
    }

    pub fn push_response(&self, status_code: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status_code, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn card_count(&self) -> usize {
        self.card_count.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn commit_count(&self) -> usize {
        self.commit_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.url.ends_with("/commit") {
            self.commit_count.fetch_add(1, Ordering::SeqCst);
        } else if request.url.ends_with("/transactions") {
            self.create_count.fetch_add(1, Ordering::SeqCst);
        } else {
            self.card_count.fetch_add(1, Ordering::SeqCst);
        }
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(500, "")))
    }
}

/// Counts disconnect signals
#[derive(Default)]
pub struct MockDisconnector {
    count: AtomicUsize,
    keys: Mutex<Vec<String>>,
}

impl MockDisconnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

impl WalletDisconnector for MockDisconnector {
    fn disconnect_wallet(&self, key: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(key.to_string());
    }
}
