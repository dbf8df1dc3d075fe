//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;

use crate::{FetchError, RequestBuilder, Response, Transport};

/// Records every request and answers from a queue of canned replies.
///
/// An exhausted queue answers with [`FetchError::RequestError`], the same
/// shape a refused connection takes.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Response, FetchError>>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn push_response(&self, response: Response) {
        self.lock_replies().push_back(Ok(response));
    }

    /// Queue a JSON response with the given status.
    pub fn push_json<T: Serialize>(&self, status: u16, value: &T) {
        let body = serde_json::to_vec(value).unwrap_or_default();
        self.push_response(Response::json_body(status, body));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&self, error: FetchError) {
        self.lock_replies().push_back(Err(error));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RequestBuilder> {
        self.requests().pop()
    }

    fn lock_replies(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<Response, FetchError>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let description = format!("{} {}", request.method, request.url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.lock_replies()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestError(format!("no reply queued for {}", description))))
    }
}
