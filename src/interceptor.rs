// SPDX-License-Identifier: MPL-2.0
//! Response interceptor forwarding server-sent messages to the service.
//!
//! The interceptor only inspects responses. Successful responses come back
//! unchanged and failed ones are returned as the same error, whether or not
//! they carried messages.

use crate::server;
use crate::service::NotificationService;
use serde_json::Value;
use std::future::Future;

/// Anything that exposes a JSON body the interceptor can inspect.
pub trait ResponseBody {
    fn body(&self) -> Option<&Value>;
}

impl ResponseBody for Value {
    fn body(&self) -> Option<&Value> {
        Some(self)
    }
}

impl<T: ResponseBody> ResponseBody for &T {
    fn body(&self) -> Option<&Value> {
        (**self).body()
    }
}

/// Minimal response shape: a status code and a decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

impl HttpResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Splits on the status code: 2xx is `Ok`, everything else is `Err`.
    pub fn into_result(self) -> Result<Self, Self> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(self)
        }
    }
}

impl ResponseBody for HttpResponse {
    fn body(&self) -> Option<&Value> {
        Some(&self.data)
    }
}

/// Inspects responses for a messages array and forwards it to a service.
#[derive(Debug, Clone, Copy)]
pub struct ServerMessagesInterceptor<'a> {
    service: &'a NotificationService,
}

impl<'a> ServerMessagesInterceptor<'a> {
    pub fn new(service: &'a NotificationService) -> Self {
        Self { service }
    }

    /// Forwards the configured messages array when it is a non-empty array.
    /// Returns the number of messages published.
    pub fn inspect(&self, response: &impl ResponseBody) -> usize {
        let keys = self.service.config().keys();
        match response
            .body()
            .and_then(|body| server::messages_in_body(keys, body))
        {
            Some(messages) => self.service.add_server_messages(messages),
            None => 0,
        }
    }

    /// Inspects either outcome and hands it back untouched.
    pub fn intercept<R, E>(&self, outcome: Result<R, E>) -> Result<R, E>
    where
        R: ResponseBody,
        E: ResponseBody,
    {
        match &outcome {
            Ok(response) => {
                self.inspect(response);
            }
            Err(rejection) => {
                let published = self.inspect(rejection);
                log::debug!("rejected response carried {published} message(s)");
            }
        }
        outcome
    }

    /// Awaits `response` and intercepts its outcome.
    pub async fn intercept_future<F, R, E>(&self, response: F) -> Result<R, E>
    where
        F: Future<Output = Result<R, E>>,
        R: ResponseBody,
        E: ResponseBody,
    {
        self.intercept(response.await)
    }
}

impl NotificationService {
    /// Returns an interceptor bound to this service.
    #[must_use]
    pub fn interceptor(&self) -> ServerMessagesInterceptor<'_> {
        ServerMessagesInterceptor::new(self)
    }
}
