//! Remote chat service client.
//!
//! Speaks the service's two-call protocol:
//!
//! - `POST {base}/chats` returns `{"id": "..."}`
//! - `POST {base}/chats/{id}` with `{"message": "..."}` returns an event
//!   stream whose `data:` payloads are reply text deltas

use std::time::Duration;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use url::Url;

use super::sse::SseDecoder;
use super::{ReplyStream, Responder};
use crate::error::ResponderError;

/// Event name the service uses to report a failure mid-stream.
const ERROR_EVENT: &str = "error";

#[derive(Debug, Deserialize)]
struct NewChat {
    id: String,
}

#[derive(Debug, Serialize)]
struct ChatIn<'a> {
    message: &'a str,
}

/// Client for a remote chat service.
#[derive(Debug, Clone)]
pub struct HttpResponder {
    http: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpResponder {
    /// Build a client for the service at `base_url`.
    ///
    /// `request_timeout` bounds connecting and the chat-creation call;
    /// reply streams may run longer.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ResponderError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            request_timeout,
        })
    }

    /// Resolve a path below the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ResponderError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait::async_trait]
impl Responder for HttpResponder {
    async fn open_chat(&self) -> Result<String, ResponderError> {
        let url = self.endpoint("chats")?;
        let resp = self
            .http
            .post(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResponderError::Status(status));
        }

        let body: NewChat = resp
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;
        Ok(body.id)
    }

    async fn stream_reply(
        &self,
        chat_id: &str,
        message: &str,
    ) -> Result<ReplyStream, ResponderError> {
        let url = self.endpoint(&format!("chats/{chat_id}"))?;
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&ChatIn { message })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResponderError::ChatNotFound(chat_id.to_string()));
        }
        if !status.is_success() {
            return Err(ResponderError::Status(status));
        }

        let byte_stream = resp.bytes_stream();
        let out = async_stream::try_stream! {
            let mut decoder = SseDecoder::new();

            futures::pin_mut!(byte_stream);
            while let Some(chunk) = byte_stream.next().await {
                let chunk = chunk?;
                for frame in decoder.push(&chunk) {
                    if frame.event == ERROR_EVENT {
                        Err(ResponderError::Remote(frame.data))?;
                    } else if !frame.data.is_empty() {
                        yield frame.data;
                    }
                }
            }

            if let Some(frame) = decoder.finish() {
                if frame.event == ERROR_EVENT {
                    Err(ResponderError::Remote(frame.data))?;
                } else if !frame.data.is_empty() {
                    yield frame.data;
                }
            }
        };

        Ok(Box::pin(out))
    }
}
