//! HTTP API client
//!
//! [`RecordApi`] is the seam between the controller and the network. The
//! controller only ever talks to this trait, so tests drive it with an
//! in-process engine.

use std::future::Future;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::http_server::{Envelope, API_BASE_PATH, RECORDS_PATH};
use crate::record::{Record, RecordFields};

use super::errors::{ClientError, ClientResult};

/// The four record operations as seen from the client.
pub trait RecordApi {
    fn list(&self) -> impl Future<Output = ClientResult<Vec<Record>>> + Send;

    fn create(&self, fields: &RecordFields) -> impl Future<Output = ClientResult<Record>> + Send;

    fn update(
        &self,
        id: &str,
        fields: &RecordFields,
    ) -> impl Future<Output = ClientResult<Record>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = ClientResult<Record>> + Send;
}

/// [`RecordApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    http: Client,
    records_url: String,
}

impl HttpRecordApi {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().build()?;
        Ok(Self {
            http,
            records_url: format!("{}{}{}", base, API_BASE_PATH, RECORDS_PATH),
        })
    }

    pub fn records_url(&self) -> &str {
        &self.records_url
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.records_url, id)
    }

    /// Sends a request and unwraps the envelope's `data`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string(),
                    detail: None,
                });
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
                detail: envelope.error,
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".to_string()))
    }
}

impl RecordApi for HttpRecordApi {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        self.send(self.http.get(&self.records_url)).await
    }

    async fn create(&self, fields: &RecordFields) -> ClientResult<Record> {
        self.send(self.http.post(&self.records_url).json(fields)).await
    }

    async fn update(&self, id: &str, fields: &RecordFields) -> ClientResult<Record> {
        self.send(self.http.put(self.record_url(id)).json(fields)).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Record> {
        self.send(self.http.delete(self.record_url(id))).await
    }
}
