// reqwest-backed propeller command sink
use crate::application::command_sink::PropellerCommandSink;
use crate::application::error::FetchError;
use crate::domain::propeller::PropellerId;
use crate::infrastructure::http_client::{check_status, read_json, transport_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct SetPropellerBody {
    prop: PropellerId,
    state: bool,
}

#[derive(Debug, Clone)]
pub struct HttpCommandSink {
    client: Client,
    set_url: String,
    status_url: Option<String>,
}

impl HttpCommandSink {
    pub fn new(client: Client, set_url: String, status_url: Option<String>) -> Self {
        Self {
            client,
            set_url,
            status_url,
        }
    }
}

#[async_trait]
impl PropellerCommandSink for HttpCommandSink {
    async fn set_propeller(&self, prop: PropellerId, state: bool) -> Result<(), FetchError> {
        let response = self
            .client
            .post(&self.set_url)
            .json(&SetPropellerBody { prop, state })
            .send()
            .await
            .map_err(transport_error)?;
        // Response body is optional and ignored.
        check_status(&response)
    }

    async fn fetch_status(&self) -> Result<Option<Value>, FetchError> {
        let Some(url) = &self.status_url else {
            return Ok(None);
        };
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(response).await.map(Some)
    }
}
