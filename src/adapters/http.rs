use crate::domain::model::HttpMethod;
use crate::domain::ports::{Transport, TransportReply};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// [`Transport`] backed by `reqwest`. GET sends parameters as a query
/// string, POST as an urlencoded form body.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> TransportReply {
        let request = match method {
            HttpMethod::Get => self.client.get(url).query(params),
            HttpMethod::Post => self.client.post(url).form(params),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("{} {} failed: {}", method, url, e);
                return TransportReply::failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => TransportReply::ok(status, body),
            Err(e) => TransportReply {
                body: String::new(),
                http_status: status,
                transport_error: Some(e.to_string()),
            },
        }
    }
}
