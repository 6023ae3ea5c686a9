use crate::adapters::http::ReqwestTransport;
use crate::app::services::{
    AddressService, DnsService, DomainsService, NsService, SslService, TransferService,
    UsersService, WhoisguardService,
};
use crate::config::ClientConfig;
use crate::core::codes;
use crate::core::response::{ApiResponse, TransportMeta};
use crate::domain::model::{HttpMethod, RequestParams};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

/// How the base `UserName` parameter is filled for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserNameParam {
    /// The configured user name, or the API user.
    #[default]
    Default,
    /// Leave `UserName` out; for commands addressed to another account.
    Omit,
    Override(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub method: HttpMethod,
    pub user_name: UserNameParam,
}

impl CallOptions {
    pub fn post() -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::default()
        }
    }

    pub fn without_user_name(mut self) -> Self {
        self.user_name = UserNameParam::Omit;
        self
    }

    pub fn as_user(mut self, user_name: &str) -> Self {
        self.user_name = UserNameParam::Override(user_name.to_string());
        self
    }
}

/// Namecheap API client. Every call resolves to an [`ApiResponse`].
pub struct NamecheapClient<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl NamecheapClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_seconds.map(Duration::from_secs))?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> NamecheapClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn call(&self, command: &str, params: RequestParams) -> ApiResponse {
        self.call_with(command, params, CallOptions::default()).await
    }

    pub async fn call_with(
        &self,
        command: &str,
        params: RequestParams,
        options: CallOptions,
    ) -> ApiResponse {
        let user_name = match &options.user_name {
            UserNameParam::Default => Some(self.config.effective_user_name().to_string()),
            UserNameParam::Omit => None,
            UserNameParam::Override(name) => Some(name.clone()),
        };

        let credentials_missing = self.config.api_user.is_empty()
            || self.config.api_key.is_empty()
            || self.config.client_ip.is_empty()
            || user_name.as_deref().is_some_and(str::is_empty);
        if credentials_missing {
            tracing::warn!("❌ {}: credentials are not configured", command);
            return ApiResponse::client_error(
                codes::MISSING_CREDENTIALS_MESSAGE,
                command,
                codes::MISSING_CREDENTIALS,
            );
        }

        let base = RequestParams::new()
            .with("ApiUser", &self.config.api_user)
            .with("ApiKey", &self.config.api_key)
            .with_opt("UserName", user_name)
            .with("ClientIp", &self.config.client_ip);
        let mut request = params;
        request.merge_missing(&base);
        request.set("Command", command);

        let endpoint = self.config.endpoint_url();
        tracing::debug!(
            "📡 {} {} via {} ({} params)",
            options.method,
            command,
            endpoint,
            request.len()
        );

        let started = Instant::now();
        let reply = self
            .transport
            .send(options.method, endpoint, &request.to_pairs())
            .await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        if let Some(error) = reply.transport_error {
            tracing::warn!("❌ {}: transport error: {}", command, error);
            return ApiResponse::from_transport_failure(error, command, elapsed_ms, None);
        }
        if matches!(reply.http_status, 401 | 403) {
            tracing::warn!("❌ {}: HTTP {}", command, reply.http_status);
            return ApiResponse::from_transport_failure(
                "Permission denied",
                command,
                elapsed_ms,
                None,
            );
        }
        if !(200..300).contains(&reply.http_status) {
            tracing::warn!("❌ {}: HTTP {}", command, reply.http_status);
            return ApiResponse::from_transport_failure(
                format!("HTTP request failed with status {}", reply.http_status),
                command,
                elapsed_ms,
                None,
            );
        }

        let meta = TransportMeta {
            http_status: Some(reply.http_status),
            endpoint: Some(endpoint.to_string()),
            method: Some(options.method),
        };
        let response = ApiResponse::from_xml(&reply.body, command, elapsed_ms, &meta);

        if response.is_success() {
            tracing::info!("✅ {} completed in {:.1}ms", command, response.execution_time());
        } else {
            tracing::warn!("❌ {} failed: {}", command, response.errors().join("; "));
        }
        response
    }

    pub fn domains(&self) -> DomainsService<'_, T> {
        DomainsService::new(self)
    }

    pub fn dns(&self) -> DnsService<'_, T> {
        DnsService::new(self)
    }

    pub fn ns(&self) -> NsService<'_, T> {
        NsService::new(self)
    }

    pub fn transfer(&self) -> TransferService<'_, T> {
        TransferService::new(self)
    }

    pub fn ssl(&self) -> SslService<'_, T> {
        SslService::new(self)
    }

    pub fn users(&self) -> UsersService<'_, T> {
        UsersService::new(self)
    }

    pub fn address(&self) -> AddressService<'_, T> {
        AddressService::new(self)
    }

    pub fn whoisguard(&self) -> WhoisguardService<'_, T> {
        WhoisguardService::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::testing::{ok_body, RecordingTransport};
    use crate::domain::ports::TransportReply;

    fn client(transport: RecordingTransport) -> NamecheapClient<RecordingTransport> {
        let config = ClientConfig::sandbox("alice", "secret", "203.0.113.7");
        NamecheapClient::with_transport(config, transport)
    }

    #[test]
    fn test_missing_credentials_never_touch_the_network() {
        let transport = RecordingTransport::replying(TransportReply::ok(200, ok_body("")));
        let client = NamecheapClient::with_transport(ClientConfig::default(), transport.clone());

        let response =
            tokio_test::block_on(client.call("namecheap.domains.getList", RequestParams::new()));

        assert!(!response.is_success());
        assert_eq!(
            response.errors(),
            ["[1010101] Authentication information must be provided."]
        );
        assert_eq!(response.execution_time(), 0.0);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_base_params_are_sent() {
        let transport = RecordingTransport::replying(TransportReply::ok(200, ok_body("")));
        let client = client(transport.clone());

        let response = client
            .call(
                "namecheap.domains.getInfo",
                RequestParams::new().with("DomainName", "example.com"),
            )
            .await;

        assert!(response.is_success());
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, crate::config::SANDBOX_ENDPOINT);
        assert_eq!(request.param("ApiUser"), Some("alice"));
        assert_eq!(request.param("ApiKey"), Some("secret"));
        assert_eq!(request.param("UserName"), Some("alice"));
        assert_eq!(request.param("ClientIp"), Some("203.0.113.7"));
        assert_eq!(request.param("Command"), Some("namecheap.domains.getInfo"));
        assert_eq!(request.param("DomainName"), Some("example.com"));
    }

    #[tokio::test]
    async fn test_user_name_override_and_omission() {
        let transport = RecordingTransport::replying(TransportReply::ok(200, ok_body("")));
        let client = client(transport.clone());

        client
            .call_with(
                "namecheap.users.resetPassword",
                RequestParams::new(),
                CallOptions::default().without_user_name(),
            )
            .await;
        assert_eq!(transport.last_request().unwrap().param("UserName"), None);

        client
            .call_with(
                "namecheap.users.getBalances",
                RequestParams::new(),
                CallOptions::post().as_user("bob"),
            )
            .await;
        let request = transport.last_request().unwrap();
        assert_eq!(request.param("UserName"), Some("bob"));
        assert_eq!(request.method, HttpMethod::Post);

        // the override is per call
        client.call("namecheap.users.getBalances", RequestParams::new()).await;
        assert_eq!(transport.last_request().unwrap().param("UserName"), Some("alice"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_response() {
        let transport = RecordingTransport::replying(TransportReply::failed("connection refused"));
        let client = client(transport);
        let response = client.call("namecheap.domains.getList", RequestParams::new()).await;

        assert!(!response.is_success());
        assert_eq!(response.errors(), ["connection refused"]);
        assert!(response.data().is_empty());
    }

    #[tokio::test]
    async fn test_permission_denied_status() {
        let client = client(RecordingTransport::replying(TransportReply::ok(403, "Forbidden")));
        let response = client.call("namecheap.domains.getList", RequestParams::new()).await;

        assert_eq!(response.errors(), ["Permission denied"]);
        assert_eq!(response.raw_body(), "");
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let client = client(RecordingTransport::replying(TransportReply::ok(502, "Bad Gateway")));
        let response = client.call("namecheap.domains.getList", RequestParams::new()).await;

        assert_eq!(response.errors(), ["HTTP request failed with status 502"]);
    }

    #[tokio::test]
    async fn test_transport_meta_recorded() {
        let client = client(RecordingTransport::replying(TransportReply::ok(200, ok_body(""))));
        let response = client.call("namecheap.domains.getList", RequestParams::new()).await;

        assert_eq!(response.meta()["httpStatusCode"], 200);
        assert_eq!(response.meta()["endpoint"], crate::config::SANDBOX_ENDPOINT);
        assert_eq!(response.meta()["requestMethod"], "GET");
    }
}
