pub mod toml_config;

use crate::utils::error::{NamecheapError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;

pub const PRODUCTION_ENDPOINT: &str = "https://api.namecheap.com/xml.response";
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.namecheap.com/xml.response";

/// Credentials and endpoint selection for [`crate::NamecheapClient`].
///
/// Credential fields may be left empty; calls made with incomplete
/// credentials come back as a failed [`crate::ApiResponse`].
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_user: String,
    pub api_key: String,
    /// Account the commands act on. Falls back to `api_user` when empty.
    pub user_name: String,
    pub client_ip: String,
    pub sandbox: bool,
    /// Overrides the sandbox/production URL, e.g. for a local mock.
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .field("user_name", &self.user_name)
            .field("client_ip", &self.client_ip)
            .field("sandbox", &self.sandbox)
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_user: &str, api_key: &str, client_ip: &str) -> Self {
        Self {
            api_user: api_user.to_string(),
            api_key: api_key.to_string(),
            client_ip: client_ip.to_string(),
            ..Self::default()
        }
    }

    pub fn sandbox(api_user: &str, api_key: &str, client_ip: &str) -> Self {
        Self {
            sandbox: true,
            ..Self::new(api_user, api_key, client_ip)
        }
    }

    pub fn with_user_name(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        let sandbox = match env::var("NAMECHEAP_SANDBOX") {
            Ok(value) => parse_bool("NAMECHEAP_SANDBOX", &value)?,
            Err(_) => false,
        };
        let timeout_seconds = match env::var("NAMECHEAP_TIMEOUT_SECONDS") {
            Ok(value) => Some(value.parse().map_err(|_| NamecheapError::InvalidConfigValueError {
                field: "NAMECHEAP_TIMEOUT_SECONDS".to_string(),
                value: value.clone(),
                reason: "Expected a whole number of seconds".to_string(),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            api_user: env::var("NAMECHEAP_API_USER").unwrap_or_default(),
            api_key: env::var("NAMECHEAP_API_KEY").unwrap_or_default(),
            user_name: env::var("NAMECHEAP_USER_NAME").unwrap_or_default(),
            client_ip: env::var("NAMECHEAP_CLIENT_IP").unwrap_or_default(),
            sandbox,
            endpoint: env::var("NAMECHEAP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            timeout_seconds,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        match &self.endpoint {
            Some(endpoint) => endpoint,
            None if self.sandbox => SANDBOX_ENDPOINT,
            None => PRODUCTION_ENDPOINT,
        }
    }

    pub fn effective_user_name(&self) -> &str {
        if self.user_name.is_empty() {
            &self.api_user
        } else {
            &self.user_name
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_user", &self.api_user)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_non_empty_string("client_ip", &self.client_ip)?;
        validation::validate_ip_address("client_ip", &self.client_ip)?;
        validation::validate_url("endpoint", self.endpoint_url())?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(NamecheapError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Expected true or false".to_string(),
        }),
    }
}
