//! Typed wrappers over the Namecheap command set, grouped as the provider
//! groups them. Each method assembles parameters, checks what the provider
//! would reject anyway, and returns the normalized [`ApiResponse`].

pub mod address;
pub mod dns;
pub mod domains;
pub mod ns;
pub mod ssl;
pub mod transfer;
pub mod users;
pub mod whoisguard;

pub use address::AddressService;
pub use dns::{DnsService, EmailForward, HostRecord};
pub use domains::{fill_contacts_from_registrant, DomainListQuery, DomainsService};
pub use ns::NsService;
pub use ssl::SslService;
pub use transfer::TransferService;
pub use users::{FindBy, PricingQuery, UsersService};
pub use whoisguard::WhoisguardService;

use crate::core::codes;
use crate::core::field_mapper::{mappings_for, REQUIRED_FIELDS};
use crate::core::response::ApiResponse;
use crate::domain::model::{Context, ProviderParams, RequestParams};

/// Keys that are absent or blank.
pub(crate) fn missing_parameters(params: &RequestParams, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| params.get(key).map_or(true, |v| v.trim().is_empty()))
        .map(|key| key.to_string())
        .collect()
}

/// Rejection for a command whose `required` parameters are not all present.
pub(crate) fn require(
    command: &str,
    params: &RequestParams,
    required: &[&str],
) -> Option<ApiResponse> {
    let missing = missing_parameters(params, required);
    if missing.is_empty() {
        None
    } else {
        Some(missing_response(command, "parameters", &missing))
    }
}

/// Required contact fields absent from `params`, as wire names with `prefix`.
pub(crate) fn missing_contact_fields(
    params: &ProviderParams,
    context: Context,
    prefix: &str,
) -> Vec<String> {
    let mapping = mappings_for(context);
    REQUIRED_FIELDS
        .iter()
        .filter_map(|field| mapping.get(field))
        .map(|wire| format!("{}{}", prefix, wire))
        .filter(|key| params.get(key).map_or(true, |v| v.trim().is_empty()))
        .collect()
}

pub(crate) fn missing_response(command: &str, what: &str, missing: &[String]) -> ApiResponse {
    tracing::warn!("❌ {}: missing {}: {}", command, what, missing.join(", "));
    ApiResponse::client_error(
        format!("Missing required {}: {}", what, missing.join(", ")),
        command,
        codes::MISSING_PARAMETERS,
    )
}

/// Splits `example.co.uk` into (`example`, `co.uk`).
pub(crate) fn split_domain(domain: &str) -> Option<(&str, &str)> {
    let (sld, tld) = domain.trim().split_once('.')?;
    if sld.is_empty() || tld.is_empty() {
        return None;
    }
    Some((sld, tld))
}

pub(crate) fn sld_tld_params(domain: &str) -> Option<RequestParams> {
    let (sld, tld) = split_domain(domain)?;
    Some(RequestParams::new().with("SLD", sld).with("TLD", tld))
}

pub(crate) fn invalid_domain_response(command: &str, domain: &str) -> ApiResponse {
    ApiResponse::client_error(
        format!("Invalid domain name: '{}'", domain),
        command,
        codes::INVALID_PARAMETER,
    )
}

pub(crate) fn not_implemented_response(command: &str) -> ApiResponse {
    ApiResponse::client_error(
        format!("{} is not implemented", command),
        command,
        codes::NOT_IMPLEMENTED,
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::ClientConfig;
    use crate::core::client::NamecheapClient;
    use crate::domain::model::HttpMethod;
    use crate::domain::ports::{Transport, TransportReply};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: HttpMethod,
        pub url: String,
        pub params: Vec<(String, String)>,
    }

    impl RecordedRequest {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Transport that records requests and answers every one with the same reply.
    #[derive(Clone)]
    pub struct RecordingTransport {
        reply: TransportReply,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl RecordingTransport {
        pub fn replying(reply: TransportReply) -> Self {
            Self {
                reply,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            method: HttpMethod,
            url: &str,
            params: &[(String, String)],
        ) -> TransportReply {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                params: params.to_vec(),
            });
            self.reply.clone()
        }
    }

    pub fn ok_body(command_response: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>test</RequestedCommand>
  <CommandResponse>{}</CommandResponse>
  <Server>TEST01</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.01</ExecutionTime>
</ApiResponse>"#,
            command_response
        )
    }

    pub fn test_client() -> (NamecheapClient<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::replying(TransportReply::ok(200, ok_body("")));
        let config = ClientConfig::sandbox("alice", "secret", "203.0.113.7");
        (
            NamecheapClient::with_transport(config, transport.clone()),
            transport,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_domain() {
        assert_eq!(split_domain("example.com"), Some(("example", "com")));
        assert_eq!(split_domain("example.co.uk"), Some(("example", "co.uk")));
        assert_eq!(split_domain("localhost"), None);
        assert_eq!(split_domain(".com"), None);
        assert_eq!(split_domain("example."), None);
    }

    #[test]
    fn test_missing_parameters_treats_blank_as_missing() {
        let params = RequestParams::new()
            .with("DomainName", "example.com")
            .with("Years", " ");
        assert_eq!(
            missing_parameters(&params, &["DomainName", "Years", "EPPCode"]),
            vec!["Years".to_string(), "EPPCode".to_string()]
        );
    }

    #[test]
    fn test_require_reports_every_missing_key() {
        let params = RequestParams::new().with("DomainName", "example.com");
        assert!(require("namecheap.domains.renew", &params, &["DomainName"]).is_none());

        let required = ["DomainName", "Years", "EPPCode"];
        let response = require("namecheap.domains.renew", &params, &required).unwrap();
        assert_eq!(response.command(), "namecheap.domains.renew");
        assert_eq!(
            response.first_error(),
            Some("[1010102] Missing required parameters: Years, EPPCode")
        );
    }

    #[test]
    fn test_missing_contact_fields_uses_context_wire_names() {
        let mut params = ProviderParams::new();
        params.insert("FirstName".to_string(), "Ada".to_string());
        let missing = missing_contact_fields(&params, Context::User, "");
        assert!(missing.contains(&"Zip".to_string()));
        assert!(!missing.contains(&"FirstName".to_string()));
        assert_eq!(missing.len(), REQUIRED_FIELDS.len() - 1);
    }
}
