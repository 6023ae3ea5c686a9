use crate::app::services::{invalid_domain_response, require, sld_tld_params};
use crate::core::client::{CallOptions, NamecheapClient};
use crate::core::response::ApiResponse;
use crate::domain::model::RequestParams;
use crate::domain::ports::Transport;
use serde::{Deserialize, Serialize};

const SET_DEFAULT: &str = "namecheap.domains.dns.setDefault";
const SET_CUSTOM: &str = "namecheap.domains.dns.setCustom";
const GET_LIST: &str = "namecheap.domains.dns.getList";
const GET_HOSTS: &str = "namecheap.domains.dns.getHosts";
const GET_EMAIL_FORWARDING: &str = "namecheap.domains.dns.getEmailForwarding";
const SET_EMAIL_FORWARDING: &str = "namecheap.domains.dns.setEmailForwarding";
const SET_HOSTS: &str = "namecheap.domains.dns.setHosts";

/// One host record for `setHosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub host_name: String,
    /// `A`, `AAAA`, `CNAME`, `MX`, `TXT`, `URL`, ...
    pub record_type: String,
    pub address: String,
    #[serde(default)]
    pub mx_pref: Option<u32>,
    #[serde(default)]
    pub ttl: Option<u32>,
}

impl HostRecord {
    pub fn new(host_name: &str, record_type: &str, address: &str) -> Self {
        Self {
            host_name: host_name.to_string(),
            record_type: record_type.to_string(),
            address: address.to_string(),
            mx_pref: None,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_mx_pref(mut self, mx_pref: u32) -> Self {
        self.mx_pref = Some(mx_pref);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailForward {
    pub mailbox: String,
    pub forward_to: String,
}

pub struct DnsService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> DnsService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    pub async fn set_default(&self, domain: &str) -> ApiResponse {
        let Some(params) = sld_tld_params(domain) else {
            return invalid_domain_response(SET_DEFAULT, domain);
        };
        self.client.call(SET_DEFAULT, params).await
    }

    pub async fn set_custom(&self, domain: &str, nameservers: &[&str]) -> ApiResponse {
        let Some(params) = sld_tld_params(domain) else {
            return invalid_domain_response(SET_CUSTOM, domain);
        };
        let params = params.with("Nameservers", nameservers.join(","));
        if let Some(response) = require(SET_CUSTOM, &params, &["Nameservers"]) {
            return response;
        }
        self.client.call(SET_CUSTOM, params).await
    }

    pub async fn get_list(&self, domain: &str) -> ApiResponse {
        let Some(params) = sld_tld_params(domain) else {
            return invalid_domain_response(GET_LIST, domain);
        };
        self.client.call(GET_LIST, params).await
    }

    pub async fn get_hosts(&self, domain: &str) -> ApiResponse {
        let Some(params) = sld_tld_params(domain) else {
            return invalid_domain_response(GET_HOSTS, domain);
        };
        self.client.call(GET_HOSTS, params).await
    }

    pub async fn get_email_forwarding(&self, domain: &str) -> ApiResponse {
        let params = RequestParams::new().with("DomainName", domain.trim());
        if let Some(response) = require(GET_EMAIL_FORWARDING, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(GET_EMAIL_FORWARDING, params).await
    }

    pub async fn set_email_forwarding(
        &self,
        domain: &str,
        forwards: &[EmailForward],
    ) -> ApiResponse {
        let mut params = RequestParams::new().with("DomainName", domain.trim());
        if let Some(response) = require(SET_EMAIL_FORWARDING, &params, &["DomainName"]) {
            return response;
        }
        for (i, forward) in forwards.iter().enumerate() {
            let n = i + 1;
            params
                .set(format!("MailBox{}", n), &forward.mailbox)
                .set(format!("ForwardTo{}", n), &forward.forward_to);
        }
        self.client.call(SET_EMAIL_FORWARDING, params).await
    }

    /// Replaces every host record of `domain`. Records are numbered from 1.
    pub async fn set_hosts(
        &self,
        domain: &str,
        records: &[HostRecord],
        email_type: Option<&str>,
    ) -> ApiResponse {
        let Some(mut params) = sld_tld_params(domain) else {
            return invalid_domain_response(SET_HOSTS, domain);
        };
        for (i, record) in records.iter().enumerate() {
            let n = i + 1;
            params
                .set(format!("HostName{}", n), &record.host_name)
                .set(format!("RecordType{}", n), &record.record_type)
                .set(format!("Address{}", n), &record.address)
                .set_opt(format!("MXPref{}", n), record.mx_pref)
                .set_opt(format!("TTL{}", n), record.ttl);
        }
        params.set_opt("EmailType", email_type);
        self.client
            .call_with(SET_HOSTS, params, CallOptions::post())
            .await
    }
}
