use crate::app::services::{invalid_domain_response, require, sld_tld_params};
use crate::core::client::NamecheapClient;
use crate::core::response::ApiResponse;
use crate::domain::model::RequestParams;
use crate::domain::ports::Transport;

const CREATE: &str = "namecheap.domains.ns.create";
const DELETE: &str = "namecheap.domains.ns.delete";
const GET_INFO: &str = "namecheap.domains.ns.getInfo";
const UPDATE: &str = "namecheap.domains.ns.update";

/// Child nameservers registered under a domain.
pub struct NsService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> NsService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    pub async fn create(&self, domain: &str, nameserver: &str, ip: &str) -> ApiResponse {
        let params = RequestParams::new()
            .with("Nameserver", nameserver)
            .with("IP", ip);
        self.send(CREATE, domain, params, &["Nameserver", "IP"]).await
    }

    pub async fn delete(&self, domain: &str, nameserver: &str) -> ApiResponse {
        let params = RequestParams::new().with("Nameserver", nameserver);
        self.send(DELETE, domain, params, &["Nameserver"]).await
    }

    pub async fn get_info(&self, domain: &str, nameserver: &str) -> ApiResponse {
        let params = RequestParams::new().with("Nameserver", nameserver);
        self.send(GET_INFO, domain, params, &["Nameserver"]).await
    }

    pub async fn update(
        &self,
        domain: &str,
        nameserver: &str,
        old_ip: &str,
        ip: &str,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("Nameserver", nameserver)
            .with("OldIP", old_ip)
            .with("IP", ip);
        self.send(UPDATE, domain, params, &["Nameserver", "OldIP", "IP"])
            .await
    }

    async fn send(
        &self,
        command: &str,
        domain: &str,
        params: RequestParams,
        required: &[&str],
    ) -> ApiResponse {
        let Some(mut request) = sld_tld_params(domain) else {
            return invalid_domain_response(command, domain);
        };
        if let Some(response) = require(command, &params, required) {
            return response;
        }
        request.merge_missing(&params);
        self.client.call(command, request).await
    }
}
