use crate::app::services::require;
use crate::core::client::NamecheapClient;
use crate::core::response::ApiResponse;
use crate::domain::model::RequestParams;
use crate::domain::ports::Transport;

const CHANGE_EMAIL_ADDRESS: &str = "namecheap.whoisguard.changeemailaddress";
const ENABLE: &str = "namecheap.whoisguard.enable";
const DISABLE: &str = "namecheap.whoisguard.disable";
const GET_LIST: &str = "namecheap.whoisguard.getList";
const RENEW: &str = "namecheap.whoisguard.renew";
const ALLOT: &str = "namecheap.whoisguard.allot";
const UNALLOT: &str = "namecheap.whoisguard.unallot";

/// WhoisGuard privacy subscriptions, addressed by `WhoisguardID`.
pub struct WhoisguardService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> WhoisguardService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    pub async fn change_email_address(&self, whoisguard_id: u64) -> ApiResponse {
        self.client
            .call(CHANGE_EMAIL_ADDRESS, by_id(whoisguard_id))
            .await
    }

    pub async fn enable(&self, whoisguard_id: u64, forwarded_to_email: &str) -> ApiResponse {
        let params = by_id(whoisguard_id).with("ForwardedToEmail", forwarded_to_email.trim());
        if let Some(response) = require(ENABLE, &params, &["ForwardedToEmail"]) {
            return response;
        }
        self.client.call(ENABLE, params).await
    }

    pub async fn disable(&self, whoisguard_id: u64) -> ApiResponse {
        self.client.call(DISABLE, by_id(whoisguard_id)).await
    }

    pub async fn get_list(
        &self,
        list_type: Option<&str>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with_opt("ListType", list_type)
            .with_opt("Page", page)
            .with_opt("PageSize", page_size);
        self.client.call(GET_LIST, params).await
    }

    pub async fn renew(
        &self,
        whoisguard_id: u64,
        years: u32,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = by_id(whoisguard_id)
            .with("Years", years)
            .with_opt("PromotionCode", promotion_code);
        self.client.call(RENEW, params).await
    }

    /// Attaches an unused subscription to `domain`.
    pub async fn allot(
        &self,
        whoisguard_id: u64,
        domain: &str,
        forwarded_to_email: Option<&str>,
        enable: bool,
    ) -> ApiResponse {
        let params = by_id(whoisguard_id)
            .with("DomainName", domain.trim())
            .with_opt("ForwardedToEmail", forwarded_to_email)
            .with("EnableWG", enable);
        if let Some(response) = require(ALLOT, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(ALLOT, params).await
    }

    pub async fn unallot(&self, whoisguard_id: u64) -> ApiResponse {
        self.client.call(UNALLOT, by_id(whoisguard_id)).await
    }
}

fn by_id(whoisguard_id: u64) -> RequestParams {
    RequestParams::new().with("WhoisguardID", whoisguard_id)
}
