use crate::app::services::require;
use crate::core::client::NamecheapClient;
use crate::core::response::ApiResponse;
use crate::domain::model::RequestParams;
use crate::domain::ports::Transport;

const CREATE: &str = "namecheap.domains.transfer.create";
const GET_STATUS: &str = "namecheap.domains.transfer.getStatus";
const UPDATE_STATUS: &str = "namecheap.domains.transfer.updateStatus";
const GET_LIST: &str = "namecheap.domains.transfer.getList";

pub struct TransferService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> TransferService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// Starts an inbound transfer. `epp_code` is the auth code from the
    /// losing registrar.
    pub async fn create(
        &self,
        domain: &str,
        years: u32,
        epp_code: &str,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with("Years", years)
            .with("EPPCode", epp_code)
            .with_opt("PromotionCode", promotion_code);
        if let Some(response) = require(CREATE, &params, &["DomainName", "EPPCode"]) {
            return response;
        }
        self.client.call(CREATE, params).await
    }

    pub async fn get_status(&self, transfer_id: u64) -> ApiResponse {
        let params = RequestParams::new().with("TransferID", transfer_id);
        self.client.call(GET_STATUS, params).await
    }

    pub async fn update_status(&self, transfer_id: u64, resubmit: bool) -> ApiResponse {
        let params = RequestParams::new()
            .with("TransferID", transfer_id)
            .with("Resubmit", resubmit);
        self.client.call(UPDATE_STATUS, params).await
    }

    pub async fn get_list(&self, list_type: Option<&str>, page: Option<u32>) -> ApiResponse {
        let params = RequestParams::new()
            .with_opt("ListType", list_type)
            .with_opt("Page", page);
        self.client.call(GET_LIST, params).await
    }
}
