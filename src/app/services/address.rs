use crate::app::services::{missing_contact_fields, missing_response};
use crate::core::client::NamecheapClient;
use crate::core::contact_builder;
use crate::core::response::ApiResponse;
use crate::domain::model::{ContactData, Context, RequestParams};
use crate::domain::ports::Transport;

const CREATE: &str = "namecheap.users.address.create";
const UPDATE: &str = "namecheap.users.address.update";
const DELETE: &str = "namecheap.users.address.delete";
const GET_INFO: &str = "namecheap.users.address.getInfo";
const GET_LIST: &str = "namecheap.users.address.getList";
const SET_DEFAULT: &str = "namecheap.users.address.setDefault";

/// Saved address book entries of the account.
pub struct AddressService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> AddressService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    /// `address` needs `addressName` plus the required contact fields.
    pub async fn create(&self, address: &ContactData) -> ApiResponse {
        let params = match address_params(CREATE, address) {
            Ok(params) => params,
            Err(missing) => return missing_response(CREATE, "contact fields", &missing),
        };
        self.client.call(CREATE, params).await
    }

    pub async fn update(&self, address_id: u64, address: &ContactData) -> ApiResponse {
        let params = match address_params(UPDATE, address) {
            Ok(params) => params,
            Err(missing) => return missing_response(UPDATE, "contact fields", &missing),
        };
        self.client
            .call(UPDATE, params.with("AddressId", address_id))
            .await
    }

    pub async fn delete(&self, address_id: u64) -> ApiResponse {
        self.client.call(DELETE, by_id(address_id)).await
    }

    pub async fn get_info(&self, address_id: u64) -> ApiResponse {
        self.client.call(GET_INFO, by_id(address_id)).await
    }

    pub async fn get_list(&self) -> ApiResponse {
        self.client.call(GET_LIST, RequestParams::new()).await
    }

    pub async fn set_default(&self, address_id: u64) -> ApiResponse {
        self.client.call(SET_DEFAULT, by_id(address_id)).await
    }
}

fn by_id(address_id: u64) -> RequestParams {
    RequestParams::new().with("AddressId", address_id)
}

/// Maps `address` and checks `AddressName` plus the required contact
/// fields. `Err` carries the missing wire names.
fn address_params(command: &str, address: &ContactData) -> Result<RequestParams, Vec<String>> {
    let built = contact_builder::build(Context::UserAddress, address);
    let mut missing = Vec::new();
    if built.get("AddressName").map_or(true, |v| v.trim().is_empty()) {
        missing.push("AddressName".to_string());
    }
    missing.extend(missing_contact_fields(&built, Context::UserAddress, ""));
    if !missing.is_empty() {
        return Err(missing);
    }
    tracing::debug!("{}: {} address fields prepared", command, built.len());
    let mut params = RequestParams::new();
    params.extend_provider(built);
    Ok(params)
}
