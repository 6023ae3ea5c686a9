use crate::app::services::{missing_contact_fields, missing_response, require};
use crate::core::client::{CallOptions, NamecheapClient};
use crate::core::contact_builder;
use crate::core::response::ApiResponse;
use crate::domain::model::{ContactData, Context, RequestParams};
use crate::domain::ports::Transport;
use serde::{Deserialize, Serialize};
use std::fmt;

const GET_PRICING: &str = "namecheap.users.getPricing";
const GET_BALANCES: &str = "namecheap.users.getBalances";
const CHANGE_PASSWORD: &str = "namecheap.users.changePassword";
const UPDATE: &str = "namecheap.users.update";
const CREATE_ADD_FUNDS_REQUEST: &str = "namecheap.users.createaddfundsrequest";
const GET_ADD_FUNDS_STATUS: &str = "namecheap.users.getAddFundsStatus";
const CREATE: &str = "namecheap.users.create";
const LOGIN: &str = "namecheap.users.login";
const RESET_PASSWORD: &str = "namecheap.users.resetPassword";

#[derive(Debug, Clone, Default)]
pub struct PricingQuery {
    /// `DOMAIN`, `SSLCERTIFICATE` or `WHOISGUARD`.
    pub product_type: String,
    pub product_category: Option<String>,
    pub promotion_code: Option<String>,
    pub action_name: Option<String>,
    pub product_name: Option<String>,
}

/// How `resetPassword` locates the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindBy {
    EmailAddress,
    DomainName,
    UserName,
}

impl fmt::Display for FindBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailAddress => write!(f, "EMAILADDRESS"),
            Self::DomainName => write!(f, "DOMAINNAME"),
            Self::UserName => write!(f, "USERNAME"),
        }
    }
}

pub struct UsersService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> UsersService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_pricing(&self, query: &PricingQuery) -> ApiResponse {
        let params = RequestParams::new()
            .with("ProductType", &query.product_type)
            .with_opt("ProductCategory", query.product_category.as_deref())
            .with_opt("PromotionCode", query.promotion_code.as_deref())
            .with_opt("ActionName", query.action_name.as_deref())
            .with_opt("ProductName", query.product_name.as_deref());
        if let Some(response) = require(GET_PRICING, &params, &["ProductType"]) {
            return response;
        }
        self.client.call(GET_PRICING, params).await
    }

    pub async fn get_balances(&self) -> ApiResponse {
        self.client.call(GET_BALANCES, RequestParams::new()).await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResponse {
        let params = RequestParams::new()
            .with("OldPassword", old_password)
            .with("NewPassword", new_password);
        if let Some(response) = require(CHANGE_PASSWORD, &params, &["OldPassword", "NewPassword"]) {
            return response;
        }
        self.client.call(CHANGE_PASSWORD, params).await
    }

    /// Second half of the reset flow; the reset code identifies the account.
    pub async fn change_password_with_reset_code(
        &self,
        reset_code: &str,
        new_password: &str,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("ResetCode", reset_code)
            .with("NewPassword", new_password);
        if let Some(response) = require(CHANGE_PASSWORD, &params, &["ResetCode", "NewPassword"]) {
            return response;
        }
        self.client
            .call_with(CHANGE_PASSWORD, params, CallOptions::default().without_user_name())
            .await
    }

    /// Updates the account contact. Keys are unprefixed (`firstName`, `zip`, ...).
    pub async fn update(&self, contact: &ContactData) -> ApiResponse {
        let built = contact_builder::build(Context::User, contact);
        let missing = missing_contact_fields(&built, Context::User, "");
        if !missing.is_empty() {
            return missing_response(UPDATE, "contact fields", &missing);
        }
        let mut params = RequestParams::new();
        params.extend_provider(built);
        self.client.call(UPDATE, params).await
    }

    /// Add-funds requests name the account explicitly through `Username`.
    pub async fn create_add_funds_request(
        &self,
        username: &str,
        amount: f64,
        return_url: &str,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("Username", username)
            .with("PaymentType", "Creditcard")
            .with("Amount", amount)
            .with("ReturnUrl", return_url);
        let required = ["Username", "ReturnUrl"];
        if let Some(response) = require(CREATE_ADD_FUNDS_REQUEST, &params, &required) {
            return response;
        }
        self.client
            .call_with(
                CREATE_ADD_FUNDS_REQUEST,
                params,
                CallOptions::default().without_user_name(),
            )
            .await
    }

    pub async fn get_add_funds_status(&self, token_id: &str) -> ApiResponse {
        let params = RequestParams::new().with("TokenId", token_id);
        if let Some(response) = require(GET_ADD_FUNDS_STATUS, &params, &["TokenId"]) {
            return response;
        }
        self.client.call(GET_ADD_FUNDS_STATUS, params).await
    }

    /// Creates a sub-account. Terms are always accepted.
    pub async fn create(
        &self,
        new_user_name: &str,
        new_user_password: &str,
        contact: &ContactData,
        accept_news: bool,
    ) -> ApiResponse {
        let mut params = RequestParams::new()
            .with("NewUserName", new_user_name)
            .with("NewUserPassword", new_user_password)
            .with("AcceptTerms", 1)
            .with("AcceptNews", u8::from(accept_news));
        if let Some(response) = require(CREATE, &params, &["NewUserName", "NewUserPassword"]) {
            return response;
        }
        let built = contact_builder::build(Context::User, contact);
        let missing = missing_contact_fields(&built, Context::User, "");
        if !missing.is_empty() {
            return missing_response(CREATE, "contact fields", &missing);
        }
        params.extend_provider(built);
        self.client.call(CREATE, params).await
    }

    pub async fn login(&self, password: &str) -> ApiResponse {
        let params = RequestParams::new().with("Password", password);
        if let Some(response) = require(LOGIN, &params, &["Password"]) {
            return response;
        }
        self.client.call(LOGIN, params).await
    }

    pub async fn reset_password(
        &self,
        find_by: FindBy,
        find_by_value: &str,
        email_from_name: Option<&str>,
        email_from: Option<&str>,
        url_pattern: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("FindBy", find_by)
            .with("FindByValue", find_by_value)
            .with_opt("EmailFromName", email_from_name)
            .with_opt("EmailFrom", email_from)
            .with_opt("URLPattern", url_pattern);
        if let Some(response) = require(RESET_PASSWORD, &params, &["FindByValue"]) {
            return response;
        }
        self.client
            .call_with(RESET_PASSWORD, params, CallOptions::default().without_user_name())
            .await
    }
}
