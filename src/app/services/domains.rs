use crate::app::services::{missing_contact_fields, missing_response, require};
use crate::core::client::{CallOptions, NamecheapClient};
use crate::core::contact_builder;
use crate::core::field_mapper::mappings_for;
use crate::core::response::ApiResponse;
use crate::domain::model::{ContactData, ContactRole, Context, ProviderParams, RequestParams};
use crate::domain::ports::Transport;

const GET_LIST: &str = "namecheap.domains.getList";
const GET_CONTACTS: &str = "namecheap.domains.getContacts";
const CREATE: &str = "namecheap.domains.create";
const GET_TLD_LIST: &str = "namecheap.domains.getTldList";
const SET_CONTACTS: &str = "namecheap.domains.setContacts";
const CHECK: &str = "namecheap.domains.check";
const REACTIVATE: &str = "namecheap.domains.reactivate";
const RENEW: &str = "namecheap.domains.renew";
const GET_REGISTRAR_LOCK: &str = "namecheap.domains.getRegistrarLock";
const SET_REGISTRAR_LOCK: &str = "namecheap.domains.setRegistrarLock";
const GET_INFO: &str = "namecheap.domains.getInfo";

/// Roles the provider requires on create and setContacts.
const REQUIRED_ROLES: [ContactRole; 4] = [
    ContactRole::Registrant,
    ContactRole::Tech,
    ContactRole::Admin,
    ContactRole::AuxBilling,
];

/// Roles filled from the registrant when left empty.
const FILLED_ROLES: [ContactRole; 3] = [
    ContactRole::Tech,
    ContactRole::Admin,
    ContactRole::AuxBilling,
];

#[derive(Debug, Clone, Default)]
pub struct DomainListQuery {
    /// `ALL`, `EXPIRING` or `EXPIRED`.
    pub list_type: Option<String>,
    pub search_term: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
}

/// Copies registrant fields into empty Tech, Admin and AuxBilling fields.
/// Fields that are already set are left alone.
pub fn fill_contacts_from_registrant(params: &mut ProviderParams) {
    let registrant = ContactRole::Registrant.wire_prefix();
    for role in FILLED_ROLES {
        for (_, wire) in mappings_for(Context::Domain).iter() {
            let source = params
                .get(&format!("{}{}", registrant, wire))
                .filter(|v| !v.is_empty())
                .cloned();
            let Some(value) = source else {
                continue;
            };
            let target = format!("{}{}", role.wire_prefix(), wire);
            if params.get(&target).map_or(true, |v| v.is_empty()) {
                params.insert(target, value);
            }
        }
    }
}

pub struct DomainsService<'a, T: Transport> {
    client: &'a NamecheapClient<T>,
}

impl<'a, T: Transport> DomainsService<'a, T> {
    pub fn new(client: &'a NamecheapClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, query: &DomainListQuery) -> ApiResponse {
        let params = RequestParams::new()
            .with_opt("ListType", query.list_type.as_deref())
            .with_opt("SearchTerm", query.search_term.as_deref())
            .with_opt("Page", query.page)
            .with_opt("PageSize", query.page_size)
            .with_opt("SortBy", query.sort_by.as_deref());
        self.client.call(GET_LIST, params).await
    }

    pub async fn get_contacts(&self, domain: &str) -> ApiResponse {
        let params = RequestParams::new().with("DomainName", domain);
        if let Some(response) = require(GET_CONTACTS, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(GET_CONTACTS, params).await
    }

    /// Registers `domain`. `contacts` uses role-prefixed keys
    /// (`registrantFirstName`, `techEmailAddress`, ...); `extra` carries
    /// optional flags such as `Nameservers` or `AddFreeWhoisguard`.
    pub async fn create(
        &self,
        domain: &str,
        years: u32,
        contacts: &ContactData,
        extra: RequestParams,
    ) -> ApiResponse {
        let mut params = extra;
        params.set("DomainName", domain).set("Years", years);
        if let Some(response) = require(CREATE, &params, &["DomainName"]) {
            return response;
        }
        let contact_params = match prepare_contacts(CREATE, contacts) {
            Ok(contact_params) => contact_params,
            Err(missing) => return missing_response(CREATE, "contact fields", &missing),
        };
        params.extend_provider(contact_params);
        self.client.call_with(CREATE, params, CallOptions::post()).await
    }

    pub async fn get_tld_list(&self) -> ApiResponse {
        self.client.call(GET_TLD_LIST, RequestParams::new()).await
    }

    pub async fn set_contacts(
        &self,
        domain: &str,
        contacts: &ContactData,
        extra: RequestParams,
    ) -> ApiResponse {
        let mut params = extra;
        params.set("DomainName", domain);
        if let Some(response) = require(SET_CONTACTS, &params, &["DomainName"]) {
            return response;
        }
        let contact_params = match prepare_contacts(SET_CONTACTS, contacts) {
            Ok(contact_params) => contact_params,
            Err(missing) => return missing_response(SET_CONTACTS, "contact fields", &missing),
        };
        params.extend_provider(contact_params);
        self.client
            .call_with(SET_CONTACTS, params, CallOptions::post())
            .await
    }

    pub async fn check(&self, domains: &[&str]) -> ApiResponse {
        let list: Vec<&str> = domains
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .collect();
        let params = RequestParams::new().with("DomainList", list.join(","));
        if let Some(response) = require(CHECK, &params, &["DomainList"]) {
            return response;
        }
        self.client.call(CHECK, params).await
    }

    pub async fn reactivate(
        &self,
        domain: &str,
        years_to_add: Option<u32>,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with_opt("YearsToAdd", years_to_add)
            .with_opt("PromotionCode", promotion_code);
        if let Some(response) = require(REACTIVATE, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(REACTIVATE, params).await
    }

    pub async fn renew(
        &self,
        domain: &str,
        years: u32,
        promotion_code: Option<&str>,
    ) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with("Years", years)
            .with_opt("PromotionCode", promotion_code);
        if let Some(response) = require(RENEW, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(RENEW, params).await
    }

    pub async fn get_registrar_lock(&self, domain: &str) -> ApiResponse {
        let params = RequestParams::new().with("DomainName", domain);
        if let Some(response) = require(GET_REGISTRAR_LOCK, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(GET_REGISTRAR_LOCK, params).await
    }

    pub async fn set_registrar_lock(&self, domain: &str, locked: bool) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with("LockAction", if locked { "LOCK" } else { "UNLOCK" });
        if let Some(response) = require(SET_REGISTRAR_LOCK, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(SET_REGISTRAR_LOCK, params).await
    }

    pub async fn get_info(&self, domain: &str, host_name: Option<&str>) -> ApiResponse {
        let params = RequestParams::new()
            .with("DomainName", domain)
            .with_opt("HostName", host_name);
        if let Some(response) = require(GET_INFO, &params, &["DomainName"]) {
            return response;
        }
        self.client.call(GET_INFO, params).await
    }
}

/// Builds, fills and checks the four required contact roles. `Err` carries
/// the required fields still empty afterwards.
fn prepare_contacts(command: &str, contacts: &ContactData) -> Result<ProviderParams, Vec<String>> {
    let mut params = contact_builder::build(Context::Domain, contacts);
    fill_contacts_from_registrant(&mut params);
    let missing: Vec<String> = REQUIRED_ROLES
        .iter()
        .flat_map(|role| missing_contact_fields(&params, Context::Domain, role.wire_prefix()))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }
    tracing::debug!("{}: {} contact fields prepared", command, params.len());
    Ok(params)
}
