use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Caller-supplied contact data with loosely typed, camelCase field names.
pub type ContactData = HashMap<String, serde_json::Value>;

/// Flat provider-ready parameters produced by the contact builder.
pub type ProviderParams = BTreeMap<String, String>;

/// Schema variant that decides how contact fields are named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Context {
    Domain,
    User,
    UserAddress,
}

/// Contact roles carried by domain registration commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactRole {
    Registrant,
    Tech,
    Admin,
    AuxBilling,
    Billing,
}

impl ContactRole {
    /// Fixed extraction order.
    pub const ALL: [ContactRole; 5] = [
        ContactRole::Registrant,
        ContactRole::Tech,
        ContactRole::Admin,
        ContactRole::AuxBilling,
        ContactRole::Billing,
    ];

    /// Input key prefix, e.g. `auxBilling` in `auxBillingFirstName`.
    pub fn input_prefix(self) -> &'static str {
        match self {
            Self::Registrant => "registrant",
            Self::Tech => "tech",
            Self::Admin => "admin",
            Self::AuxBilling => "auxBilling",
            Self::Billing => "billing",
        }
    }

    /// Wire prefix, e.g. `AuxBilling` in `AuxBillingFirstName`.
    pub fn wire_prefix(self) -> &'static str {
        match self {
            Self::Registrant => "Registrant",
            Self::Tech => "Tech",
            Self::Admin => "Admin",
            Self::AuxBilling => "AuxBilling",
            Self::Billing => "Billing",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Request parameters prior to transmission. `None` values are dropped by
/// [`RequestParams::to_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: BTreeMap<String, Option<String>>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.entries.insert(key.into(), Some(value.to_string()));
        self
    }

    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        self.entries
            .insert(key.into(), value.map(|v| v.to_string()));
        self
    }

    /// Builder form of [`RequestParams::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set_opt(key, value);
        self
    }

    pub fn extend_provider(&mut self, params: ProviderParams) -> &mut Self {
        for (key, value) in params {
            self.entries.insert(key, Some(value));
        }
        self
    }

    /// Copies entries from `other` that are not already set here.
    pub fn merge_missing(&mut self, other: &RequestParams) -> &mut Self {
        for (key, value) in &other.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key).flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key/value pairs ready for a query string or form body.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}
