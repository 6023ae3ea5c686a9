pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::ReqwestTransport;
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use core::{ApiResponse, CallOptions, NamecheapClient, OneOrMany, UserNameParam, XmlValue};
pub use domain::model::{
    ContactData, ContactRole, Context, HttpMethod, ProviderParams, RequestParams,
};
pub use domain::ports::{Transport, TransportReply};
pub use utils::error::{NamecheapError, Result};
