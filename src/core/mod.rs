pub mod client;
pub mod codes;
pub mod contact_builder;
pub mod field_mapper;
pub mod response;
pub mod xml_tree;

pub use client::{CallOptions, NamecheapClient, UserNameParam};
pub use response::{ApiResponse, TransportMeta};
pub use xml_tree::{OneOrMany, XmlDocument, XmlElement, XmlValue};
