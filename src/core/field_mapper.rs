//! Normalized contact field names and their Namecheap wire names.
//!
//! The tables are written out by hand. Namecheap names the same field
//! differently per command family: `postalCode` is `PostalCode` on domain
//! contacts but `Zip` on users and user addresses, and `organizationName` is
//! `OrganizationName` on domains but `Organization` elsewhere.

use crate::domain::model::Context;

const DOMAIN_FIELDS: &[(&str, &str)] = &[
    ("organizationName", "OrganizationName"),
    ("jobTitle", "JobTitle"),
    ("firstName", "FirstName"),
    ("lastName", "LastName"),
    ("address1", "Address1"),
    ("address2", "Address2"),
    ("city", "City"),
    ("stateProvince", "StateProvince"),
    ("stateProvinceChoice", "StateProvinceChoice"),
    ("postalCode", "PostalCode"),
    ("country", "Country"),
    ("phone", "Phone"),
    ("phoneExt", "PhoneExt"),
    ("fax", "Fax"),
    ("emailAddress", "EmailAddress"),
];

const USER_FIELDS: &[(&str, &str)] = &[
    ("firstName", "FirstName"),
    ("lastName", "LastName"),
    ("jobTitle", "JobTitle"),
    ("organizationName", "Organization"),
    ("address1", "Address1"),
    ("address2", "Address2"),
    ("city", "City"),
    ("stateProvince", "StateProvince"),
    ("postalCode", "Zip"),
    ("country", "Country"),
    ("emailAddress", "EmailAddress"),
    ("phone", "Phone"),
    ("phoneExt", "PhoneExt"),
    ("fax", "Fax"),
];

const USER_ADDRESS_FIELDS: &[(&str, &str)] = &[
    ("addressName", "AddressName"),
    ("defaultYN", "DefaultYN"),
    ("emailAddress", "EmailAddress"),
    ("firstName", "FirstName"),
    ("lastName", "LastName"),
    ("jobTitle", "JobTitle"),
    ("organizationName", "Organization"),
    ("address1", "Address1"),
    ("address2", "Address2"),
    ("city", "City"),
    ("stateProvince", "StateProvince"),
    ("stateProvinceChoice", "StateProvinceChoice"),
    ("postalCode", "Zip"),
    ("country", "Country"),
    ("phone", "Phone"),
    ("phoneExt", "PhoneExt"),
    ("fax", "Fax"),
];

/// Fields the provider rejects a contact without, in every context.
pub const REQUIRED_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "address1",
    "city",
    "stateProvince",
    "postalCode",
    "country",
    "phone",
    "emailAddress",
];

/// Read-only view over one context's table.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMapping {
    /// Wire name for a normalized field; `None` means the field does not
    /// apply to this context.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(normalized, _)| *normalized == field)
            .map(|(_, wire)| *wire)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn mappings_for(context: Context) -> FieldMapping {
    let entries = match context {
        Context::Domain => DOMAIN_FIELDS,
        Context::User => USER_FIELDS,
        Context::UserAddress => USER_ADDRESS_FIELDS,
    };
    FieldMapping { entries }
}
