use crate::core::field_mapper::{mappings_for, FieldMapping};
use crate::domain::model::{ContactData, ContactRole, Context, ProviderParams};
use std::collections::BTreeMap;

/// Alias → canonical field. The alias is only used when the canonical key is absent.
const ALIASES: &[(&str, &str)] = &[("zip", "postalCode"), ("organization", "organizationName")];

/// Builds provider parameters from caller contact data.
///
/// For [`Context::Domain`] the input holds role-prefixed keys such as
/// `registrantFirstName`; every role found is emitted under its wire prefix
/// (`RegistrantFirstName`). Other contexts take flat keys and map them
/// without a prefix.
///
/// Unknown or null fields are skipped. Required fields are not checked here.
pub fn build(context: Context, input: &ContactData) -> ProviderParams {
    let mapping = mappings_for(context);
    let mut output = ProviderParams::new();

    match context {
        Context::Domain => {
            for role in ContactRole::ALL {
                let fields = extract_role_fields(input, role);
                if fields.is_empty() {
                    continue;
                }
                map_fields(&mut output, mapping, &normalize_aliases(fields), role.wire_prefix());
            }
        }
        Context::User | Context::UserAddress => {
            let fields: BTreeMap<String, String> = input
                .iter()
                .filter_map(|(key, value)| value_to_string(value).map(|v| (key.clone(), v)))
                .collect();
            map_fields(&mut output, mapping, &normalize_aliases(fields), "");
        }
    }

    output
}

/// Pulls `<role><Field>` keys out of `input` and strips them to `field`.
fn extract_role_fields(input: &ContactData, role: ContactRole) -> BTreeMap<String, String> {
    let prefix = role.input_prefix();
    input
        .iter()
        .filter_map(|(key, value)| {
            let rest = key.strip_prefix(prefix)?;
            let mut chars = rest.chars();
            let first = chars.next()?;
            if !first.is_ascii_uppercase() {
                return None;
            }
            let field = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
            value_to_string(value).map(|v| (field, v))
        })
        .collect()
}

fn normalize_aliases(mut fields: BTreeMap<String, String>) -> BTreeMap<String, String> {
    for (alias, canonical) in ALIASES {
        if let Some(value) = fields.remove(*alias) {
            fields.entry(canonical.to_string()).or_insert(value);
        }
    }
    fields
}

fn map_fields(
    output: &mut ProviderParams,
    mapping: FieldMapping,
    fields: &BTreeMap<String, String>,
    prefix: &str,
) {
    for (field, value) in fields {
        if let Some(wire) = mapping.get(field) {
            output.insert(format!("{}{}", prefix, wire), value.clone());
        }
    }
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}
