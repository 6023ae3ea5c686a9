use crate::core::xml_tree::{self, OneOrMany, XmlValue, TEXT_KEY};
use crate::domain::model::HttpMethod;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Transport details recorded in [`ApiResponse::meta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMeta {
    pub http_status: Option<u16>,
    pub endpoint: Option<String>,
    pub method: Option<HttpMethod>,
}

/// Normalized result of one API call.
///
/// Every call yields one of these, including calls that never reached the
/// network. `success` is true only when the provider reported `Status="OK"`
/// and no error was extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    success: bool,
    data: BTreeMap<String, OneOrMany<XmlValue>>,
    errors: Vec<String>,
    warnings: Vec<String>,
    command: String,
    /// Milliseconds, transport round trip plus normalization.
    execution_time: f64,
    #[serde(skip)]
    raw_body: String,
    meta: BTreeMap<String, serde_json::Value>,
}

impl ApiResponse {
    /// Normalizes a provider reply. A body that fails to parse yields the same
    /// shape as [`ApiResponse::from_transport_failure`] and the body is not kept.
    pub fn from_xml(
        raw_body: &str,
        command: &str,
        elapsed_ms: f64,
        transport: &TransportMeta,
    ) -> Self {
        let started = Instant::now();

        let document = match xml_tree::parse(raw_body) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("⚠️ {}: unparseable response: {}", command, e);
                return Self::from_transport_failure(
                    e.to_string(),
                    command,
                    elapsed_ms + elapsed_since(started),
                    None,
                );
            }
        };
        let root = &document.root;

        let status = root.attr("Status");
        let errors = collect_errors(root);
        let warnings = collect_warnings(root);
        let success = status.unwrap_or("ERROR").eq_ignore_ascii_case("OK") && errors.is_empty();

        let mut meta = BTreeMap::new();
        insert_some(&mut meta, "status", status.map(Into::into));
        insert_some(&mut meta, "xmlns", root.attr("xmlns").map(Into::into));
        insert_some(&mut meta, "server", root_field(root, "Server").map(Into::into));
        insert_some(
            &mut meta,
            "gmtTimeDifference",
            root_field(root, "GMTTimeDifference").map(Into::into),
        );
        insert_some(
            &mut meta,
            "providerExecutionTime",
            root_field(root, "ExecutionTime").map(Into::into),
        );
        insert_some(&mut meta, "httpStatusCode", transport.http_status.map(Into::into));
        insert_some(&mut meta, "endpoint", transport.endpoint.clone().map(Into::into));
        insert_some(
            &mut meta,
            "requestMethod",
            transport.method.map(|m| m.to_string().into()),
        );

        let data = collect_data(root);

        Self {
            success,
            data,
            errors,
            warnings,
            command: command.to_string(),
            execution_time: elapsed_ms + elapsed_since(started),
            raw_body: raw_body.to_string(),
            meta,
        }
    }

    /// Failure that produced no usable body: connection errors, rejected HTTP
    /// statuses and unparseable replies.
    pub fn from_transport_failure(
        message: impl Into<String>,
        command: &str,
        elapsed_ms: f64,
        code: Option<u32>,
    ) -> Self {
        Self {
            success: false,
            data: BTreeMap::new(),
            errors: vec![format_error(code, &message.into())],
            warnings: Vec::new(),
            command: command.to_string(),
            execution_time: elapsed_ms,
            raw_body: String::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Failure detected before any request was made.
    pub fn client_error(message: impl Into<String>, command: &str, code: u32) -> Self {
        Self::from_transport_failure(message, command, 0.0, Some(code))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> &BTreeMap<String, OneOrMany<XmlValue>> {
        &self.data
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn execution_time(&self) -> f64 {
        self.execution_time
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// The provider's reply exactly as received.
    pub fn raw_xml(&self) -> &str {
        &self.raw_body
    }

    pub fn meta(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.meta
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn elapsed_since(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn format_error(code: Option<u32>, message: &str) -> String {
    match code {
        Some(code) => format!("[{}] {}", code, message),
        None => message.to_string(),
    }
}

fn collect_errors(root: &XmlValue) -> Vec<String> {
    let Some(entries) = root.path(&["Errors", "Error"]) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let text = entry.text().filter(|t| !t.is_empty())?;
            let code = entry
                .attr("Number")
                .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
            Some(match code {
                Some(code) => format!("[{}] {}", code, text),
                None => text.to_string(),
            })
        })
        .collect()
}

fn collect_warnings(root: &XmlValue) -> Vec<String> {
    let Some(entries) = root.path(&["Warnings", "Warning"]) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(XmlValue::text)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn collect_data(root: &XmlValue) -> BTreeMap<String, OneOrMany<XmlValue>> {
    let command_response = root.child("CommandResponse").and_then(OneOrMany::first);
    let mut data = BTreeMap::new();
    match command_response {
        Some(XmlValue::Element(element)) => {
            data.extend(element.children.clone());
            if let Some(text) = &element.text {
                let text = XmlValue::Text(text.clone());
                data.insert(TEXT_KEY.to_string(), OneOrMany::One(text));
            }
        }
        Some(XmlValue::Text(text)) if !text.is_empty() => {
            let text = XmlValue::Text(text.clone());
            data.insert(TEXT_KEY.to_string(), OneOrMany::One(text));
        }
        _ => {}
    }

    if let Some(requested) = root.child("RequestedCommand") {
        data.insert("_requestedCommand".to_string(), requested.clone());
    }
    if let Some(server) = root.child("Server") {
        data.insert("_server".to_string(), server.clone());
    }
    data
}

/// Reads a root attribute, falling back to a text child of the same name.
fn root_field<'a>(root: &'a XmlValue, name: &str) -> Option<&'a str> {
    root.attr(name).or_else(|| {
        root.child(name)
            .and_then(OneOrMany::first)
            .and_then(XmlValue::text)
    })
}

fn insert_some(
    meta: &mut BTreeMap<String, serde_json::Value>,
    key: &str,
    value: Option<serde_json::Value>,
) {
    if let Some(value) = value {
        meta.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK_OK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>namecheap.domains.check</RequestedCommand>
  <CommandResponse Type="namecheap.domains.check">
    <DomainCheckResult Domain="example.com" Available="false" />
    <DomainCheckResult Domain="example.org" Available="true" />
  </CommandResponse>
  <Server>PHX01SBAPIEXT05</Server>
  <GMTTimeDifference>--4:00</GMTTimeDifference>
  <ExecutionTime>0.008</ExecutionTime>
</ApiResponse>"#;

    fn normalize(xml: &str) -> ApiResponse {
        ApiResponse::from_xml(xml, "namecheap.domains.check", 12.5, &TransportMeta::default())
    }

    #[test]
    fn test_successful_response() {
        let response = normalize(CHECK_OK);

        assert!(response.is_success());
        assert!(response.errors().is_empty());
        assert!(response.warnings().is_empty());
        assert_eq!(response.raw_body(), CHECK_OK);
        assert_eq!(response.command(), "namecheap.domains.check");

        let results = &response.data()["DomainCheckResult"];
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().nth(1).unwrap().attr("Available"), Some("true"));
        assert_eq!(
            response.data()["_requestedCommand"].first().unwrap().as_text(),
            Some("namecheap.domains.check")
        );
        assert_eq!(
            response.data()["_server"].first().unwrap().as_text(),
            Some("PHX01SBAPIEXT05")
        );
        assert!(!response.data().contains_key("_Type"));
    }

    #[test]
    fn test_meta_from_top_level_fields() {
        let transport = TransportMeta {
            http_status: Some(200),
            endpoint: Some("https://api.sandbox.namecheap.com/xml.response".to_string()),
            method: Some(HttpMethod::Get),
        };
        let response = ApiResponse::from_xml(CHECK_OK, "namecheap.domains.check", 0.0, &transport);
        let meta = response.meta();

        assert_eq!(meta["status"], "OK");
        assert_eq!(meta["xmlns"], "http://api.namecheap.com/xml.response");
        assert_eq!(meta["server"], "PHX01SBAPIEXT05");
        assert_eq!(meta["gmtTimeDifference"], "--4:00");
        assert_eq!(meta["httpStatusCode"], 200);
        assert_eq!(meta["requestMethod"], "GET");
    }

    #[test]
    fn test_null_meta_entries_are_omitted() {
        let response = normalize(r#"<ApiResponse Status="OK"><CommandResponse/></ApiResponse>"#);
        let keys: Vec<_> = response.meta().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["status"]);
    }

    #[test]
    fn test_command_response_text_is_kept() {
        let response = normalize(
            r#"<ApiResponse Status="OK"><CommandResponse Type="x">done</CommandResponse></ApiResponse>"#,
        );

        let keys: Vec<_> = response.data().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["text"]);
        let value = response.to_value().unwrap();
        assert_eq!(value["data"], serde_json::json!({"text": "done"}));
    }

    #[test]
    fn test_status_is_case_insensitive() {
        assert!(normalize(r#"<ApiResponse Status="ok"/>"#).is_success());
        assert!(normalize(r#"<ApiResponse Status="Ok"/>"#).is_success());
        assert!(!normalize(r#"<ApiResponse Status="ERROR"/>"#).is_success());
        assert!(!normalize(r#"<ApiResponse/>"#).is_success());
    }

    #[test]
    fn test_single_error_is_formatted_with_number() {
        let response = normalize(
            r#"<ApiResponse Status="ERROR"><Errors><Error Number="2019166">Domain is not available</Error></Errors></ApiResponse>"#,
        );
        assert!(!response.is_success());
        assert_eq!(response.errors(), ["[2019166] Domain is not available"]);
    }

    #[test]
    fn test_error_without_number_is_bare_text() {
        let response = normalize(
            r#"<ApiResponse Status="ERROR"><Errors><Error>Something broke</Error></Errors></ApiResponse>"#,
        );
        assert_eq!(response.errors(), ["Something broke"]);
    }

    #[test]
    fn test_multiple_errors_keep_order_and_skip_malformed() {
        let response = normalize(
            r#"<ApiResponse Status="ERROR"><Errors>
                <Error Number="1011102">Parameter APIKey is missing</Error>
                <Error><Detail>nested</Detail></Error>
                <Error Number="1010101">Parameter APIUser is missing</Error>
            </Errors></ApiResponse>"#,
        );
        assert_eq!(
            response.errors(),
            [
                "[1011102] Parameter APIKey is missing",
                "[1010101] Parameter APIUser is missing"
            ]
        );
    }

    #[test]
    fn test_errors_force_failure_even_with_ok_status() {
        let response = normalize(
            r#"<ApiResponse Status="OK"><Errors><Error Number="1">odd</Error></Errors></ApiResponse>"#,
        );
        assert!(!response.is_success());
    }

    #[test]
    fn test_warnings_use_text_only() {
        let response = normalize(
            r#"<ApiResponse Status="OK"><Warnings><Warning Number="5">Careful</Warning><Warning>Again</Warning></Warnings></ApiResponse>"#,
        );
        assert!(response.is_success());
        assert_eq!(response.warnings(), ["Careful", "Again"]);
    }

    #[test]
    fn test_malformed_xml_becomes_error_response() {
        let response = normalize("<Api");

        assert!(!response.is_success());
        assert_eq!(response.errors().len(), 1);
        assert!(response.data().is_empty());
        assert_eq!(response.raw_body(), "");
        assert!(response.execution_time() >= 12.5);
    }

    #[test]
    fn test_execution_time_includes_caller_elapsed() {
        let response = normalize(CHECK_OK);
        assert!(response.execution_time() >= 12.5);
    }

    #[test]
    fn test_client_error_shape() {
        let response = ApiResponse::client_error(
            "Authentication information must be provided.",
            "namecheap.domains.getList",
            1010101,
        );
        assert!(!response.is_success());
        assert_eq!(
            response.first_error(),
            Some("[1010101] Authentication information must be provided.")
        );
        assert_eq!(response.execution_time(), 0.0);
        assert!(response.meta().is_empty());
    }

    #[test]
    fn test_to_value_shape() {
        let value = normalize(CHECK_OK).to_value().unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["command"], "namecheap.domains.check");
        assert_eq!(value["data"]["DomainCheckResult"][0]["_Domain"], "example.com");
        assert!(value.get("rawBody").is_none());
        assert!(value["executionTime"].as_f64().unwrap() > 0.0);

        let json = normalize(CHECK_OK).to_json().unwrap();
        assert!(json.contains("\"errors\":[]"));
    }
}
