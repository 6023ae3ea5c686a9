use httpmock::prelude::*;
use namecheap_api::{ClientConfig, ContactData, NamecheapClient, RequestParams};
use serde_json::json;

const CHECK_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>namecheap.domains.check</RequestedCommand>
  <CommandResponse Type="namecheap.domains.check">
    <DomainCheckResult Domain="example.com" Available="false" />
    <DomainCheckResult Domain="example-unique.net" Available="true" />
  </CommandResponse>
  <Server>PHX01APIEXT01</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.296</ExecutionTime>
</ApiResponse>"#;

const ERROR_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011102">Parameter APIKey is invalid</Error>
  </Errors>
  <Warnings />
  <RequestedCommand>namecheap.domains.getlist</RequestedCommand>
  <Server>PHX01APIEXT02</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.002</ExecutionTime>
</ApiResponse>"#;

const CREATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>namecheap.domains.create</RequestedCommand>
  <CommandResponse Type="namecheap.domains.create">
    <DomainCreateResult Domain="example-unique.net" Registered="true" ChargedAmount="10.8700" DomainID="9007" />
  </CommandResponse>
  <Server>PHX01APIEXT01</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>2.1</ExecutionTime>
</ApiResponse>"#;

fn client_for(server: &MockServer) -> NamecheapClient {
    let config = ClientConfig::sandbox("alice", "secret", "203.0.113.7")
        .with_endpoint(&server.url("/xml.response"));
    NamecheapClient::new(config).unwrap()
}

fn registrant() -> ContactData {
    [
        ("registrantFirstName", "Ada"),
        ("registrantLastName", "Lovelace"),
        ("registrantAddress1", "12 St James Square"),
        ("registrantCity", "London"),
        ("registrantStateProvince", "London"),
        ("registrantPostalCode", "SW1Y4JH"),
        ("registrantCountry", "GB"),
        ("registrantPhone", "+44.2070000000"),
        ("registrantEmailAddress", "ada@example.com"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), json!(v)))
    .collect()
}

#[tokio::test]
async fn test_domains_check_end_to_end() -> anyhow::Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/xml.response")
            .query_param("ApiUser", "alice")
            .query_param("ApiKey", "secret")
            .query_param("UserName", "alice")
            .query_param("ClientIp", "203.0.113.7")
            .query_param("Command", "namecheap.domains.check")
            .query_param("DomainList", "example.com,example-unique.net");
        then.status(200)
            .header("Content-Type", "text/xml")
            .body(CHECK_RESPONSE);
    });

    let client = client_for(&server);
    let response = client
        .domains()
        .check(&["example.com", "example-unique.net"])
        .await;

    api_mock.assert();
    assert!(response.is_success());
    assert!(response.errors().is_empty());
    assert_eq!(response.command(), "namecheap.domains.check");

    let results = &response.data()["DomainCheckResult"];
    assert!(results.is_many());
    let available: Vec<&str> = results.iter().filter_map(|r| r.attr("Available")).collect();
    assert_eq!(available, vec!["false", "true"]);

    let value = response.to_value()?;
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["DomainCheckResult"][1]["_Domain"], "example-unique.net");
    assert_eq!(value["data"]["_server"], "PHX01APIEXT01");
    assert_eq!(value["meta"]["providerExecutionTime"], "0.296");
    assert_eq!(value["meta"]["httpStatusCode"], 200);
    assert!(value.get("rawBody").is_none());
    assert!(response.raw_xml().contains("DomainCheckResult"));
    Ok(())
}

#[tokio::test]
async fn test_provider_error_is_normalized() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/xml.response");
        then.status(200).body(ERROR_RESPONSE);
    });

    let client = client_for(&server);
    let response = client
        .domains()
        .get_list(&Default::default())
        .await;

    assert!(!response.is_success());
    assert_eq!(response.errors(), ["[1011102] Parameter APIKey is invalid"]);
    assert_eq!(response.meta()["status"], "ERROR");
    assert!(response.data().contains_key("_requestedCommand"));
    Ok(())
}

#[tokio::test]
async fn test_domain_create_posts_filled_contacts() -> anyhow::Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/xml.response")
            .body_contains("Command=namecheap.domains.create")
            .body_contains("DomainName=example-unique.net")
            .body_contains("RegistrantFirstName=Ada")
            .body_contains("TechFirstName=Ada")
            .body_contains("AdminPostalCode=SW1Y4JH")
            .body_contains("AuxBillingEmailAddress=ada%40example.com");
        then.status(200).body(CREATE_RESPONSE);
    });

    let client = client_for(&server);
    let response = client
        .domains()
        .create("example-unique.net", 1, &registrant(), RequestParams::new())
        .await;

    api_mock.assert();
    assert!(response.is_success());
    let result = response.data()["DomainCreateResult"]
        .first()
        .and_then(|r| r.attr("Registered"));
    assert_eq!(result, Some("true"));
    assert_eq!(response.meta()["requestMethod"], "POST");
    Ok(())
}

#[tokio::test]
async fn test_malformed_xml_becomes_error_response() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/xml.response");
        then.status(200).body("<ApiResponse Status=\"OK\"><Errors></ApiResponse>");
    });

    let client = client_for(&server);
    let response = client.domains().get_tld_list().await;

    assert!(!response.is_success());
    assert_eq!(response.errors().len(), 1);
    assert_eq!(response.raw_body(), "");
    assert!(response.data().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_http_errors_map_to_messages() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).query_param("Command", "namecheap.domains.getTldList");
        then.status(403).body("Forbidden");
    });
    server.mock(|when, then| {
        when.method(GET).query_param("Command", "namecheap.users.getBalances");
        then.status(500).body("oops");
    });

    let client = client_for(&server);
    let denied = client.domains().get_tld_list().await;
    assert_eq!(denied.errors(), ["Permission denied"]);

    let failed = client.users().get_balances().await;
    assert_eq!(failed.errors(), ["HTTP request failed with status 500"]);
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_skip_the_network() -> anyhow::Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).body(CHECK_RESPONSE);
    });

    let config = ClientConfig::sandbox("alice", "", "203.0.113.7")
        .with_endpoint(&server.url("/xml.response"));
    let client = NamecheapClient::new(config)?;
    let response = client.domains().check(&["example.com"]).await;

    api_mock.assert_hits(0);
    assert_eq!(
        response.errors(),
        ["[1010101] Authentication information must be provided."]
    );
    assert_eq!(response.execution_time(), 0.0);
    Ok(())
}
