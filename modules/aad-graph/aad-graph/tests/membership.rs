#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for directory membership resolution.
//!
//! A local `httpmock` server stands in for the Graph `memberOf` endpoint.
//! These tests verify that:
//! 1. Requests carry the bearer token and the OData/api-version headers
//! 2. Allow-listed groups from the response become `ROLE_` authorities
//! 3. Configured groups become authorities in configured order
//! 4. Failures surface as errors without partial results

use std::sync::Arc;

use aad_graph::AadGraphConfig;
use aad_graph::config::ServiceEndpointsConfig;
use aad_graph_sdk::{AadGraphClient, AadGraphError, UserGroup};
use aad_security::GrantedAuthority;
use httpmock::prelude::*;

const BEARER_TOKEN: &str = "Bearer real_jtw_bearer_token";
const ACCEPT: &str = "application/json;odata=minimalmetadata";

const USERGROUPS_JSON: &str = r#"{
    "odata.metadata": "https://graph.windows.net/myorganization/$metadata#directoryObjects",
    "value": [
        {
            "odata.type": "Microsoft.DirectoryServices.Group",
            "objectType": "Group",
            "objectId": "12345678-7baf-48ce-96f4-a2d60c26391e",
            "description": "this is group1",
            "displayName": "group1",
            "securityEnabled": true
        },
        {
            "odata.type": "Microsoft.DirectoryServices.Group",
            "objectType": "Group",
            "objectId": "12345678-e757-4474-b9c4-3f00a9ac17a0",
            "description": "this is group2",
            "displayName": "group2",
            "securityEnabled": true
        },
        {
            "odata.type": "Microsoft.DirectoryServices.Group",
            "objectType": "Group",
            "objectId": "12345678-86a4-4237-aeb0-60bad29c1de0",
            "description": "this is group3",
            "displayName": "group3",
            "securityEnabled": true
        },
        {
            "odata.type": "Microsoft.DirectoryServices.DirectoryRole",
            "objectType": "Role",
            "objectId": "12345678-3b27-4b4e-8d79-fd0be0b1b7a2",
            "displayName": "Company Administrator"
        }
    ]
}"#;

fn config(server: &MockServer) -> AadGraphConfig {
    AadGraphConfig {
        endpoints: ServiceEndpointsConfig::empty().with("global", &server.url("/memberOf")),
        ..AadGraphConfig::default()
    }
}

fn client(cfg: &AadGraphConfig) -> Arc<dyn AadGraphClient> {
    aad_graph::module::init(cfg).expect("client initializes")
}

fn roles(authorities: &[GrantedAuthority]) -> Vec<&str> {
    authorities.iter().map(GrantedAuthority::authority).collect()
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
}

#[tokio::test]
async fn authorities_by_allowed_user_groups() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/memberOf")
                .header("Authorization", BEARER_TOKEN)
                .header("Accept", ACCEPT)
                .header("api-version", "1.6");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.user_group.allowed_groups = strings(&["group1"]);

    let authorities = client(&cfg).granted_authorities(BEARER_TOKEN).await.unwrap();

    mock.assert_async().await;
    assert_eq!(roles(&authorities), vec!["ROLE_group1"]);
}

#[tokio::test]
async fn authorities_from_configured_groups() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/memberOf")
                .header("Authorization", BEARER_TOKEN)
                .header("Accept", ACCEPT)
                .header("api-version", "1.6");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1", "group2", "group3"]);

    let authorities = client(&cfg).granted_authorities(BEARER_TOKEN).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        roles(&authorities),
        vec!["ROLE_group1", "ROLE_group2", "ROLE_group3"]
    );
}

#[tokio::test]
async fn configured_groups_do_not_depend_on_response_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("[]");
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["zeta", "alpha", "mid"]);

    let authorities = client(&cfg).granted_authorities(BEARER_TOKEN).await.unwrap();

    assert_eq!(roles(&authorities), vec!["ROLE_zeta", "ROLE_alpha", "ROLE_mid"]);
}

#[tokio::test]
async fn allow_list_keeps_response_order_and_skips_roles() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.user_group.allowed_groups =
        strings(&["group3", "Company Administrator", "group1", "unknown"]);

    let authorities = client(&cfg).granted_authorities(BEARER_TOKEN).await.unwrap();

    assert_eq!(roles(&authorities), vec!["ROLE_group1", "ROLE_group3"]);
}

#[tokio::test]
async fn user_groups_lists_group_entries_only() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let groups = client(&config(&server)).user_groups(BEARER_TOKEN).await.unwrap();

    let names: Vec<&str> = groups.iter().map(|g| g.display_name.as_str()).collect();
    assert_eq!(names, vec!["group1", "group2", "group3"]);
    assert_eq!(
        groups[0],
        UserGroup {
            object_id: "12345678-7baf-48ce-96f4-a2d60c26391e".to_owned(),
            display_name: "group1".to_owned(),
        }
    );
}

#[tokio::test]
async fn custom_group_key_matches_graph_v1_payloads() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(
                    r##"{"value":[
                        {"@odata.type":"#microsoft.graph.group","id":"g-1","displayName":"group1"},
                        {"@odata.type":"#microsoft.graph.directoryRole","id":"r-1","displayName":"group2"}
                    ]}"##,
                );
        })
        .await;

    let mut cfg = config(&server);
    let user_group = &mut cfg.authentication.user_group;
    user_group.key = "@odata.type".to_owned();
    user_group.value = "#microsoft.graph.group".to_owned();
    user_group.object_id_key = "id".to_owned();
    user_group.allowed_groups = strings(&["group1", "group2"]);

    let graph = client(&cfg);
    let groups = graph.user_groups(BEARER_TOKEN).await.unwrap();
    let authorities = graph.granted_authorities(BEARER_TOKEN).await.unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].object_id, "g-1");
    assert_eq!(roles(&authorities), vec!["ROLE_group1"]);
}

#[tokio::test]
async fn authorization_header_is_passed_through_verbatim() {
    let token = "eyJhbGciOiJSUzI1NiJ9.e30.c2ln";
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf").header("Authorization", token);
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1"]);

    client(&cfg).granted_authorities(token).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_fails_lookup() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(500).body("internal failure");
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1", "group2", "group3"]);

    let result = client(&cfg).granted_authorities(BEARER_TOKEN).await;

    mock.assert_async().await;
    match result {
        Err(AadGraphError::DirectoryLookup(msg)) => assert!(msg.contains("500"), "{msg}"),
        other => panic!("Expected DirectoryLookup, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_200_success_status_fails_lookup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(204);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1"]);

    let result = client(&cfg).granted_authorities(BEARER_TOKEN).await;

    assert!(matches!(result, Err(AadGraphError::DirectoryLookup(_))));
}

#[tokio::test]
async fn malformed_body_fails_lookup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{ not json");
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1"]);

    let result = client(&cfg).granted_authorities(BEARER_TOKEN).await;

    assert!(matches!(result, Err(AadGraphError::DirectoryLookup(_))));
}

#[tokio::test]
async fn unexpected_shape_fails_allow_list_lookup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"groups":["group1"]}"#);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.user_group.allowed_groups = strings(&["group1"]);

    let result = client(&cfg).granted_authorities(BEARER_TOKEN).await;

    assert!(matches!(result, Err(AadGraphError::DirectoryLookup(_))));
}

#[tokio::test]
async fn missing_endpoint_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.environment = "cn-v2-graph".to_owned();
    cfg.authentication.active_directory_groups = strings(&["group1"]);

    let result = client(&cfg).granted_authorities(BEARER_TOKEN).await;

    match result {
        Err(AadGraphError::MissingEndpoint { environment }) => {
            assert_eq!(environment, "cn-v2-graph");
        }
        other => panic!("Expected MissingEndpoint, got: {other:?}"),
    }
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn empty_token_is_rejected_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.active_directory_groups = strings(&["group1"]);

    let result = client(&cfg).granted_authorities("").await;

    assert!(matches!(result, Err(AadGraphError::Unauthorized(_))));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn each_call_issues_exactly_one_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/memberOf");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(USERGROUPS_JSON);
        })
        .await;

    let mut cfg = config(&server);
    cfg.authentication.user_group.allowed_groups = strings(&["group2"]);
    let graph = client(&cfg);

    for _ in 0..3 {
        let authorities = graph.granted_authorities(BEARER_TOKEN).await.unwrap();
        assert_eq!(roles(&authorities), vec!["ROLE_group2"]);
    }

    mock.assert_hits_async(3).await;
}
