//! Endpoint-level tests against an in-process fake Gravibase.

mod support;

use grav_client::{ClientError, ClientSettings, GravibaseClient, Registration};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::FakeServer;

fn client(server: &FakeServer) -> GravibaseClient {
    GravibaseClient::new(ClientSettings::new(&server.base_url, "minicrm")).unwrap()
}

fn ok(body: serde_json::Value) -> (u16, String) {
    (200, body.to_string())
}

#[tokio::test]
async fn authenticate_posts_form_and_attaches_bearer_afterwards() {
    let server = FakeServer::start(|req| match (req.method.as_str(), req.path()) {
        ("POST", "/auth/projects/apps/token") => ok(json!({"access_token": "tok-123"})),
        ("GET", "/generator/projects/minicrm/schema/entities") => {
            ok(json!({"data": [{"name": "Deal"}, {"name": "Tag"}]}))
        }
        _ => (404, String::new()),
    });

    let mut client = client(&server);
    client.authenticate("apps", "admin", "p@ss word").await.unwrap();
    assert!(client.is_authenticated());

    let entities = client.entities().await.unwrap();
    let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Deal", "Tag"]);

    let requests = server.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(requests[0].body, "login=admin&password=p%40ss+word");
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn authenticate_failure_carries_status_and_body() {
    let server = FakeServer::start(|_| (401, r#"{"error":"invalid credentials"}"#.to_string()));

    let mut client = client(&server);
    let err = client.authenticate("apps", "admin", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("invalid credentials"));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn token_without_access_token_is_a_parse_error() {
    let server = FakeServer::start(|_| ok(json!({"token_type": "bearer"})));

    let mut client = client(&server);
    let err = client.authenticate("apps", "admin", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn attributes_accept_both_envelopes() {
    let server = FakeServer::start(|req| match req.path() {
        "/generator/projects/minicrm/schema/entities/Deal/attributes" => {
            ok(json!({"data": [{"name": "name"}, {"name": "closedAt"}]}))
        }
        "/generator/projects/minicrm/schema/entities/Tag/attributes" => {
            ok(json!({"attributes": [{"name": "company"}]}))
        }
        _ => (500, "boom".to_string()),
    });

    let client = client(&server);
    let deal = client.attributes("Deal").await.unwrap();
    assert_eq!(deal.len(), 2);
    let tag = client.attributes("Tag").await.unwrap();
    assert_eq!(tag[0].name, "company");

    let err = client.attributes("Company").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}

#[tokio::test]
async fn register_user_sends_password_flow_json() {
    let server = FakeServer::start(|req| match (req.method.as_str(), req.path()) {
        ("POST", "/auth/projects/minicrm/users") => (202, String::new()),
        _ => (404, String::new()),
    });

    let client = client(&server);
    let status = client
        .register_user(&Registration::password("test-user-9", "t9@example.com", "pw"))
        .await
        .unwrap();
    assert_eq!(status, 202);

    let sent: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert_eq!(sent["flow"], "password");
    assert_eq!(sent["profile"][0]["attribute"], "email");
    assert_eq!(sent["profile"][0]["value"], "t9@example.com");
}

#[tokio::test]
async fn register_user_rejects_no_content() {
    let server = FakeServer::start(|_| (204, String::new()));
    let err = client(&server)
        .register_user(&Registration::password("u", "e@x", "pw"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn list_users_passes_limit_and_search() {
    let server = FakeServer::start(|_| {
        ok(json!({"data": [{"username": "test-user-1", "email": "a@b"}], "total": 41}))
    });

    let client = client(&server);
    let page = client.list_users(Some("test-user-1"), 100).await.unwrap();
    assert!(page.contains("test-user-1"));
    assert_eq!(page.total, 41);

    client.list_users(None, 100).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].path(), "/security/projects/minicrm/users");
    assert_eq!(requests[0].query(), Some("limit=100&search=test-user-1"));
    assert_eq!(requests[1].query(), Some("limit=100"));
}

#[tokio::test]
async fn assign_role_puts_form_and_accepts_no_content() {
    let server = FakeServer::start(|req| match req.body.as_str() {
        "role=Viewer" => (204, String::new()),
        _ => (403, "role not permitted".to_string()),
    });

    let client = client(&server);
    client.assign_role("test-user-1", "Viewer").await.unwrap();
    let err = client.assign_role("test-user-1", "Manager").await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let requests = server.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path(), "/security/projects/minicrm/users/test-user-1/roles");
}

#[tokio::test]
async fn user_details_not_found() {
    let server = FakeServer::start(|_| (404, r#"{"error":"no such user"}"#.to_string()));
    let err = client(&server).user_details("ghost").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn roles_and_user_roles_parse_role_names() {
    let server = FakeServer::start(|req| match req.path() {
        "/security/projects/minicrm/roles" => ok(json!({"data": [
            {"role": "Viewer", "default": true},
            {"role": "Manager", "default": false}
        ]})),
        "/security/projects/minicrm/users/alice/roles" => {
            ok(json!({"data": [{"role": "Viewer"}]}))
        }
        _ => (404, String::new()),
    });

    let client = client(&server);
    let roles = client.roles().await.unwrap();
    assert_eq!(roles.len(), 2);
    assert!(roles[0].default);

    let held = client.user_roles("alice").await.unwrap();
    assert_eq!(held[0].role, "Viewer");
    assert!(!held[0].default);
}

#[tokio::test]
async fn anonymous_record_listing_omits_bearer() {
    let server = FakeServer::start(|req| match req.method.as_str() {
        "GET" => ok(json!({"data": []})),
        "POST" => (201, json!({"id": 7, "orgCode": "TEST-01"}).to_string()),
        _ => (405, String::new()),
    });

    let mut client = client(&server);
    client.set_token("tok");

    let records = client.list_records("Company", true).await.unwrap();
    assert!(records.is_empty());

    let created = client
        .create_record("Company", &json!({"orgCode": "TEST-01"}))
        .await
        .unwrap();
    assert_eq!(created["id"], 7);

    let requests = server.requests();
    assert_eq!(requests[0].path(), "/api/projects/minicrm/entities/Company/data");
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn create_record_requires_token() {
    let server = FakeServer::start(|_| (201, String::new()));
    let err = client(&server)
        .create_record("Company", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert!(server.requests().is_empty());
}
