use httpmock::prelude::*;
use httpmock::Method::PATCH;
use readeck_launcher::plugins::readeck::client::{ReadeckClient, PAGE_LIMIT};
use readeck_launcher::plugins::readeck::config::ReadeckSettings;
use readeck_launcher::plugins::readeck::error::ReadeckError;
use serde_json::json;

fn client_for(base: &str) -> ReadeckClient {
    ReadeckClient::new(&ReadeckSettings {
        instance_url: base.into(),
        api_key: "secret".into(),
        cache_length: 15,
    })
    .unwrap()
}

fn page(ids: std::ops::Range<usize>) -> serde_json::Value {
    let items: Vec<_> = ids
        .map(|i| {
            json!({
                "id": format!("b{i}"),
                "title": format!("Bookmark {i}"),
                "url": format!("https://example.com/{i}"),
                "href": format!("https://rd.local/api/bookmarks/b{i}"),
                "labels": ["misc"],
                "is_archived": false,
                "is_marked": false
            })
        })
        .collect();
    json!(items)
}

#[test]
fn list_sends_bearer_token_and_follows_pagination() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/api/bookmarks")
            .query_param("limit", PAGE_LIMIT.to_string())
            .query_param("offset", "0")
            .header("authorization", "Bearer secret");
        then.status(200)
            .header("Total-Count", "150")
            .json_body(page(0..100));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/api/bookmarks")
            .query_param("offset", "100")
            .header("authorization", "Bearer secret");
        then.status(200)
            .header("Total-Count", "150")
            .json_body(page(100..150));
    });

    let list = client_for(&server.base_url()).list_bookmarks().unwrap();
    first.assert();
    second.assert();
    assert_eq!(list.len(), 150);
    assert_eq!(list[0].id, "b0");
    assert_eq!(list[149].id, "b149");
}

#[test]
fn list_without_total_count_reads_one_page() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/api/bookmarks");
        then.status(200).json_body(page(0..3));
    });
    let list = client_for(&server.base_url()).list_bookmarks().unwrap();
    assert_eq!(m.hits(), 1);
    assert_eq!(list.len(), 3);
}

#[test]
fn failing_second_page_fails_whole_listing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/bookmarks").query_param("offset", "0");
        then.status(200)
            .header("Total-Count", "150")
            .json_body(page(0..100));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/bookmarks").query_param("offset", "100");
        then.status(502);
    });
    let err = client_for(&server.base_url()).list_bookmarks().unwrap_err();
    assert!(matches!(err, ReadeckError::Api(_)));
}

#[test]
fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/bookmarks");
        then.status(401);
    });
    let err = client_for(&server.base_url()).list_bookmarks().unwrap_err();
    assert!(matches!(err, ReadeckError::Auth(_)));
}

#[test]
fn garbage_body_maps_to_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/bookmarks");
        then.status(200).body("<html>login</html>");
    });
    let err = client_for(&server.base_url()).list_bookmarks().unwrap_err();
    assert!(matches!(err, ReadeckError::Api(_)));
}

#[test]
fn unreachable_instance_maps_to_network_error() {
    let err = client_for("http://127.0.0.1:1").list_bookmarks().unwrap_err();
    assert!(matches!(err, ReadeckError::Network(_)));
}

#[test]
fn archive_patches_is_archived() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/bookmarks/b1")
            .header("authorization", "Bearer secret")
            .json_body(json!({ "is_archived": true }));
        then.status(200).json_body(json!({ "updated": "now" }));
    });
    client_for(&server.base_url()).archive("b1").unwrap();
    m.assert();
}

#[test]
fn delete_sends_delete() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(DELETE).path("/api/bookmarks/b1");
        then.status(204);
    });
    client_for(&server.base_url()).delete("b1").unwrap();
    m.assert();
}

#[test]
fn stale_id_maps_to_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/bookmarks/gone");
        then.status(404);
    });
    let err = client_for(&server.base_url()).delete("gone").unwrap_err();
    assert!(matches!(err, ReadeckError::NotFound(id) if id == "gone"));
}
