//! Request body lesson.

use reqwest::Method;
use serde_json::json;

mod common;

use common::{details, kinds_and_locs, TestServer};

#[tokio::test]
async fn test_item_echo_fills_optional_fields() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_json("/request-body/items", &json!({"name": "Foo", "price": 45.2}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"name": "Foo", "description": null, "price": 45.2, "tax": null})
    );
}

#[tokio::test]
async fn test_price_with_tax_only_when_taxed() {
    let server = TestServer::start().await;

    let (_, body) = server
        .post_json(
            "/request-body/items/update",
            &json!({"name": "Foo", "price": 10.0, "tax": 1.5}),
        )
        .await;
    assert_eq!(body["price_with_tax"], json!(11.5));

    let (_, body) = server
        .post_json("/request-body/items/update", &json!({"name": "Foo", "price": 10.0}))
        .await;
    assert!(body.get("price_with_tax").is_none(), "{body}");
}

#[tokio::test]
async fn test_body_path_and_query() {
    let server = TestServer::start().await;

    let (status, body) = server
        .put_json(
            "/request-body/items/5?q=extra",
            &json!({"name": "Foo", "description": "A foo", "price": "3.5"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "item_id": 5,
            "name": "Foo",
            "description": "A foo",
            "price": 3.5,
            "tax": null,
            "q": "extra"
        })
    );
}

#[tokio::test]
async fn test_errors_from_every_source_are_collected() {
    let server = TestServer::start().await;

    let (status, body) = server
        .put_json("/request-body/items/abc", &json!({"price": "cheap", "tax": [1]}))
        .await;
    assert_eq!(status, 422);
    assert_eq!(
        kinds_and_locs(&body),
        vec![
            ("int_parsing".to_string(), json!(["path", "item_id"])),
            ("missing".to_string(), json!(["body", "name"])),
            ("float_parsing".to_string(), json!(["body", "price"])),
            ("float_type".to_string(), json!(["body", "tax"])),
        ]
    );
    assert_eq!(
        details(&body)[1]["input"],
        json!({"price": "cheap", "tax": [1]})
    );
}

#[tokio::test]
async fn test_missing_body() {
    let server = TestServer::start().await;
    let (status, body) = server.send_raw(Method::POST, "/request-body/items", "").await;
    assert_eq!(status, 422);
    assert_eq!(
        body,
        json!({"detail": [{
            "type": "missing",
            "loc": ["body"],
            "msg": "Field required",
            "input": null
        }]})
    );
}

#[tokio::test]
async fn test_malformed_json_is_a_single_error() {
    let server = TestServer::start().await;
    let (status, body) = server
        .send_raw(Method::PUT, "/request-body/items/abc", r#"{"name": "#)
        .await;
    assert_eq!(status, 422);

    let details = details(&body);
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["type"], "json_invalid");
    assert_eq!(details[0]["msg"], "JSON decode error");
    assert_eq!(details[0]["loc"][0], "body");
    assert!(details[0]["loc"][1].is_u64());
}

#[tokio::test]
async fn test_non_object_body() {
    let server = TestServer::start().await;
    let (status, body) = server.send_raw(Method::POST, "/request-body/items", "[1, 2]").await;
    assert_eq!(status, 422);
    assert_eq!(
        kinds_and_locs(&body),
        vec![("model_attributes_type".to_string(), json!(["body"]))]
    );
}

#[tokio::test]
async fn test_boolean_price_is_lax_number() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_json("/request-body/items", &json!({"name": "Foo", "price": true}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["price"], json!(1.0));
}

#[tokio::test]
async fn test_whitespace_body_is_malformed() {
    let server = TestServer::start().await;
    let (status, body) = server.send_raw(Method::POST, "/request-body/items", "   ").await;
    assert_eq!(status, 422);
    assert_eq!(
        kinds_and_locs(&body),
        vec![("json_invalid".to_string(), json!(["body", 3]))]
    );
}

#[tokio::test]
async fn test_truncated_json_points_at_end_of_body() {
    let server = TestServer::start().await;
    let (status, body) = server
        .send_raw(Method::POST, "/request-body/items", r#"{"name": "Foo""#)
        .await;
    assert_eq!(status, 422);
    assert_eq!(details(&body)[0]["loc"], json!(["body", 14]));
}

#[tokio::test]
async fn test_non_json_content_type_is_not_parsed() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/request-body/items"))
        .header("content-type", "text/plain")
        .body(r#"{"name": "Foo", "price": 1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        kinds_and_locs(&body),
        vec![("model_attributes_type".to_string(), json!(["body"]))]
    );
    assert_eq!(details(&body)[0]["input"], r#"{"name": "Foo", "price": 1}"#);

    let res = server
        .client
        .post(server.url("/request-body/items"))
        .header("content-type", "application/merge-patch+json")
        .body(r#"{"name": "Foo", "price": 1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}
