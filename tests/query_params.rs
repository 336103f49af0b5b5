//! Query parameter lesson.

use serde_json::json;

mod common;

use common::{kinds_and_locs, TestServer};

const LONG: &str = "This is an amazing item that has a long description";
const TRIBUTE: &str = "This is not the greatest description, this is a tribute";

#[tokio::test]
async fn test_paging_defaults_and_slices() {
    let server = TestServer::start().await;

    let (_, body) = server.get("/query-params/items").await;
    assert_eq!(
        body,
        json!({
            "Query_Params": "Skip: 0, Limit: 10",
            "Content": [{"item_name": "Foo"}, {"item_name": "Bar"}, {"item_name": "Baz"}]
        })
    );

    let (_, body) = server.get("/query-params/items?skip=1&limit=1").await;
    assert_eq!(body["Content"], json!([{"item_name": "Bar"}]));

    let (_, body) = server.get("/query-params/items?skip=-1").await;
    assert_eq!(body["Query_Params"], "Skip: -1, Limit: 10");
    assert_eq!(body["Content"], json!([{"item_name": "Baz"}]));

    let (status, body) = server.get("/query-params/items?skip=a&limit=b").await;
    assert_eq!(status, 422);
    assert_eq!(
        kinds_and_locs(&body),
        vec![
            ("int_parsing".to_string(), json!(["query", "skip"])),
            ("int_parsing".to_string(), json!(["query", "limit"])),
        ]
    );
}

#[tokio::test]
async fn test_optional_q() {
    let server = TestServer::start().await;

    let (_, body) = server.get("/query-params/items/foo").await;
    assert_eq!(body, json!({"item_id": "foo"}));

    let (_, body) = server.get("/query-params/items/foo?q=").await;
    assert_eq!(body, json!({"item_id": "foo"}));

    let (_, body) = server.get("/query-params/items/foo?q=bar").await;
    assert_eq!(body, json!({"item_id": "foo", "q": "bar"}));
}

#[tokio::test]
async fn test_bool_conversion() {
    let server = TestServer::start().await;

    let (_, body) = server.get("/query-params/items/typeconv/foo").await;
    assert_eq!(body, json!({"item_id": "foo", "description": LONG}));

    for short in ["1", "True", "on", "yes", "y"] {
        let (_, body) = server
            .get(&format!("/query-params/items/typeconv/foo?short={short}"))
            .await;
        assert_eq!(body, json!({"item_id": "foo"}), "short={short}");
    }

    let (status, body) = server.get("/query-params/items/typeconv/foo?short=maybe").await;
    assert_eq!(status, 422);
    assert_eq!(body["detail"][0]["type"], "bool_parsing");
    assert_eq!(body["detail"][0]["input"], "maybe");
}

#[tokio::test]
async fn test_user_items() {
    let server = TestServer::start().await;

    let (_, body) = server
        .get("/query-params/users/7/items/abc?q=hi&short=off")
        .await;
    assert_eq!(
        body,
        json!({"item_id": "abc", "user_id": 7, "q": "hi", "description": TRIBUTE})
    );

    let (status, body) = server.get("/query-params/users/me/items/abc?short=x").await;
    assert_eq!(status, 422);
    assert_eq!(
        kinds_and_locs(&body),
        vec![
            ("int_parsing".to_string(), json!(["path", "user_id"])),
            ("bool_parsing".to_string(), json!(["query", "short"])),
        ]
    );
}

#[tokio::test]
async fn test_required_needy() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/query-params/items/foo/needy").await;
    assert_eq!(status, 422);
    assert_eq!(
        body,
        json!({"detail": [{
            "type": "missing",
            "loc": ["query", "needy"],
            "msg": "Field required",
            "input": null
        }]})
    );

    let (_, body) = server.get("/query-params/items/foo/needy?needy=sooo").await;
    assert_eq!(body, json!({"item_id": "foo", "needy": "sooo"}));
}
