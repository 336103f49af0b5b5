//! Shared utilities for integration tests.

#![allow(dead_code)]

use request_guide::config::ServiceConfig;
use request_guide::http::HttpServer;
use request_guide::lifecycle::Shutdown;
use serde_json::Value;
use tokio::net::TcpListener;

/// A server bound to an ephemeral local port, stopped when dropped.
pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServiceConfig::default()).await
    }

    pub async fn start_with(mut config: ServiceConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        config.listener.bind_address = addr.to_string();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let signalled = shutdown.signalled();
        tokio::spawn(async move {
            let _ = server.run(listener, signalled).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();

        Self {
            base: format!("http://{}", addr),
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        read(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (u16, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        read(res).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (u16, Value) {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        read(res).await
    }

    /// Sends `body` verbatim as the request body.
    pub async fn send_raw(&self, method: reqwest::Method, path: &str, body: &str) -> (u16, Value) {
        let res = self
            .client
            .request(method, self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        read(res).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

async fn read(res: reqwest::Response) -> (u16, Value) {
    let status = res.status().as_u16();
    let text = res.text().await.unwrap();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, body)
}

/// The `detail` entries of a 422 report.
pub fn details(body: &Value) -> &Vec<Value> {
    body["detail"]
        .as_array()
        .unwrap_or_else(|| panic!("not an error report: {}", body))
}

/// `(type, loc)` of every entry, for compact assertions.
pub fn kinds_and_locs(body: &Value) -> Vec<(String, Value)> {
    details(body)
        .iter()
        .map(|d| (d["type"].as_str().unwrap().to_string(), d["loc"].clone()))
        .collect()
}
