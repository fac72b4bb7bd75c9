//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::PathBuf;

use contact_list_api::config::ServiceConfig;
use contact_list_api::http::HttpServer;
use contact_list_api::lifecycle::Shutdown;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server backed by a contacts file in a private temp directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub data_path: PathBuf,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a contact and return the response.
    #[allow(dead_code)]
    pub async fn create(&self, name: &str, email: &str, phone: &str) -> reqwest::Response {
        self.client
            .post(self.url("/contacts"))
            .json(&json!({ "name": name, "email": email, "phone": phone }))
            .send()
            .await
            .expect("server unreachable")
    }

    /// GET a path and decode the JSON body.
    #[allow(dead_code)]
    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start a server with default settings on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    start_server_with(|_| {}).await
}

/// Start a server after letting the caller adjust the config.
pub async fn start_server_with<F>(configure: F) -> TestServer
where
    F: FnOnce(&mut ServiceConfig),
{
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("contacts.json");

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.storage.path = data_path.clone();
    configure(&mut config);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        data_path,
        client,
        shutdown,
        _dir: dir,
    }
}
