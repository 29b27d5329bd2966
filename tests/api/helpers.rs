use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::Result;
use secrecy::SecretString;
use tokio::net::TcpListener;
use waitomat::{App, AppState, WaitlistStore};
use wiremock::MockServer;

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    /// Stands in for the hosted waitlist table.
    pub store_server: MockServer,
    pub http_client: reqwest::Client,
}

impl TestApp {
    /// Spawns the app on a random port, talking to a wiremock store.
    pub async fn spawn() -> Result<Self> {
        let store_server = MockServer::start().await;
        let store = WaitlistStore::new(
            store_server.uri(),
            SecretString::from("test-api-key"),
            Duration::from_millis(200),
        )?;
        let app_state = AppState::new(store, vec!["http://localhost:3000".to_string()]);

        let listener = TcpListener::bind(&TEST_SOCK_ADDR).await?;
        let addr = SocketAddr::from((TEST_SOCK_ADDR.ip(), listener.local_addr()?.port()));

        tokio::spawn(waitomat::serve(App::new(app_state, listener)));

        let res = TestApp {
            addr,
            store_server,
            http_client: reqwest::Client::new(),
        };
        Ok(res)
    }

    pub async fn post_waitlist(&self, body: &serde_json::Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/waitlist", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }
}
