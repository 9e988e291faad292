//! Shared test harness: a mock catalog API and a client pointed at it.

#![allow(dead_code)]

use cinetech::catalog::TmdbCatalog;
use cinetech::config::CatalogConfig;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

pub struct TestHarness {
    pub server: MockServer,
    pub catalog: TmdbCatalog,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = CatalogConfig {
            api_key: API_KEY.into(),
            base_url: server.uri(),
            ..CatalogConfig::default()
        };
        let catalog = TmdbCatalog::new(&config).unwrap();
        Self { server, catalog }
    }
}

/// A catalog client pointed at a port nothing listens on.
pub fn unreachable_catalog() -> TmdbCatalog {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = CatalogConfig {
        api_key: API_KEY.into(),
        base_url: format!("http://{addr}"),
        ..CatalogConfig::default()
    };
    TmdbCatalog::new(&config).unwrap()
}
