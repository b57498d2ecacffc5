#![allow(dead_code)]

use mongodb::bson::oid::ObjectId;
use payment_settings_service::config::{Config, MongoConfig, StoreBackend, StoreConfig};
use payment_settings_service::services::InMemorySettingsStore;
use payment_settings_service::startup::Application;
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_USER_ID: &str = "test-user";
pub const OTHER_USER_ID: &str = "other-user";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: InMemorySettingsStore,
    pub client: reqwest::Client,
}

pub fn test_config() -> Config {
    Config {
        common: CoreConfig {
            port: 0, // Random port
            ..CoreConfig::default()
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            mongodb: MongoConfig {
                uri: Secret::new(
                    std::env::var("TEST_MONGODB_URI")
                        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                ),
                database: format!("payment_settings_test_{}", uuid::Uuid::new_v4()),
            },
        },
        service_name: "payment-settings-service-test".to_string(),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = InMemorySettingsStore::new();
        let app = Application::build_with_store(test_config(), Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
        }
    }

    pub fn branch_url(&self, branch_id: &str, resource: &str) -> String {
        format!("{}/branches/{}/{}", self.address, branch_id, resource)
    }

    pub async fn put_json(
        &self,
        branch_id: &str,
        resource: &str,
        user_id: Option<&str>,
        body: Value,
    ) -> (reqwest::StatusCode, Value) {
        let mut request = self.client.put(self.branch_url(branch_id, resource)).json(&body);
        if let Some(user_id) = user_id {
            request = request.header("X-User-ID", user_id);
        }
        let response = request.send().await.expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }

    pub async fn get_json(&self, branch_id: &str, resource: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .get(self.branch_url(branch_id, resource))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }
}

pub fn new_branch_id() -> String {
    ObjectId::new().to_hex()
}
