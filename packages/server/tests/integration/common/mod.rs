use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{multipart, Client};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tempfile::TempDir;

use tattr_common::blobs::FsBlobStore;
use tattr_server::config::{
    AppConfig, DatabaseConfig, GuestbookConfig, ServerConfig, SessionConfig, StorageConfig,
};
use tattr_server::database::setup_schema;
use tattr_server::state::AppState;

pub mod routes {
    pub const INSTANCE: &str = "/api/instance";
    pub const BOOTSTRAP: &str = "/api/instance/bootstrap";
    pub const RESET: &str = "/api/instance/reset";
    pub const LOGIN: &str = "/api/auth/login";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const ME: &str = "/api/auth/me";
    pub const GUESTBOOK: &str = "/api/guestbook";
    pub const ASSETS: &str = "/api/assets";

    pub fn asset_download(id: i32) -> String {
        format!("/api/assets/{id}/download")
    }
}

/// A running test server with its own database, blob dir, and cookie jar.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    _blob_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            text,
            body,
        }
    }

    pub fn location(&self) -> &str {
        self.headers
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_max_age(3600).await
    }

    pub async fn spawn_with_max_age(max_age_secs: u64) -> Self {
        // Single connection: every pooled connection to `sqlite::memory:`
        // would otherwise get its own empty database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        setup_schema(&db).await.expect("Failed to create schema");

        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");
        let blobs = FsBlobStore::new(blob_dir.path().join("blobs"), 1024 * 1024)
            .await
            .expect("Failed to create blob store");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            session: SessionConfig {
                secret: "an-integration-test-signing-secret-that-is-at-least-64-bytes-long!!"
                    .to_string(),
                max_age_secs,
                secure: false,
                cleanup_interval_secs: 3600,
            },
            storage: StorageConfig {
                root: blob_dir.path().join("blobs").display().to_string(),
                max_blob_size: 1024 * 1024,
            },
            guestbook: GuestbookConfig {
                honeypot_field: "name__confirm".to_string(),
            },
        };

        let state = AppState {
            db: db.clone(),
            blobs: Arc::new(blobs),
            config,
        };
        let app = tattr_server::build_router(state).expect("Failed to build router");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            _blob_dir: blob_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn get_bytes(&self, path: &str) -> (u16, HeaderMap, Vec<u8>) {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res.bytes().await.expect("Failed to read body").to_vec();
        (status, headers, bytes)
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_upload(
        &self,
        name: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> TestResponse {
        let form = multipart::Form::new().text("name", name.to_string()).part(
            "contents",
            multipart::Part::bytes(contents).file_name(file_name.to_string()),
        );
        let res = self
            .client
            .post(self.url(routes::ASSETS))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send upload");
        TestResponse::from_response(res).await
    }

    /// Bootstrap the instance and return the generated password.
    pub async fn bootstrap(&self, email: &str, username: &str) -> String {
        let res = self
            .post_form(routes::BOOTSTRAP, &[("email", email), ("username", username)])
            .await;
        assert_eq!(res.status, 201, "Bootstrap failed: {}", res.text);
        res.body["password"]
            .as_str()
            .expect("bootstrap response should contain a password")
            .to_string()
    }

    /// Bootstrap and log in as the instance owner.
    pub async fn login_as_owner(&self) -> String {
        let password = self.bootstrap("owner@example.com", "owner").await;
        let res = self
            .post_form(
                routes::LOGIN,
                &[("username", "owner"), ("password", &password)],
            )
            .await;
        assert_eq!(res.status, 303, "Login failed: {}", res.text);
        password
    }
}
