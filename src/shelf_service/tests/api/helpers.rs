use fake::{Fake, faker::internet::en::SafeEmail};
use reqwest::{Client, Response};
use secrecy::Secret;
use serde_json::{Value, json};
use shelf_adapters::{
    Argon2Hasher, HashMapBookStore, HashMapUserStore, JwtAuthConfig, JwtScheme, config::test,
};
use shelf_axum::AppState;
use shelf_core::{Role, UserChanges, UserId, UserStore};
use shelf_service::ShelfService;
use tokio::net::TcpListener;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "longpassword1";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub user_store: HashMapUserStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_token_ttl(600).await
    }

    /// Spawns the service on a random local port with in-memory stores.
    pub async fn with_token_ttl(token_ttl_in_seconds: i64) -> Self {
        let user_store = HashMapUserStore::new();
        let book_store = HashMapBookStore::new(user_store.clone());
        let scheme = JwtScheme::new(
            user_store.clone(),
            Argon2Hasher::new(),
            JwtAuthConfig {
                jwt_secret: Secret::new(TEST_SECRET.to_owned()),
                token_ttl_in_seconds,
            },
        );

        let service = ShelfService::new(AppState::new(scheme, book_store));

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: Client::new(),
            user_store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub async fn get_health(&self) -> Response {
        self.http_client
            .get(format!("{}/health", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, body: &Value) -> Response {
        self.http_client
            .post(self.url("/auth/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> Response {
        self.http_client
            .post(self.url("/auth/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let request = self.http_client.get(self.url(path));
        with_bearer(request, token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> Response {
        self.http_client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Response {
        self.http_client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response {
        self.http_client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a fresh account and returns its id and token.
    pub async fn signed_up_user(&self) -> TestUser {
        let email: String = SafeEmail().fake();
        let response = self
            .post_register(&json!({
                "email": email,
                "username": "Reader",
                "password": PASSWORD,
            }))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        TestUser {
            id: body["data"]["user"]["id"].as_i64().unwrap(),
            email,
            token: body["data"]["token"].as_str().unwrap().to_owned(),
        }
    }

    /// Registers an account and promotes it to `ADMIN` directly in the store.
    pub async fn signed_up_admin(&self) -> TestUser {
        let user = self.signed_up_user().await;
        self.user_store
            .update_fields(
                UserId::new(user.id).unwrap(),
                UserChanges {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        user
    }
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

fn with_bearer(request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
