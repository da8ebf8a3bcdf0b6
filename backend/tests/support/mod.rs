#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on drop (including unwind) and serializes
/// access to process-global env vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

#[cfg(feature = "http-server")]
pub mod app {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use monty::api::{NewUser, UserId};
    use monty::auth::{hash_password, TokenSigner};
    use monty::db::repositories::LocalRepository;
    use monty::db::repository::{FullRepository, UserRepository};
    use monty::db::seed_demo_data;
    use monty::http::{create_router, AppState};

    pub const TEST_SECRET: &str = "test-secret";

    pub struct TestApp {
        pub router: Router,
        pub repo: Arc<LocalRepository>,
    }

    pub fn signer() -> TokenSigner {
        TokenSigner::new(TEST_SECRET, Duration::from_secs(3600))
    }

    /// Router over an in-memory repository holding the demo account and a
    /// second, empty account `other`/`other`.
    pub async fn seeded_app() -> TestApp {
        let repo = Arc::new(LocalRepository::new());
        seed_demo_data(repo.as_ref()).await.unwrap();
        repo.create_user(&NewUser {
            username: "other".into(),
            password_hash: hash_password("other"),
            name: "Other Teacher".into(),
            email: "other@monty.app".into(),
            school: None,
            classroom: None,
        })
        .await
        .unwrap();

        let state = AppState::new(repo.clone() as Arc<dyn FullRepository>, signer());
        let router = create_router(state, &["http://localhost:5173".to_string()]);
        TestApp { router, repo }
    }

    impl TestApp {
        pub async fn user_id(&self, username: &str) -> UserId {
            self.repo
                .find_user_by_username(username)
                .await
                .unwrap()
                .unwrap()
                .id
        }

        pub async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            self.send_request(request).await
        }

        pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        pub async fn login(&self, username: &str, password: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/auth/login",
                    None,
                    Some(serde_json::json!({"username": username, "password": password})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "login failed: {}", body);
            body["access_token"].as_str().unwrap().to_string()
        }

        pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
            self.send(Method::GET, uri, Some(token), None).await
        }

        pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::POST, uri, Some(token), Some(body)).await
        }

        pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::PUT, uri, Some(token), Some(body)).await
        }

        pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
            self.send(Method::DELETE, uri, Some(token), None).await
        }
    }
}
