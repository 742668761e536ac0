#![allow(dead_code)]

use robotops_api::{API_PREFIX, AppState, Database, build_router};
use serde_json::{Value, json};
use tempfile::TempDir;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// A live server on an ephemeral port backed by a throwaway database file.
pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    _dir: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::open(&dir.path().join("robotops.db"), 4).expect("open database");
        let app = build_router(AppState::new(db), &[ALLOWED_ORIGIN.to_string()])
            .expect("build router");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("listener addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self { base: format!("http://{addr}"), client: reqwest::Client::new(), _dir: dir }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn api(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self.client.get(self.api(path)).send().await.expect("send GET");
        decode(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self.client.post(self.api(path)).json(body).send().await.expect("send POST");
        decode(response).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self.client.put(self.api(path)).json(body).send().await.expect("send PUT");
        decode(response).await
    }

    pub async fn create_robot(&self, name: &str, model_name: &str) -> Value {
        let (status, body) =
            self.post("/robots", &json!({ "name": name, "model_name": model_name })).await;
        assert_eq!(status, 200, "create robot: {body}");
        body
    }

    pub async fn create_mission(&self, name: &str, description: &str, robot_id: i64) -> Value {
        let (status, body) = self
            .post(
                "/missions",
                &json!({ "name": name, "description": description, "robot_id": robot_id }),
            )
            .await;
        assert_eq!(status, 200, "create mission: {body}");
        body
    }
}

async fn decode(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("numeric id")
}
