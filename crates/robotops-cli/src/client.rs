use anyhow::{Result, anyhow};
use reqwest::{Client, Response, StatusCode};
use robotops_core::{Mission, MissionId, Robot, RobotId};
use robotops_protocol::{
    ErrorDetail, Health, ListQuery, MissionCreate, MissionUpdate, RobotCreate, RobotUpdate,
};
use serde::de::DeserializeOwned;

/// Thin typed wrapper over the `/api/v1` surface.
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self { http: Client::new(), base: base.trim_end_matches('/').to_string() }
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base)
    }

    pub async fn health(&self) -> Result<Health> {
        decode(self.http.get(format!("{}/healthz", self.base)).send().await?).await
    }

    pub async fn list_robots(&self, query: ListQuery) -> Result<Vec<Robot>> {
        decode(self.http.get(self.api("/robots")).query(&query).send().await?).await
    }

    pub async fn get_robot(&self, id: RobotId) -> Result<Robot> {
        decode(self.http.get(self.api(&format!("/robots/{id}"))).send().await?).await
    }

    pub async fn create_robot(&self, payload: &RobotCreate) -> Result<Robot> {
        decode(self.http.post(self.api("/robots")).json(payload).send().await?).await
    }

    pub async fn update_robot(&self, id: RobotId, payload: &RobotUpdate) -> Result<Robot> {
        decode(self.http.put(self.api(&format!("/robots/{id}"))).json(payload).send().await?).await
    }

    pub async fn list_robot_missions(&self, id: RobotId, query: ListQuery) -> Result<Vec<Mission>> {
        decode(
            self.http.get(self.api(&format!("/robots/{id}/missions"))).query(&query).send().await?,
        )
        .await
    }

    pub async fn list_missions(&self, query: ListQuery) -> Result<Vec<Mission>> {
        decode(self.http.get(self.api("/missions")).query(&query).send().await?).await
    }

    pub async fn get_mission(&self, id: MissionId) -> Result<Mission> {
        decode(self.http.get(self.api(&format!("/missions/{id}"))).send().await?).await
    }

    pub async fn create_mission(&self, payload: &MissionCreate) -> Result<Mission> {
        decode(self.http.post(self.api("/missions")).json(payload).send().await?).await
    }

    pub async fn update_mission(&self, id: MissionId, payload: &MissionUpdate) -> Result<Mission> {
        decode(self.http.put(self.api(&format!("/missions/{id}"))).json(payload).send().await?)
            .await
    }

    pub async fn get_mission_robot(&self, id: MissionId) -> Result<Robot> {
        decode(self.http.get(self.api(&format!("/missions/{id}/robot"))).send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(failure(status, body))
}

/// Prefers the service's `detail` message, falling back to the raw body.
fn failure(status: StatusCode, body: String) -> anyhow::Error {
    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .map(|err| err.detail)
        .unwrap_or(body);
    anyhow!("request failed with {status}: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("http://127.0.0.1:8800/");
        assert_eq!(client.api("/robots/1"), "http://127.0.0.1:8800/api/v1/robots/1");
    }

    #[test]
    fn failure_reports_the_detail_message() {
        let err = failure(StatusCode::NOT_FOUND, r#"{"detail":"Robot not found"}"#.to_string());
        assert_eq!(err.to_string(), "request failed with 404 Not Found: Robot not found");
    }

    #[test]
    fn failure_falls_back_to_the_raw_body() {
        let err = failure(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "request failed with 502 Bad Gateway: upstream down");
    }
}
