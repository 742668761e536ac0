use robotops_core::{DEFAULT_PAGE_LIMIT, Mission, MissionId, Page, Robot, RobotId};
use serde::{Deserialize, Serialize};

/// Every client-writable robot field. Creation and update share the same
/// shape because updates replace all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotFields {
    pub name: String,
    pub model_name: String,
}

pub type RobotCreate = RobotFields;
pub type RobotUpdate = RobotFields;

impl RobotFields {
    #[must_use]
    pub fn into_robot(self, id: RobotId) -> Robot {
        Robot { id, name: self.name, model_name: self.model_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionFields {
    pub name: String,
    pub description: String,
    pub robot_id: RobotId,
}

pub type MissionCreate = MissionFields;
pub type MissionUpdate = MissionFields;

impl MissionFields {
    #[must_use]
    pub fn into_mission(self, id: MissionId) -> Mission {
        Mission { id, name: self.name, description: self.description, robot_id: self.robot_id }
    }
}

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { skip: 0, limit: DEFAULT_PAGE_LIMIT }
    }
}

impl From<ListQuery> for Page {
    fn from(query: ListQuery) -> Self {
        Page::new(query.skip, query.limit)
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

pub const ROOT_MESSAGE: &str = "API is up and running";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}
