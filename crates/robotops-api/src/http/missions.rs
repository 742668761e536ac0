use super::error::ApiError;
use crate::{
    AppState,
    store::{missions, robots},
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::get,
};
use robotops_core::{Mission, MissionId, Robot};
use robotops_protocol::{ListQuery, MissionCreate, MissionUpdate};
use tracing::info;

const ENTITY: &str = "Mission";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/missions", get(list_missions).post(create_mission))
        .route("/missions/", get(list_missions).post(create_mission))
        .route("/missions/{mission_id}", get(read_mission).put(update_mission))
        .route("/missions/{mission_id}/robot", get(read_mission_robot))
}

async fn list_missions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Mission>>, ApiError> {
    let Query(query) = query?;
    let missions = state.db.run(move |conn| missions::list(conn, query.into())).await?;
    Ok(Json(missions))
}

async fn read_mission(
    State(state): State<AppState>,
    mission_id: Result<Path<MissionId>, PathRejection>,
) -> Result<Json<Mission>, ApiError> {
    let Path(mission_id) = mission_id?;
    let mission = state
        .db
        .run(move |conn| missions::get_by_id(conn, mission_id))
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY))?;
    Ok(Json(mission))
}

async fn create_mission(
    State(state): State<AppState>,
    payload: Result<Json<MissionCreate>, JsonRejection>,
) -> Result<Json<Mission>, ApiError> {
    let Json(payload) = payload?;
    let mission = state.db.run(move |conn| missions::create(conn, payload)).await?;
    info!(mission_id = %mission.id, robot_id = %mission.robot_id, "created mission");
    Ok(Json(mission))
}

async fn update_mission(
    State(state): State<AppState>,
    mission_id: Result<Path<MissionId>, PathRejection>,
    payload: Result<Json<MissionUpdate>, JsonRejection>,
) -> Result<Json<Mission>, ApiError> {
    let Path(mission_id) = mission_id?;
    let Json(payload) = payload?;
    let mission = state
        .db
        .run(move |conn| missions::update(conn, mission_id, payload))
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY))?;
    info!(mission_id = %mission.id, robot_id = %mission.robot_id, "updated mission");
    Ok(Json(mission))
}

async fn read_mission_robot(
    State(state): State<AppState>,
    mission_id: Result<Path<MissionId>, PathRejection>,
) -> Result<Json<Robot>, ApiError> {
    let Path(mission_id) = mission_id?;
    let lookup = state
        .db
        .run(move |conn| {
            let Some(mission) = missions::get_by_id(conn, mission_id)? else {
                return Ok(None);
            };
            robots::get_by_id(conn, mission.robot_id).map(Some)
        })
        .await?;

    match lookup {
        None => Err(ApiError::not_found(ENTITY)),
        Some(None) => Err(ApiError::not_found("Robot")),
        Some(Some(robot)) => Ok(Json(robot)),
    }
}
