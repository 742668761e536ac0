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
use robotops_core::{Mission, Robot, RobotId};
use robotops_protocol::{ListQuery, RobotCreate, RobotUpdate};
use tracing::info;

const ENTITY: &str = "Robot";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/robots", get(list_robots).post(create_robot))
        .route("/robots/", get(list_robots).post(create_robot))
        .route("/robots/{robot_id}", get(read_robot).put(update_robot))
        .route("/robots/{robot_id}/missions", get(list_robot_missions))
}

async fn list_robots(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Robot>>, ApiError> {
    let Query(query) = query?;
    let robots = state.db.run(move |conn| robots::list(conn, query.into())).await?;
    Ok(Json(robots))
}

async fn read_robot(
    State(state): State<AppState>,
    robot_id: Result<Path<RobotId>, PathRejection>,
) -> Result<Json<Robot>, ApiError> {
    let Path(robot_id) = robot_id?;
    let robot = state
        .db
        .run(move |conn| robots::get_by_id(conn, robot_id))
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY))?;
    Ok(Json(robot))
}

async fn create_robot(
    State(state): State<AppState>,
    payload: Result<Json<RobotCreate>, JsonRejection>,
) -> Result<Json<Robot>, ApiError> {
    let Json(payload) = payload?;
    let robot = state.db.run(move |conn| robots::create(conn, payload)).await?;
    info!(robot_id = %robot.id, name = %robot.name, "created robot");
    Ok(Json(robot))
}

async fn update_robot(
    State(state): State<AppState>,
    robot_id: Result<Path<RobotId>, PathRejection>,
    payload: Result<Json<RobotUpdate>, JsonRejection>,
) -> Result<Json<Robot>, ApiError> {
    let Path(robot_id) = robot_id?;
    let Json(payload) = payload?;
    let robot = state
        .db
        .run(move |conn| robots::update(conn, robot_id, payload))
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY))?;
    info!(robot_id = %robot.id, "updated robot");
    Ok(Json(robot))
}

async fn list_robot_missions(
    State(state): State<AppState>,
    robot_id: Result<Path<RobotId>, PathRejection>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Mission>>, ApiError> {
    let Path(robot_id) = robot_id?;
    let Query(query) = query?;
    let missions = state
        .db
        .run(move |conn| {
            if robots::get_by_id(conn, robot_id)?.is_none() {
                return Ok(None);
            }
            missions::list_for_robot(conn, robot_id, query.into()).map(Some)
        })
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY))?;
    Ok(Json(missions))
}
