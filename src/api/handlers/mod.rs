use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::extract::ApiJson;
use crate::error::HrError;
use crate::models::*;
use crate::service::HrService;

type ApiResult<T> = Result<T, HrError>;

/// Offset/limit query parameters for plain listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListQuery> for Window {
    fn from(query: ListQuery) -> Self {
        Window {
            offset: query.offset.unwrap_or(0),
            limit: query.limit,
        }
    }
}

/// Zero-based page parameters. `size` defaults to [`PageRequest::DEFAULT_SIZE`].
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest {
            page: query.page.unwrap_or(0),
            size: query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Assignments
// ============================================================

pub async fn assign_employee(
    State(hr): State<HrService>,
    Path((project_id, employee_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Assignment>> {
    hr.assign(project_id, employee_id).map(Json)
}

pub async fn unassign_employee(
    State(hr): State<HrService>,
    Path((project_id, employee_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    hr.unassign(project_id, employee_id)?;
    Ok(StatusCode::OK)
}

pub async fn list_active_project_assignments(
    State(hr): State<HrService>,
) -> ApiResult<Json<Vec<Assignment>>> {
    hr.list_active_project_assignments().map(Json)
}

pub async fn list_project_assignments(
    State(hr): State<HrService>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<Assignment>>> {
    hr.list_assignments_by_project(project_id).map(Json)
}

pub async fn list_employee_assignments(
    State(hr): State<HrService>,
    Path(employee_id): Path<i64>,
) -> ApiResult<Json<Vec<Assignment>>> {
    hr.list_assignments_by_employee(employee_id).map(Json)
}

// ============================================================
// Employees
// ============================================================

pub async fn list_active_employees(
    State(hr): State<HrService>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Employee>>> {
    hr.list_active_employees(query.into()).map(Json)
}

pub async fn page_active_employees(
    State(hr): State<HrService>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Employee>>> {
    hr.page_active_employees(query.into()).map(Json)
}

pub async fn list_basic_employees(
    State(hr): State<HrService>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<EmployeeBasic>>> {
    hr.list_basic_employees(query.into()).map(Json)
}

pub async fn get_employee(
    State(hr): State<HrService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Employee>> {
    hr.get_employee(id).map(Json)
}

pub async fn add_employee(
    State(hr): State<HrService>,
    ApiJson(input): ApiJson<CreateEmployeeInput>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    hr.add_employee(&input)
        .map(|e| (StatusCode::CREATED, Json(e)))
}

pub async fn add_employees(
    State(hr): State<HrService>,
    ApiJson(inputs): ApiJson<Vec<CreateEmployeeInput>>,
) -> ApiResult<(StatusCode, Json<Vec<Employee>>)> {
    hr.add_employees(&inputs)
        .map(|e| (StatusCode::CREATED, Json(e)))
}

pub async fn terminate_employee(
    State(hr): State<HrService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Employee>> {
    hr.terminate_employee(id).map(Json)
}

// ============================================================
// Projects
// ============================================================

pub async fn list_active_projects(
    State(hr): State<HrService>,
) -> ApiResult<Json<Vec<Project>>> {
    hr.list_active_projects().map(Json)
}

pub async fn get_project(
    State(hr): State<HrService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    hr.get_project(id).map(Json)
}

pub async fn add_project(
    State(hr): State<HrService>,
    ApiJson(input): ApiJson<CreateProjectInput>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    hr.add_project(&input)
        .map(|p| (StatusCode::CREATED, Json(p)))
}

pub async fn terminate_project(
    State(hr): State<HrService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    hr.terminate_project(id).map(Json)
}
