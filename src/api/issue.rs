use std::collections::HashMap;

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use crate::api::body::parse_body;
use crate::model::global_error::{AppError, Operation};
use crate::model::issue::{CreateIssueRequest, DeleteIssueRequest, IssueResponse, MutationResponse, UpdateIssueRequest};
use crate::service::IssueService;

#[utoipa::path(
    get,
    path = "/api/issues/{project}",
    summary = "이슈 목록 조회",
    params(
        ("project" = String, Path, description = "프로젝트 이름"),
        ("open" = Option<bool>, Query, description = "\"true\" 이외의 값은 모두 false"),
        ("created_on" = Option<String>, Query, description = "생성 시각 (ISO8601)"),
        ("updated_on" = Option<String>, Query, description = "수정 시각 (ISO8601)"),
    ),
    responses(
        (status = 200, description = "이슈 목록 조회 성공", body = Vec<IssueResponse>),
        (status = 400, description = "잘못된 필터"),
    ),
    tag = "issues",
)]
#[get("/issues/{project}")]
pub async fn list_issues(
    service: web::Data<IssueService>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();

    let issues = service
        .list(&project, query.into_inner())
        .await
        .map_err(|err| AppError::from_issue_error(err, Operation::List))?;

    let response: Vec<IssueResponse> = issues
        .into_iter()
        .map(IssueResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/issues/{project}",
    summary = "이슈 생성",
    params(("project" = String, Path, description = "프로젝트 이름")),
    request_body = CreateIssueRequest,
    responses(
        (status = 200, description = "이슈 생성 성공", body = IssueResponse),
        (status = 400, description = "필수 필드 누락 또는 잘못된 본문"),
    ),
    tag = "issues",
)]
#[post("/issues/{project}")]
pub async fn create_issue(
    service: web::Data<IssueService>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let project = path.into_inner();
    let request: CreateIssueRequest = parse_body(&req, &body)?;

    let issue = service
        .create(&project, request)
        .await
        .map_err(|err| AppError::from_issue_error(err, Operation::Create))?;

    Ok(HttpResponse::Ok().json(IssueResponse::from(issue)))
}

#[utoipa::path(
    put,
    path = "/api/issues/{project}",
    summary = "이슈 수정",
    params(("project" = String, Path, description = "프로젝트 이름")),
    request_body = UpdateIssueRequest,
    responses(
        (status = 200, description = "이슈 수정 성공", body = MutationResponse),
        (status = 400, description = "_id 누락, 수정할 필드 없음, 잘못된 _id 또는 본문"),
        (status = 404, description = "이슈 없음"),
    ),
    tag = "issues",
)]
#[put("/issues/{project}")]
pub async fn update_issue(
    service: web::Data<IssueService>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request: UpdateIssueRequest = parse_body(&req, &body)?;
    let echoed_id = request.id.as_deref().unwrap_or_default().trim().to_string();

    service
        .update(request)
        .await
        .map_err(|err| AppError::from_issue_error(err, Operation::Update))?;

    Ok(HttpResponse::Ok().json(MutationResponse::updated(echoed_id)))
}

#[utoipa::path(
    delete,
    path = "/api/issues/{project}",
    summary = "이슈 삭제",
    params(("project" = String, Path, description = "프로젝트 이름")),
    request_body = DeleteIssueRequest,
    responses(
        (status = 200, description = "이슈 삭제 성공", body = MutationResponse),
        (status = 400, description = "_id 누락, 잘못된 _id 또는 본문"),
        (status = 404, description = "이슈 없음"),
    ),
    tag = "issues",
)]
#[delete("/issues/{project}")]
pub async fn delete_issue(
    service: web::Data<IssueService>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request: DeleteIssueRequest = parse_body(&req, &body)?;

    let id = service
        .delete(request)
        .await
        .map_err(|err| AppError::from_issue_error(err, Operation::Delete))?;

    Ok(HttpResponse::Ok().json(MutationResponse::deleted(id)))
}
