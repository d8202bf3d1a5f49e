use utoipa::OpenApi;

use crate::model::issue::{CreateIssueRequest, DeleteIssueRequest, IssueResponse, MutationResponse, UpdateIssueRequest};

#[derive(OpenApi)]
#[openapi(
    info(title = "Issue Tracker API", description = "프로젝트별 이슈 트래커"),
    paths(
        crate::api::health::health_check,
        crate::api::issue::list_issues,
        crate::api::issue::create_issue,
        crate::api::issue::update_issue,
        crate::api::issue::delete_issue,
    ),
    components(schemas(
        CreateIssueRequest,
        UpdateIssueRequest,
        DeleteIssueRequest,
        IssueResponse,
        MutationResponse,
    )),
    tags(
        (name = "issues", description = "이슈 CRUD"),
        (name = "health check"),
    ),
)]
pub struct ApiDoc;
