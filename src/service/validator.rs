use crate::model::issue::{DeleteIssueRequest, UpdateIssueRequest};
use crate::service::error::IssueError;
use crate::store::IssuePatch;

// 공백뿐인 값은 보내지 않은 것으로 본다.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_id(id: Option<String>) -> Result<String, IssueError> {
    present(id)
        .map(|id| id.trim().to_string())
        .ok_or(IssueError::MissingIdentifier)
}

// 선택 필드는 빈 값으로 비울 수 있다. 공백뿐인 값은 "" 로 저장한다.
fn clearable(value: Option<String>) -> Option<String> {
    value.map(|v| if v.trim().is_empty() { String::new() } else { v })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.is_empty())
}

/// 수정 요청을 검사해 대상 `_id` 와 덮어쓸 필드로 나눈다.
/// 빈 값은 "수정할 필드" 로 세지 않지만, 담당자와 상태 문구는 빈 값으로 비워진다.
pub fn validate_update(request: UpdateIssueRequest) -> Result<(String, IssuePatch), IssueError> {
    let id = required_id(request.id)?;

    let patch = IssuePatch {
        issue_title: present(request.issue_title),
        issue_text: present(request.issue_text),
        created_by: present(request.created_by),
        assigned_to: clearable(request.assigned_to),
        status_text: clearable(request.status_text),
        open: request.open,
    };

    let has_update = patch.issue_title.is_some()
        || patch.issue_text.is_some()
        || patch.created_by.is_some()
        || !is_blank(&patch.assigned_to)
        || !is_blank(&patch.status_text)
        || patch.open.is_some();

    if !has_update {
        return Err(IssueError::NoUpdateFields { id });
    }

    Ok((id, patch))
}

pub fn validate_delete(request: DeleteIssueRequest) -> Result<String, IssueError> {
    required_id(request.id)
}
