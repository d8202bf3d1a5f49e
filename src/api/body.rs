use std::collections::HashMap;

use actix_web::{web, HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::global_error::{AppError, ErrorCode};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 요청 본문을 JSON 또는 폼으로 읽는다.
/// 본문이 비어 있으면 빈 요청이고, 있는데 해석이 안 되면 `invalid request body` 로 거절한다.
pub fn parse_body<T>(req: &HttpRequest, body: &web::Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let parsed = if req.content_type() == FORM_CONTENT_TYPE {
        parse_form(body)
    } else {
        serde_json::from_slice::<T>(body).map_err(|err| err.to_string())
    };

    parsed.map_err(|reason| {
        tracing::warn!("요청 본문 해석 실패: {}", reason);
        match recover_id(req, body) {
            Some(id) => AppError::with_id(ErrorCode::InvalidBody, id),
            None => AppError::new(ErrorCode::InvalidBody),
        }
    })
}

fn parse_form<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, String> {
    let text = std::str::from_utf8(body).map_err(|err| err.to_string())?;
    web::Query::<T>::from_query(text)
        .map(web::Query::into_inner)
        .map_err(|err| err.to_string())
}

// 거절된 본문에서도 `_id` 는 최대한 돌려준다.
fn recover_id(req: &HttpRequest, body: &web::Bytes) -> Option<String> {
    let id = if req.content_type() == FORM_CONTENT_TYPE {
        parse_form::<HashMap<String, String>>(body).ok()?.remove("_id")?
    } else {
        serde_json::from_slice::<Value>(body).ok()?.get("_id")?.as_str()?.to_string()
    };

    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}
