//! Todo HTTP Handlers
//!
//! 인증 서브시스템이 보호하는 할 일 CRUD 엔드포인트입니다.
//! 모든 핸들러는 `AuthenticatedPrincipal` 추출자를 통해 인증을 요구하며,
//! 익명 요청은 403으로 거부됩니다. 조회와 변경은 전부 주체의
//! 사용자 ID로 스코프됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::common::ResponseDTO;
use crate::domain::dto::todos::TodoRequest;
use crate::domain::models::auth::authenticated_user::AuthenticatedPrincipal;
use crate::errors::errors::AppError;
use crate::services::todos::todo_service::TodoService;

/// 할 일 생성
///
/// # Endpoint
/// `POST /todo`
#[post("")]
pub async fn create_todo(
    principal: AuthenticatedPrincipal,
    payload: web::Json<TodoRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = TodoService::instance();
    let todos = service
        .create(&principal.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ResponseDTO::ok(todos)))
}

/// 할 일 목록 조회
///
/// # Endpoint
/// `GET /todo`
#[get("")]
pub async fn retrieve_todo_list(
    principal: AuthenticatedPrincipal,
) -> Result<HttpResponse, AppError> {
    let service = TodoService::instance();
    let todos = service.retrieve(&principal.user_id).await?;

    Ok(HttpResponse::Ok().json(ResponseDTO::ok(todos)))
}

/// 할 일 수정
///
/// # Endpoint
/// `PUT /todo`
#[put("")]
pub async fn update_todo(
    principal: AuthenticatedPrincipal,
    payload: web::Json<TodoRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = TodoService::instance();
    let todos = service
        .update(&principal.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ResponseDTO::ok(todos)))
}

/// 할 일 삭제
///
/// # Endpoint
/// `DELETE /todo`
#[delete("")]
pub async fn delete_todo(
    principal: AuthenticatedPrincipal,
    payload: web::Json<TodoRequest>,
) -> Result<HttpResponse, AppError> {
    let service = TodoService::instance();
    let todos = service
        .delete(&principal.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ResponseDTO::ok(todos)))
}
