//! Authentication HTTP Handlers
//!
//! 로컬(비밀번호) 인증 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로그인 성공 시 상태 없는 JWT를 발급하며, 서버는 세션을 저장하지
//! 않습니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{SigninRequest, SignupRequest};
use crate::domain::dto::users::response::SigninResponse;
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::users::user_service::UserService;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /auth/signup`
#[post("/signup")]
pub async fn signup(payload: web::Json<SignupRequest>) -> Result<HttpResponse, AppError> {
    // 유효성 검사 - 실패 시 어떤 레코드도 생성되지 않음
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let response = user_service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로그인 핸들러
///
/// 인증 성공 시 사용자 정보와 함께 JWT 토큰을 반환합니다.
/// 사용자명 미존재와 비밀번호 불일치는 동일한 실패 응답을 받습니다.
///
/// # Endpoint
/// `POST /auth/signin`
#[post("/signin")]
pub async fn signin(payload: web::Json<SigninRequest>) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let token_service = TokenService::instance();

    let user = user_service
        .get_by_credentials(&payload.username, &payload.password)
        .await?;

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    log::info!("로그인 성공 - 사용자: {}, ID: {}", payload.username, user_id);

    let token = token_service.create(&user_id)?;

    Ok(HttpResponse::Ok().json(SigninResponse::new(user, token)))
}
