//! OAuth HTTP Handlers
//!
//! 소셜 로그인의 두 구간을 처리합니다.
//!
//! 1. 시작: 클라이언트를 프로바이더 인증 페이지로 리다이렉트
//!    (이 시점에 리디렉션 쿠키 필터가 `redirect_url`을 쿠키로 보존)
//! 2. 완료: 프로바이더 콜백에서 사용자 확정 후 토큰을 실어
//!    클라이언트 목적지로 리다이렉트

use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::{AuthProvider, FrontendConfig};
use crate::domain::dto::users::request::OAuthCallbackQuery;
use crate::errors::errors::AppError;
use crate::middlewares::consume_redirect_url;
use crate::services::auth::{OAuthService, TokenService};

/// 소셜 로그인 시작 핸들러
///
/// 프로바이더의 authorization 페이지로 302 리다이렉트합니다.
///
/// # Endpoint
/// `GET /oauth2/authorization/{provider}?redirect_url={url}`
#[get("/authorization/{provider}")]
pub async fn authorize(provider: web::Path<String>) -> Result<HttpResponse, AppError> {
    let provider = AuthProvider::from_str(&provider).map_err(AppError::ValidationError)?;

    let oauth_service = OAuthService::instance();
    let login_url = oauth_service.authorization_url(&provider)?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, login_url))
        .finish())
}

/// 소셜 로그인 완료(콜백) 핸들러
///
/// 프로바이더 인증을 마친 브라우저가 돌아오는 지점입니다.
/// 사용자 확정 후:
///
/// 1. 저장된 사용자 ID를 subject로 토큰 발급
/// 2. 리디렉션 쿠키가 있으면 그 값, 없으면 기본 프론트엔드 오리진 사용
///    (쿠키가 아예 없는 요청도 동일하게 기본값 사용)
/// 3. `{base}/sociallogin?token={token}` 으로 302 리다이렉트
///
/// # Endpoint
/// `GET /oauth2/callback/{provider}?code={code}&state={state}`
#[get("/callback/{provider}")]
pub async fn oauth_callback(
    req: HttpRequest,
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 사용자가 거부했거나 프로바이더 측 에러
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let provider = AuthProvider::from_str(&provider).map_err(AppError::ValidationError)?;

    let oauth_service = OAuthService::instance();
    let token_service = TokenService::instance();

    if let Some(state) = &query.state {
        oauth_service.verify_state(state)?;
    }

    // 프로바이더 왕복 + 사용자 조회/생성
    let user = oauth_service
        .authenticate_with_code(&provider, &query.code)
        .await?;

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    let token = token_service.create(&user_id)?;

    let target_base = consume_redirect_url(&req).unwrap_or_else(FrontendConfig::origin);
    let target_url = format!("{}/sociallogin?token={}", target_base, token);

    log::info!(
        "소셜 로그인 완료: {} ({}), 리다이렉트 대상: {}",
        user.username,
        provider.as_str(),
        target_base
    );

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target_url))
        .finish())
}
