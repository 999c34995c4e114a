//! JwtAuthFilter 인증 로직의 핵심적인 기능

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::authenticated_user::AuthenticatedPrincipal;
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct JwtAuthFilterService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // CORS Preflight(OPTIONS) 요청은 필터 대상에서 제외
            if req.method() != Method::OPTIONS {
                match authenticate(&req) {
                    Ok(Some(principal)) => {
                        log::debug!("인증 성공: 사용자 ID {}", principal.user_id);
                        req.extensions_mut().insert(principal);
                    }
                    Ok(None) => {
                        // 토큰 없음 - 익명 요청으로 계속 진행
                    }
                    Err(err) => {
                        // 검증 실패도 요청을 중단시키지 않음: 익명으로 강등하고
                        // 거부 여부는 다운스트림 인가 검사에 맡긴다
                        log::warn!("인증 컨텍스트를 설정할 수 없습니다: {}", err);
                    }
                }
            }

            // 다음 서비스로 요청 전달
            service.call(req).await
        })
    }
}

/// 요청에서 JWT 토큰을 추출하고 검증하여 인증 주체를 생성
///
/// # Returns
///
/// * `Ok(Some(principal))` - 유효한 토큰
/// * `Ok(None)` - 토큰 없음 (헤더 누락, Bearer 형식 아님, 리터럴 "null")
/// * `Err(AppError)` - 토큰은 있으나 검증 실패
fn authenticate(req: &ServiceRequest) -> Result<Option<AuthenticatedPrincipal>, AppError> {
    let token = match parse_bearer_token(req) {
        Some(token) => token,
        None => return Ok(None),
    };

    // 토큰이 없을 때 클라이언트가 문자 그대로 "null"을 보내는 경우 방어
    if token.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    let token_service = TokenService::instance();
    let user_id = token_service.validate_and_get_user_id(token)?;

    // 권한 없는 인증 객체 생성 (역할 기반 인가는 이 계층에서 수행하지 않음)
    Ok(Some(AuthenticatedPrincipal::new(user_id)))
}

/// Authorization 헤더에서 Bearer 토큰만 추출
fn parse_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
