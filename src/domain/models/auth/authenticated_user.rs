//! 요청 스코프 인증 주체
//!
//! 인증 필터가 토큰 검증에 성공했을 때 요청 extension에 부착하는
//! 주체 정보입니다. 요청 처리 중에만 존재하며 요청 간에 공유되거나
//! 영속되지 않습니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

/// JWT 토큰에서 추출된 인증 주체
///
/// 인증 필터는 권한 목록 없이 주체만 부착합니다 (이 계층에서
/// 역할 기반 인가를 수행하지 않음). 다운스트림 핸들러는 `user_id`를
/// 기준으로 사용자별 연산을 스코프합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    /// 사용자 고유 ID (내부 ID의 문자열 표현)
    pub user_id: String,

    /// 부여된 권한 목록 (인증 필터에서는 항상 비어 있음)
    pub authorities: Vec<String>,
}

impl AuthenticatedPrincipal {
    /// 인증 필터에서 사용하는 생성자 (권한 없음)
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            authorities: Vec::new(),
        }
    }

    /// 주체의 식별 이름을 반환합니다.
    pub fn principal_name(&self) -> &str {
        &self.user_id
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 필터가 주체를 부착하지 않은 요청(익명 요청)은 403으로
/// 거부됩니다. 필터 자체는 절대 요청을 중단시키지 않으므로, 인증이
/// 필요한 엔드포인트의 최종 거부는 이 추출자가 담당합니다.
impl FromRequest for AuthenticatedPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedPrincipal>() {
            Some(principal) => ready(Ok(principal.clone())),
            None => ready(Err(actix_web::error::ErrorForbidden(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 선택적 인증 주체 추출자
///
/// 익명 요청도 허용하는 핸들러에서 사용합니다.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<AuthenticatedPrincipal>);

impl FromRequest for OptionalPrincipal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req.extensions().get::<AuthenticatedPrincipal>().cloned();
        ready(Ok(OptionalPrincipal(principal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_name_is_user_id() {
        let principal = AuthenticatedPrincipal::new("507f1f77bcf86cd799439011".to_string());
        assert_eq!(principal.principal_name(), "507f1f77bcf86cd799439011");
        assert!(principal.authorities.is_empty());
    }
}
