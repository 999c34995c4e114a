//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 인증 에러 처리 정책
//!
//! 토큰 검증 에러(`InvalidSignature`, `TokenExpired`)는 인증 필터 안에서
//! 소비되며 HTTP 응답으로 직접 노출되지 않습니다. 필터는 해당 요청을
//! 익명 상태로 강등시키고, 최종 거부 여부는 다운스트림의 인가 검사
//! (`AuthenticatedPrincipal` 추출자)가 결정합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn signup(request: SignupRequest) -> Result<User, AppError> {
//!     if user_repo.exists_by_username(&request.username).await? {
//!         return Err(AppError::ConflictError("Username already exists".to_string()));
//!     }
//!
//!     user_repo.create(user).await
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// JWT 서명 불일치 (401 Unauthorized)
    ///
    /// 다른 키로 서명되었거나 변조된 토큰입니다.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// JWT 만료 (401 Unauthorized)
    #[error("Token has expired")]
    TokenExpired,

    /// OAuth 프로바이더 응답이 구조적으로 기대와 다름 (401 Unauthorized)
    ///
    /// 로그인 시도 자체를 중단시키는 치명적 에러입니다.
    /// 부분 데이터로 계속 진행하지 않습니다.
    #[error("Malformed provider payload: {0}")]
    MalformedProviderPayload(String),

    /// 인증 실패 에러 (401 Unauthorized)
    ///
    /// 자격 증명 불일치, OAuth 교환 거부 등. 사용자명 존재 여부를
    /// 노출하지 않도록 메시지는 일반적인 문구를 사용합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InvalidSignature
            | AppError::TokenExpired
            | AppError::MalformedProviderPayload(_)
            | AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Password is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert_eq!(
            AppError::InvalidSignature.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::TokenExpired.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MalformedProviderPayload("kakao_account missing".to_string())
                .error_response()
                .status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Login failed".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Insufficient permissions".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Username already exists".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
