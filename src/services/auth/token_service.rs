//! JWT 토큰 관리 서비스 구현
//!
//! 시간 제한이 있는 상태 없는(stateless) 인증 토큰의 발급과 검증을
//! 담당합니다. 토큰 유효성은 서명과 만료 시각만으로 결정됩니다 —
//! 폐기 목록이나 서버 측 세션 조회가 없으므로 수평 확장이 자유로운 대신
//! 조기 로그아웃/강제 만료는 불가능합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::domain::models::token::token::TokenClaims;
use crate::errors::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA-512 서명을 사용하여 토큰을 생성하고 검증합니다.
/// 서명 키는 프로세스 시작 시 로드되는 읽기 전용 설정이며,
/// 토큰 만료는 발급 시점에 24시간 뒤로 고정됩니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자 ID를 주체로 하는 JWT 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰의 subject로 들어갈 사용자 식별자
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 생성된 JWT (compact 직렬화)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let token = token_service.create("507f1f77bcf86cd799439011")?;
    /// ```
    pub fn create(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: user_id.to_string(),
            iss: JwtConfig::ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::new(Algorithm::HS512);
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰을 검증하고, 포함된 사용자 ID(subject)를 반환
    ///
    /// 서명과 만료 시각 외의 어떤 필드도 외부 상태와 대조하지 않습니다.
    ///
    /// # Arguments
    ///
    /// * `token` - 검증할 JWT 문자열 (Bearer 접두사 제외)
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 발급 시점에 넣은 subject 그대로
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidSignature` - 서명 불일치 (키가 다르거나 변조됨)
    /// * `AppError::TokenExpired` - 현재 시각이 만료 시각을 지남
    /// * `AppError::AuthenticationError` - 그 외 형식 오류
    pub fn validate_and_get_user_id(&self, token: &str) -> Result<String, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::new(Algorithm::HS512);

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::InvalidSignature,
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 `"Bearer {token}"` 형식에서 토큰 부분만을
    /// 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - `Bearer ` 접두사가 없는 헤더
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        if auth_header.starts_with("Bearer ") {
            Ok(&auth_header[7..])
        } else {
            Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_roundtrip() {
        let service = TokenService::instance();

        let token = service.create("507f1f77bcf86cd799439011").unwrap();
        let subject = service.validate_and_get_user_id(&token).unwrap();

        assert_eq!(subject, "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_created_token_carries_issuer_and_24h_expiry() {
        let service = TokenService::instance();
        let token = service.create("42").unwrap();

        let secret = JwtConfig::secret();
        let claims = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::new(Algorithm::HS512),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.iss, "spa-login");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 이틀 전에 발급되어 하루 전에 만료된 토큰을 직접 인코딩
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "42".to_string(),
            iss: JwtConfig::ISSUER.to_string(),
            iat: now - 48 * 3600,
            exp: now - 24 * 3600,
        };

        let secret = JwtConfig::secret();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        let service = TokenService::instance();
        let result = service.validate_and_get_user_id(&token);

        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_token_signed_with_different_key_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "42".to_string(),
            iss: JwtConfig::ISSUER.to_string(),
            iat: now,
            exp: now + 24 * 3600,
        };

        // 페이로드는 유효하지만 다른 키로 서명
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"some-other-signing-key-that-is-long-enough-for-hs512-use"),
        )
        .unwrap();

        let service = TokenService::instance();
        let result = service.validate_and_get_user_id(&token);

        assert!(matches!(result, Err(AppError::InvalidSignature)));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::instance();

        assert_eq!(
            service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("").is_err());
    }
}
