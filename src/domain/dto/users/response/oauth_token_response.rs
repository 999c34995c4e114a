//! OAuth 토큰 교환 응답 모델
//!
//! 프로바이더의 토큰 엔드포인트 응답입니다. 프로바이더마다 부가 필드가
//! 다르므로 access_token 외에는 전부 선택 필드로 둡니다.

use serde::Deserialize;

/// OAuth authorization code 교환 응답
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}
