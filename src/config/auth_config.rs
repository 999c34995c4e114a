//! # Authentication Configuration Module
//!
//! JWT 토큰, OAuth 프로바이더, 프론트엔드 리디렉션 등 인증 관련 설정을
//! 관리하는 모듈입니다. 모든 값은 환경 변수에서 읽으며, 프로세스 시작 이후
//! 변경되지 않는 읽기 전용 설정으로 취급됩니다.

use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::errors::AppError;

/// JSON Web Token (JWT) 관련 설정을 관리하는 구조체
///
/// 서명 키, 발급자, 만료 시간을 제공합니다. 서명 키는 프로세스 전역에서
/// 공유되는 불변 값이며, 동시 읽기에 별도의 동기화가 필요하지 않습니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 토큰의 발급자(`iss`) 클레임에 사용되는 고정 문자열
    pub const ISSUER: &'static str = "spa-login";

    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// HMAC-SHA-512 서명에 사용되므로 최소 512비트(64바이트) 길이의
    /// 키가 필요합니다.
    ///
    /// # 기본값
    ///
    /// `JWT_SECRET` 환경 변수가 설정되지 않은 경우 개발용 기본 키를
    /// 사용하며 경고 로그를 출력합니다. 프로덕션에서는 반드시 설정하세요.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 64
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "iWSjSekWzSxK9Ou43E8W2zaRB6BP4F7AYLut2N19c3MIGPbg8glSab0Mw3r9ZCAFqQKlZ2FuIgDYtrabc3EK1g"
                .to_string()
        })
    }

    /// JWT 액세스 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// 기본값은 24시간이며, 만료 시각은 발급 시점에 `iat + 24h`로
    /// 고정됩니다. 토큰은 폐기 목록 없는 bearer 자격 증명이므로
    /// 유효성은 서명과 만료 시각만으로 결정됩니다.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// OAuth 일반 설정
///
/// 모든 프로바이더에 공통으로 적용되는 보안 설정입니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 값 생성에 사용하는 비밀키를 반환합니다.
    ///
    /// 인증 요청에 실어 보낸 state가 콜백에서 그대로 돌아오는지
    /// 확인하는 용도입니다.
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        })
    }
}

/// SPA 프론트엔드 관련 설정
///
/// CORS 허용 오리진과 소셜 로그인 완료 후 기본 리디렉션 대상으로 사용됩니다.
pub struct FrontendConfig;

impl FrontendConfig {
    /// 프론트엔드 오리진을 반환합니다.
    ///
    /// # 기본값
    ///
    /// `http://localhost:3000` (React 개발 서버)
    pub fn origin() -> String {
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }
}

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// 다섯 가지 공급자로 닫혀 있는 tagged union 입니다. 프로바이더별 사용자
/// 정보 정규화는 [`crate::domain::models::auth::oauth_attributes`]에서
/// 이 집합을 기준으로 분기합니다.
///
/// ## 직렬화
///
/// MongoDB 저장 및 API 응답에서 소문자 문자열(`"password"`, `"google"`,
/// `"kakao"`, `"naver"`, `"github"`)로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 이메일/패스워드 인증
    Password,
    /// Google OAuth 2.0 (OIDC 표준 사용자 정보 형태)
    Google,
    /// Kakao OAuth (중첩된 `kakao_account.profile` 형태)
    Kakao,
    /// Naver OAuth (중첩된 `response` 봉투 형태)
    Naver,
    /// GitHub OAuth (flat 형태, 이메일은 비공개일 수 있음)
    GitHub,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다.
    ///
    /// 대소문자를 무시하며, 지원하지 않는 프로바이더는 에러를 반환합니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "password" => Ok(AuthProvider::Password),
            "google" => Ok(AuthProvider::Google),
            "kakao" => Ok(AuthProvider::Kakao),
            "naver" => Ok(AuthProvider::Naver),
            "github" => Ok(AuthProvider::GitHub),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// OAuth registration id 문자열을 AuthProvider로 변환합니다.
    ///
    /// 정규화 단계의 분기 규칙과 동일하게, `kakao`/`naver`/`github` 외의
    /// 모든 registration id는 Google 호환 OIDC 형태로 취급됩니다.
    pub fn from_registration_id(registration_id: &str) -> Self {
        match registration_id {
            "kakao" => AuthProvider::Kakao,
            "naver" => AuthProvider::Naver,
            "github" => AuthProvider::GitHub,
            _ => AuthProvider::Google,
        }
    }

    /// AuthProvider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::Google => "google",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Naver => "naver",
            AuthProvider::GitHub => "github",
        }
    }
}

/// OAuth 프로바이더별 클라이언트 설정
///
/// 인증/토큰/사용자 정보 엔드포인트와 클라이언트 자격 증명,
/// 사용자 식별 키 이름을 묶어서 제공합니다.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    /// registration id (`google`, `kakao`, `naver`, `github`)
    pub registration_id: &'static str,
    /// OAuth 클라이언트 ID
    pub client_id: String,
    /// OAuth 클라이언트 시크릿
    pub client_secret: String,
    /// 인증(authorize) 엔드포인트
    pub auth_uri: String,
    /// 토큰 교환 엔드포인트
    pub token_uri: String,
    /// 사용자 정보 엔드포인트
    pub user_info_uri: String,
    /// 인증 요청 scope
    pub scope: &'static str,
    /// 사용자 식별에 사용할 속성 키 (google: `sub`, 그 외: `id`)
    pub user_name_attribute_key: &'static str,
}

impl OAuthClientConfig {
    /// 주어진 프로바이더의 OAuth 클라이언트 설정을 환경 변수에서 구성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - `Password` 프로바이더는 OAuth 플로우가 없음
    /// * `AppError::InternalError` - 클라이언트 자격 증명 환경 변수 미설정
    pub fn for_provider(provider: &AuthProvider) -> Result<Self, AppError> {
        match provider {
            AuthProvider::Password => Err(AppError::ValidationError(
                "Password provider has no OAuth flow".to_string(),
            )),
            AuthProvider::Google => Ok(Self {
                registration_id: "google",
                client_id: required_env("GOOGLE_CLIENT_ID")?,
                client_secret: required_env("GOOGLE_CLIENT_SECRET")?,
                auth_uri: env_or("GOOGLE_AUTH_URI", "https://accounts.google.com/o/oauth2/auth"),
                token_uri: env_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
                user_info_uri: env_or(
                    "GOOGLE_USER_INFO_URI",
                    "https://www.googleapis.com/oauth2/v3/userinfo",
                ),
                scope: "openid email profile",
                user_name_attribute_key: "sub",
            }),
            AuthProvider::Kakao => Ok(Self {
                registration_id: "kakao",
                client_id: required_env("KAKAO_CLIENT_ID")?,
                client_secret: required_env("KAKAO_CLIENT_SECRET")?,
                auth_uri: env_or("KAKAO_AUTH_URI", "https://kauth.kakao.com/oauth/authorize"),
                token_uri: env_or("KAKAO_TOKEN_URI", "https://kauth.kakao.com/oauth/token"),
                user_info_uri: env_or("KAKAO_USER_INFO_URI", "https://kapi.kakao.com/v2/user/me"),
                scope: "account_email profile_nickname profile_image",
                user_name_attribute_key: "id",
            }),
            AuthProvider::Naver => Ok(Self {
                registration_id: "naver",
                client_id: required_env("NAVER_CLIENT_ID")?,
                client_secret: required_env("NAVER_CLIENT_SECRET")?,
                auth_uri: env_or("NAVER_AUTH_URI", "https://nid.naver.com/oauth2.0/authorize"),
                token_uri: env_or("NAVER_TOKEN_URI", "https://nid.naver.com/oauth2.0/token"),
                user_info_uri: env_or("NAVER_USER_INFO_URI", "https://openapi.naver.com/v1/nid/me"),
                scope: "name email profile_image",
                user_name_attribute_key: "id",
            }),
            AuthProvider::GitHub => Ok(Self {
                registration_id: "github",
                client_id: required_env("GITHUB_CLIENT_ID")?,
                client_secret: required_env("GITHUB_CLIENT_SECRET")?,
                auth_uri: env_or("GITHUB_AUTH_URI", "https://github.com/login/oauth/authorize"),
                token_uri: env_or(
                    "GITHUB_TOKEN_URI",
                    "https://github.com/login/oauth/access_token",
                ),
                user_info_uri: env_or("GITHUB_USER_INFO_URI", "https://api.github.com/user"),
                scope: "read:user user:email",
                user_name_attribute_key: "id",
            }),
        }
    }

    /// 이 프로바이더의 OAuth 콜백 redirect_uri를 반환합니다.
    ///
    /// `OAUTH_REDIRECT_BASE` 환경 변수 뒤에 registration id를 붙입니다.
    /// 기본값: `http://localhost:8080/oauth2/callback/{provider}`
    pub fn redirect_uri(&self) -> String {
        let base = env_or("OAUTH_REDIRECT_BASE", "http://localhost:8080/oauth2/callback");
        format!("{}/{}", base.trim_end_matches('/'), self.registration_id)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn required_env(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::InternalError(format!("{} must be set", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(
            AuthProvider::from_str("password").unwrap(),
            AuthProvider::Password
        );
        assert_eq!(
            AuthProvider::from_str("google").unwrap(),
            AuthProvider::Google
        );
        assert_eq!(AuthProvider::from_str("kakao").unwrap(), AuthProvider::Kakao);
        assert_eq!(AuthProvider::from_str("naver").unwrap(), AuthProvider::Naver);
        assert_eq!(
            AuthProvider::from_str("github").unwrap(),
            AuthProvider::GitHub
        );

        // 대소문자 무관 테스트
        assert_eq!(
            AuthProvider::from_str("GOOGLE").unwrap(),
            AuthProvider::Google
        );

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("facebook").is_err());
        assert!(AuthProvider::from_str("unknown").is_err());
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        let providers = ["password", "google", "kakao", "naver", "github"];

        for &provider_str in &providers {
            let provider = AuthProvider::from_str(provider_str).unwrap();
            assert_eq!(provider.as_str(), provider_str);
        }
    }

    #[test]
    fn test_from_registration_id_folds_unknown_into_google() {
        assert_eq!(
            AuthProvider::from_registration_id("kakao"),
            AuthProvider::Kakao
        );
        assert_eq!(
            AuthProvider::from_registration_id("naver"),
            AuthProvider::Naver
        );
        assert_eq!(
            AuthProvider::from_registration_id("github"),
            AuthProvider::GitHub
        );
        assert_eq!(
            AuthProvider::from_registration_id("google"),
            AuthProvider::Google
        );
        // 알 수 없는 registration id는 OIDC 기본 형태로 취급
        assert_eq!(
            AuthProvider::from_registration_id("unknown-provider"),
            AuthProvider::Google
        );
        // 분기는 대소문자를 구분함
        assert_eq!(
            AuthProvider::from_registration_id("Kakao"),
            AuthProvider::Google
        );
    }

    #[test]
    fn test_auth_provider_serialization() {
        let provider = AuthProvider::GitHub;
        let json = serde_json::to_string(&provider).unwrap();
        assert_eq!(json, "\"github\"");

        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, deserialized);
    }

    #[test]
    fn test_jwt_issuer_constant() {
        assert_eq!(JwtConfig::ISSUER, "spa-login");
    }
}
