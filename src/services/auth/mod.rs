//! 인증 및 보안 서비스 모듈
//!
//! JWT 기반 토큰 인증과 OAuth 2.0 소셜 로그인을 담당하는 서비스들을
//! 제공합니다.
//!
//! # Features
//!
//! - HMAC-SHA-512 서명의 상태 없는 JWT 발급/검증
//! - Google / Kakao / Naver / GitHub OAuth 2.0 소셜 로그인
//! - 프로바이더 응답 정규화 후 사용자 조회/생성
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, OAuthService};
//!
//! let token_service = TokenService::instance();
//! let token = token_service.create(&user_id)?;
//!
//! let oauth_service = OAuthService::instance();
//! let user = oauth_service.authenticate_with_code(&provider, &code).await?;
//! ```

pub mod token_service;
pub mod oauth_service;

pub use token_service::*;
pub use oauth_service::*;
