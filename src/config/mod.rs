//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 환경, 비밀번호 해싱 관련 설정
//! - [`auth_config`] - JWT, OAuth 프로바이더, 프론트엔드 오리진 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전 (프로덕션 미설정 시 경고 로그)
//! - 설정값은 프로세스 시작 시 읽혀 이후 변경되지 않음
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # JWT 설정 (HMAC-SHA-512 서명, 512비트 이상 키)
//! export JWT_SECRET="$(openssl rand -base64 64)"
//! export JWT_EXPIRATION_HOURS="24"
//!
//! # 소셜 로그인 프로바이더 (사용하는 프로바이더만)
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export KAKAO_CLIENT_ID="..."
//! export KAKAO_CLIENT_SECRET="..."
//! export NAVER_CLIENT_ID="..."
//! export NAVER_CLIENT_SECRET="..."
//! export GITHUB_CLIENT_ID="..."
//! export GITHUB_CLIENT_SECRET="..."
//!
//! # 콜백 및 프론트엔드
//! export OAUTH_REDIRECT_BASE="http://localhost:8080/oauth2/callback"
//! export FRONTEND_ORIGIN="http://localhost:3000"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
