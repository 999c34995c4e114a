//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. JWT 인증 필터 (JwtAuthFilter)
//! - Bearer 토큰 추출 및 검증
//! - 검증 성공 시 요청 extension에 [`AuthenticatedPrincipal`] 부착
//! - 검증 실패 시 요청을 익명 상태로 두고 항상 다음 단계로 전달 (fail-open)
//!
//! ### 2. 리디렉션 쿠키 필터 (RedirectUrlCookieFilter)
//! - 소셜 로그인 시작 요청의 `redirect_url` 파라미터를 쿠키로 보존
//! - 서버 세션 없이 OAuth 핸드셰이크의 두 구간을 연결
//!
//! # 필터 순서
//!
//! 리디렉션 쿠키 필터 → JWT 인증 필터 → 라우트 핸들러 순으로 실행되며,
//! 두 필터 모두 요청을 중단시키지 않습니다. 인증이 필요한 엔드포인트의
//! 거부는 핸들러 시그니처의 `AuthenticatedPrincipal` 추출자가 담당합니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(JwtAuthFilter)            // 나중에 등록된 wrap이 먼저 실행되지 않도록 순서 주의
//!     .wrap(RedirectUrlCookieFilter)
//!     .configure(configure_all_routes)
//! ```
//!
//! [`AuthenticatedPrincipal`]: crate::domain::models::auth::authenticated_user::AuthenticatedPrincipal

pub mod auth_middleware;
mod auth_inner;
pub mod redirect_cookie;

// 미들웨어 재export
pub use auth_middleware::JwtAuthFilter;
pub use redirect_cookie::{consume_redirect_url, RedirectUrlCookieFilter, REDIRECT_URI_PARAM};
