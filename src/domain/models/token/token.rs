//! JWT 인증 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임 중 이 서비스가 사용하는 최소 집합을
//! 정의합니다.

use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 토큰은 폐기 목록 없는 상태 없는(stateless) 자격 증명이므로,
/// 유효성 판단에 필요한 최소 정보만 포함합니다. 서명 키와 현재 시각만으로
/// 검증이 가능해야 합니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `iss`: 토큰 발급자 (고정 문자열)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp, 발급 시점에 iat + 24h로 고정)
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 토큰 발급자
    pub iss: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
