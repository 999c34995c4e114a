//! 사용자 응답 DTO
//!
//! 회원가입/로그인 응답 형태입니다. 비밀번호 해시 등 민감한 정보는
//! 포함하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub auth_provider: AuthProvider,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            auth_provider: user.auth_provider,
        }
    }
}

/// 로그인 응답 DTO (토큰 포함)
///
/// ```json
/// { "id": "...", "username": "user123", "token": "eyJhbGciOiJIUzUxMiJ9..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

impl SigninResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            token,
        }
    }
}
