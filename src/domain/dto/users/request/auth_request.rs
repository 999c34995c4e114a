//! 회원가입/로그인 요청 DTO
//!
//! 로컬(비밀번호) 인증 엔드포인트의 입력 데이터 구조와 검증 규칙을
//! 정의합니다. 검증 실패는 400 응답으로 변환되며 어떤 레코드도
//! 생성되지 않습니다.

use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    /// 사용자명 (1-50자)
    #[validate(length(min = 1, max = 50, message = "사용자명을 입력해주세요"))]
    pub username: String,

    /// 비밀번호 (빈 값 불가)
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 로그인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    pub state: Option<String>,

    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_with_empty_password_fails_validation() {
        let request = SignupRequest {
            username: "user123".to_string(),
            password: "".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_with_empty_username_fails_validation() {
        let request = SignupRequest {
            username: "".to_string(),
            password: "secret".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_signup_passes_validation() {
        let request = SignupRequest {
            username: "user123".to_string(),
            password: "secret".to_string(),
        };

        assert!(request.validate().is_ok());
    }
}
