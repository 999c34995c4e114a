//! 공통 API 응답 봉투
//!
//! 목록형 API 응답을 동일한 형식으로 제공하는 제네릭 DTO입니다.
//! 성공 시 `data`, 실패 시 `error`가 채워집니다.
//!
//! ```json
//! { "data": [ { "id": "...", "title": "할 일 1", "done": false } ], "error": null }
//! { "data": null, "error": "Unknown user" }
//! ```

use serde::{Deserialize, Serialize};

/// 공통 API 응답 포맷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDTO<T> {
    /// 에러 메시지 (성공 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 실제 응답 데이터 리스트 (실패 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
}

impl<T> ResponseDTO<T> {
    /// 성공 응답 생성
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }

    /// 에러 응답 생성
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_omits_error_field() {
        let response = ResponseDTO::ok(vec!["a".to_string()]);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(json, r#"{"data":["a"]}"#);
    }

    #[test]
    fn test_error_response_omits_data_field() {
        let response: ResponseDTO<String> = ResponseDTO::error("Unknown user");
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(json, r#"{"error":"Unknown user"}"#);
    }
}
