//! OAuth 사용자 정보 정규화
//!
//! 외부 프로바이더에서 받아온 사용자 정보를 애플리케이션 표준 형태로
//! 변환합니다. 프로바이더마다 응답 JSON 구조가 전부 다르기 때문에
//! (GitHub는 flat, Kakao는 `kakao_account.profile` 중첩, Naver는
//! `response` 봉투), 정규화는 반드시 이 경계에서 한 번만 수행하고
//! 다운스트림은 프로바이더별 키를 알지 못하게 합니다.
//!
//! ## 분기 규칙
//!
//! registration id 에 대한 대소문자 구분 완전 일치로 분기합니다.
//! `naver` / `kakao` / `github` 외의 모든 값(`google` 포함)은
//! OIDC 표준(Google) 형태로 처리됩니다.
//!
//! ## 누락 키 처리
//!
//! - 선택 키(이름, 이메일, 프로필 이미지 등) 누락 → 빈 문자열 대체, 에러 없음
//! - 구조적 필수 키(Kakao의 `kakao_account`/`profile`, Naver의 `response`)
//!   누락 → [`AppError::MalformedProviderPayload`] 로 로그인 시도 중단

use serde_json::{Map, Value};

use crate::errors::errors::AppError;

/// 프로바이더 응답에서 추출한 표준화된 사용자 속성
///
/// `id`와 프로바이더 조합은 생성 시점에 고정되며 이후 변경되지 않습니다.
/// `name`/`email`은 프로바이더가 값을 주지 않은 경우 빈 문자열입니다
/// (null 없음).
#[derive(Debug, Clone)]
pub struct OAuthAttributes {
    /// 프로바이더에서 가져온 원본 속성 맵
    ///
    /// Naver의 경우 바깥 봉투가 아니라 중첩된 `response` 맵입니다.
    /// 식별 키 조회가 필요한 호출자는 일관되게 이 맵을 사용해야 합니다.
    pub attributes: Map<String, Value>,
    /// 사용자 식별에 사용할 키 이름 (ex. `sub`, `id`)
    pub name_attribute_key: String,
    /// 사용자 이름 (누락 시 빈 문자열)
    pub name: String,
    /// 사용자 이메일 (누락 시 빈 문자열)
    pub email: String,
    /// 프로필 사진 URL (누락 시 빈 문자열)
    pub picture: String,
    /// 프로바이더에서의 사용자 고유 ID
    pub id: String,
}

impl OAuthAttributes {
    /// registration id 에 따라 프로바이더별 정규화를 수행합니다.
    ///
    /// # Arguments
    ///
    /// * `registration_id` - 프로바이더 구분자 (ex. `google`, `kakao`)
    /// * `user_name_attribute_name` - 기본(OIDC) 분기에서 사용자 식별에
    ///   사용할 키 이름 (Google은 `sub`)
    /// * `attributes` - 프로바이더가 반환한 사용자 정보 JSON 객체
    ///
    /// # Errors
    ///
    /// * `AppError::MalformedProviderPayload` - 구조적 필수 키 누락
    pub fn of(
        registration_id: &str,
        user_name_attribute_name: &str,
        attributes: Map<String, Value>,
    ) -> Result<Self, AppError> {
        match registration_id {
            "naver" => Self::of_naver("id", attributes),
            "kakao" => Self::of_kakao("id", attributes),
            "github" => Self::of_github("id", attributes),
            _ => Ok(Self::of_google(user_name_attribute_name, attributes)),
        }
    }

    /// GitHub 응답 변환 (flat 구조)
    ///
    /// 이메일은 사용자의 공개 설정에 따라 자주 누락됩니다.
    fn of_github(
        user_name_attribute_name: &str,
        attributes: Map<String, Value>,
    ) -> Result<Self, AppError> {
        let id = string_attr(&attributes, "id");
        let name = string_attr(&attributes, "login");
        let picture = string_attr(&attributes, "avatar_url");
        let email = string_attr(&attributes, "email");

        Ok(Self {
            attributes,
            name_attribute_key: user_name_attribute_name.to_string(),
            name,
            email,
            picture,
            id,
        })
    }

    /// Kakao 응답 변환 (`kakao_account.profile` 중첩 구조)
    ///
    /// `kakao_account`와 `profile`은 Kakao 응답 계약상 필수 구조입니다.
    fn of_kakao(
        user_name_attribute_name: &str,
        attributes: Map<String, Value>,
    ) -> Result<Self, AppError> {
        let kakao_account = attributes
            .get("kakao_account")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                AppError::MalformedProviderPayload("kakao_account is missing".to_string())
            })?;

        let profile = kakao_account
            .get("profile")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                AppError::MalformedProviderPayload("kakao_account.profile is missing".to_string())
            })?;

        let name = string_attr(profile, "nickname");
        let picture = string_attr(profile, "profile_image_url");
        let email = string_attr(kakao_account, "email");
        let id = string_attr(&attributes, "id");

        Ok(Self {
            attributes,
            name_attribute_key: user_name_attribute_name.to_string(),
            name,
            email,
            picture,
            id,
        })
    }

    /// Naver 응답 변환 (`response` 봉투 구조)
    ///
    /// 모든 필드를 중첩된 `response` 맵에서 읽으며, 반환되는
    /// `attributes`도 바깥 봉투가 아닌 이 내부 맵입니다.
    fn of_naver(
        user_name_attribute_name: &str,
        attributes: Map<String, Value>,
    ) -> Result<Self, AppError> {
        let response = attributes
            .get("response")
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| {
                AppError::MalformedProviderPayload("response is missing".to_string())
            })?;

        let name = string_attr(&response, "name");
        let email = string_attr(&response, "email");
        let picture = string_attr(&response, "profile_image");
        let id = string_attr(&response, user_name_attribute_name);

        Ok(Self {
            attributes: response,
            name_attribute_key: user_name_attribute_name.to_string(),
            name,
            email,
            picture,
            id,
        })
    }

    /// Google(OIDC 표준) 응답 변환 - 기본 분기
    ///
    /// 사용자 식별자는 `user_name_attribute_name`이 가리키는 클레임
    /// (보통 `sub`)에서 읽습니다.
    fn of_google(user_name_attribute_name: &str, attributes: Map<String, Value>) -> Self {
        let name = string_attr(&attributes, "name");
        let email = string_attr(&attributes, "email");
        let picture = string_attr(&attributes, "picture");
        let id = string_attr(&attributes, user_name_attribute_name);

        Self {
            attributes,
            name_attribute_key: user_name_attribute_name.to_string(),
            name,
            email,
            picture,
            id,
        }
    }
}

/// JSON 객체에서 키를 문자열로 읽습니다.
///
/// 숫자는 문자열로 변환하고(GitHub/Kakao의 숫자 id), 키가 없거나
/// null이면 빈 문자열을 반환합니다.
fn string_attr(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_of_github() {
        let attrs = as_map(json!({
            "id": 123,
            "login": "bob",
            "avatar_url": "u",
            "email": "e"
        }));

        let result = OAuthAttributes::of("github", "id", attrs).unwrap();

        assert_eq!(result.id, "123");
        assert_eq!(result.name, "bob");
        assert_eq!(result.picture, "u");
        assert_eq!(result.email, "e");
    }

    #[test]
    fn test_of_github_email_often_absent() {
        let attrs = as_map(json!({
            "id": 123,
            "login": "bob",
            "avatar_url": "u"
        }));

        let result = OAuthAttributes::of("github", "id", attrs).unwrap();

        assert_eq!(result.email, "");
        assert_eq!(result.id, "123");
    }

    #[test]
    fn test_of_kakao() {
        let attrs = as_map(json!({
            "id": 7,
            "kakao_account": {
                "email": "x@y.com",
                "profile": {
                    "nickname": "n",
                    "profile_image_url": "p"
                }
            }
        }));

        let result = OAuthAttributes::of("kakao", "id", attrs).unwrap();

        assert_eq!(result.id, "7");
        assert_eq!(result.name, "n");
        assert_eq!(result.email, "x@y.com");
        assert_eq!(result.picture, "p");
    }

    #[test]
    fn test_of_kakao_missing_account_is_malformed() {
        let attrs = as_map(json!({ "id": 7 }));

        let result = OAuthAttributes::of("kakao", "id", attrs);

        assert!(matches!(
            result,
            Err(AppError::MalformedProviderPayload(_))
        ));
    }

    #[test]
    fn test_of_kakao_missing_profile_is_malformed() {
        let attrs = as_map(json!({
            "id": 7,
            "kakao_account": { "email": "x@y.com" }
        }));

        let result = OAuthAttributes::of("kakao", "id", attrs);

        assert!(matches!(
            result,
            Err(AppError::MalformedProviderPayload(_))
        ));
    }

    #[test]
    fn test_of_naver_uses_inner_response_map() {
        let attrs = as_map(json!({
            "resultcode": "00",
            "message": "success",
            "response": {
                "id": "naver-1",
                "name": "철수",
                "email": "c@naver.com",
                "profile_image": "img"
            }
        }));

        let result = OAuthAttributes::of("naver", "id", attrs).unwrap();

        assert_eq!(result.id, "naver-1");
        assert_eq!(result.name, "철수");
        assert_eq!(result.email, "c@naver.com");
        assert_eq!(result.picture, "img");
        // attributes는 바깥 봉투가 아니라 내부 response 맵
        assert!(result.attributes.contains_key("id"));
        assert!(!result.attributes.contains_key("resultcode"));
    }

    #[test]
    fn test_of_naver_missing_response_is_malformed() {
        let attrs = as_map(json!({ "resultcode": "00" }));

        let result = OAuthAttributes::of("naver", "id", attrs);

        assert!(matches!(
            result,
            Err(AppError::MalformedProviderPayload(_))
        ));
    }

    #[test]
    fn test_of_google() {
        let attrs = as_map(json!({
            "sub": "g-42",
            "name": "Alice",
            "email": "a@b.com",
            "picture": "pic"
        }));

        let result = OAuthAttributes::of("google", "sub", attrs).unwrap();

        assert_eq!(result.id, "g-42");
        assert_eq!(result.name, "Alice");
        assert_eq!(result.email, "a@b.com");
        assert_eq!(result.picture, "pic");
    }

    #[test]
    fn test_unknown_provider_falls_back_to_default_branch() {
        let attrs = as_map(json!({
            "sub": "abc",
            "name": "A",
            "email": "a@b.com",
            "picture": "pic"
        }));

        let result = OAuthAttributes::of("unknown-provider", "sub", attrs).unwrap();

        assert_eq!(result.id, "abc");
        assert_eq!(result.name, "A");
    }

    #[test]
    fn test_missing_optional_keys_become_empty_strings() {
        let attrs = as_map(json!({ "sub": "abc" }));

        let result = OAuthAttributes::of("google", "sub", attrs).unwrap();

        assert_eq!(result.id, "abc");
        assert_eq!(result.name, "");
        assert_eq!(result.email, "");
        assert_eq!(result.picture, "");
    }
}
