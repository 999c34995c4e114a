//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증(사용자명/비밀번호)과 OAuth 소셜 로그인을 모두 지원하는
//! 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// OAuth 프로바이더에서 받아온 부가 정보
///
/// 사용자 레코드의 중복 제거 키는 `(username=email, auth_provider)`이지만,
/// 프로바이더 고유 식별자(`provider_user_id`)를 함께 보관하여
/// 추후 `(provider, subject_id)` 기반으로 키를 이관할 수 있게 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthData {
    /// 프로바이더에서의 사용자 고유 ID
    pub provider_user_id: String,
    /// 프로바이더가 제공한 표시 이름
    pub display_name: String,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_profile_image: Option<String>,
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 사용자명은 시스템 전체에서 유일하며, 소셜 로그인 사용자의 경우
/// 프로바이더가 제공한 이메일이 사용자명으로 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique, 소셜 로그인의 경우 이메일)
    pub username: String,
    /// 해시된 비밀번호 (OAuth 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// OAuth 관련 추가 데이터 (로컬 인증 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_data: Option<OAuthData>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (사용자명/비밀번호)
    pub fn new_local(username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Password,
            oauth_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// 소셜 로그인 완료 시점에 호출되며, 비밀번호 없이 생성됩니다.
    pub fn new_oauth(username: String, auth_provider: AuthProvider, oauth_data: OAuthData) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            password_hash: None,
            auth_provider,
            oauth_data: Some(oauth_data),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    ///
    /// 토큰의 subject 클레임으로 사용되는 값입니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Password) && self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_user_can_authenticate_with_password() {
        let user = User::new_local("alice".to_string(), "hashed".to_string());
        assert!(user.can_authenticate_with_password());
        assert_eq!(user.auth_provider, AuthProvider::Password);
        assert!(user.oauth_data.is_none());
    }

    #[test]
    fn test_oauth_user_has_no_password() {
        let user = User::new_oauth(
            "bob@example.com".to_string(),
            AuthProvider::GitHub,
            OAuthData {
                provider_user_id: "123".to_string(),
                display_name: "bob".to_string(),
                provider_profile_image: None,
            },
        );
        assert!(!user.can_authenticate_with_password());
        assert!(user.password_hash.is_none());
        assert_eq!(
            user.oauth_data.as_ref().unwrap().provider_user_id,
            "123"
        );
    }
}
