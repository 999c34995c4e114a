//! OAuth 2.0 소셜 로그인 서비스
//!
//! 프로바이더별 authorization code 교환과 사용자 정보 조회,
//! 정규화 후 사용자 레코드 조회/생성을 담당합니다.
//! 저장소 오류는 재시도 없이 로그인 실패로 전파됩니다.

use std::sync::Arc;

use serde_json::{Map, Value};
use singleton_macro::service;

use crate::{
    config::{AuthProvider, OAuthClientConfig, OAuthConfig},
    domain::dto::users::response::oauth_token_response::OAuthTokenResponse,
    domain::entities::users::user::{OAuthData, User},
    domain::models::auth::oauth_attributes::OAuthAttributes,
    errors::errors::AppError,
    repositories::users::user_repo::UserRepository,
};

/// OAuth 소셜 로그인 서비스
///
/// Google / Kakao / Naver / GitHub 프로바이더를 하나의 플로우로
/// 처리합니다. 프로바이더별 차이(엔드포인트, 응답 구조)는
/// [`OAuthClientConfig`]와 [`OAuthAttributes`]가 흡수합니다.
#[service(name = "oauth")]
pub struct OAuthService {
    user_repo: Arc<UserRepository>,
}

impl OAuthService {
    /// 프로바이더 인증 페이지로 보낼 authorization URL을 생성합니다.
    ///
    /// 사용자가 소셜 로그인을 시작할 때 이 URL로 리디렉션됩니다.
    pub fn authorization_url(&self, provider: &AuthProvider) -> Result<String, AppError> {
        let config = OAuthClientConfig::for_provider(provider)?;
        let state = self.generate_state()?;

        let params = [
            ("client_id", config.client_id.clone()),
            ("redirect_uri", config.redirect_uri()),
            ("scope", config.scope.to_string()),
            ("response_type", "code".to_string()),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", config.auth_uri, query_string))
    }

    /// authorization code로 소셜 로그인을 완료하고 사용자 레코드를 반환합니다.
    ///
    /// 1. code를 액세스 토큰으로 교환
    /// 2. 액세스 토큰으로 원본 사용자 정보(JSON) 조회
    /// 3. [`OAuthAttributes::of`]로 표준 형태로 정규화
    /// 4. `(username=email, provider)` 기준으로 사용자 조회/생성
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 프로바이더 API 호출 실패
    /// * `AppError::MalformedProviderPayload` - 기대와 다른 응답 구조
    /// * `AppError::ConflictError` - 같은 사용자명이 다른 인증 방식으로 등록됨
    /// * `AppError::DatabaseError` - 저장소 오류 (재시도 없음)
    pub async fn authenticate_with_code(
        &self,
        provider: &AuthProvider,
        auth_code: &str,
    ) -> Result<User, AppError> {
        let config = OAuthClientConfig::for_provider(provider)?;

        let token_response = self.exchange_code_for_token(&config, auth_code).await?;

        let raw_attributes = self
            .get_user_info(&config, &token_response.access_token)
            .await?;

        let attributes = OAuthAttributes::of(
            config.registration_id,
            config.user_name_attribute_key,
            raw_attributes,
        )?;

        log::info!(
            "소셜 로그인 사용자 정보 수신: provider={}, id={}, email={}",
            config.registration_id,
            attributes.id,
            attributes.email
        );

        let resolved_provider = AuthProvider::from_registration_id(config.registration_id);
        self.get_or_create_user(attributes, resolved_provider).await
    }

    /// 콜백으로 돌아온 state 값을 확인합니다.
    pub fn verify_state(&self, state: &str) -> Result<(), AppError> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError(
                "유효하지 않은 OAuth state".to_string(),
            ));
        }

        Ok(())
    }

    async fn exchange_code_for_token(
        &self,
        config: &OAuthClientConfig,
        auth_code: &str,
    ) -> Result<OAuthTokenResponse, AppError> {
        let client = reqwest::Client::new();

        let redirect_uri = config.redirect_uri();
        let params = [
            ("code", auth_code),
            ("client_id", &config.client_id),
            ("client_secret", &config.client_secret),
            ("redirect_uri", &redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = client
            .post(&config.token_uri)
            // GitHub는 Accept 헤더가 없으면 form-encoded로 응답함
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}",
                config.registration_id, error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(
        &self,
        config: &OAuthClientConfig,
        access_token: &str,
    ) -> Result<Map<String, Value>, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(&config.user_info_uri)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            // GitHub API는 User-Agent 헤더를 요구함
            .header(reqwest::header::USER_AGENT, "spa_login_backend")
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("사용자 정보 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: {}",
                config.registration_id, error_text
            )));
        }

        let value = response.json::<Value>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("사용자 정보 파싱 실패: {}", e))
        })?;

        value
            .as_object()
            .cloned()
            .ok_or_else(|| {
                AppError::MalformedProviderPayload("user info is not a JSON object".to_string())
            })
    }

    /// 정규화된 속성으로 사용자를 조회하거나 새로 생성합니다.
    ///
    /// 중복 제거 키는 `(username=email, provider)` 입니다. 프로바이더가
    /// 이메일을 주지 않으면 사용자명이 빈 문자열이 되어 서로 다른 소셜
    /// 계정이 충돌할 수 있습니다 — 이 경우를 대비해 프로바이더 고유
    /// 식별자를 `oauth_data`에 함께 보관합니다.
    async fn get_or_create_user(
        &self,
        attributes: OAuthAttributes,
        provider: AuthProvider,
    ) -> Result<User, AppError> {
        let username = attributes.email.clone();

        match self.user_repo.find_by_username(&username).await? {
            Some(existing_user) => {
                if existing_user.auth_provider == provider {
                    log::info!("기존 소셜 사용자 로그인: {}", username);
                    Ok(existing_user)
                } else {
                    Err(AppError::ConflictError(
                        "이미 해당 사용자명으로 다른 인증 방식에 등록된 계정이 있습니다"
                            .to_string(),
                    ))
                }
            }
            None => {
                log::info!("새 소셜 사용자 등록: {} ({})", username, provider.as_str());

                let oauth_data = OAuthData {
                    provider_user_id: attributes.id,
                    display_name: attributes.name,
                    provider_profile_image: if attributes.picture.is_empty() {
                        None
                    } else {
                        Some(attributes.picture)
                    },
                };

                let user = User::new_oauth(username, provider, oauth_data);
                self.user_repo.create(user).await
            }
        }
    }

    fn generate_state(&self) -> Result<String, AppError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        let state_data = format!("{}:{}", timestamp, OAuthConfig::state_secret());

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        state_data.hash(&mut hasher);

        Ok(format!("{:x}", hasher.finish()))
    }
}
