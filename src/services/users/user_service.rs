//! 사용자 서비스 구현
//!
//! 로컬(비밀번호) 인증 사용자의 등록과 자격 증명 검증을 담당합니다.

use std::sync::Arc;

use bcrypt::hash;
use singleton_macro::service;

use crate::{
    config::PasswordConfig,
    domain::dto::users::request::SignupRequest,
    domain::dto::users::response::UserResponse,
    domain::entities::users::user::User,
    errors::errors::AppError,
    repositories::users::user_repo::UserRepository,
};

/// 사용자 등록 및 인증 서비스
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 로컬 사용자를 등록합니다.
    ///
    /// 비밀번호는 bcrypt로 해싱하여 저장하며, 사용자명이 중복되면
    /// 어떤 레코드도 생성하지 않고 실패합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명 중복
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn create_user(&self, request: SignupRequest) -> Result<UserResponse, AppError> {
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let password_hash = hash(&request.password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new_local(request.username, password_hash);

        let created_user = self.user_repo.create(user).await?;

        log::info!("새 사용자 등록: {}", created_user.username);

        Ok(UserResponse::from(created_user))
    }

    /// 사용자명과 비밀번호로 사용자를 인증합니다.
    ///
    /// 사용자명이 존재하지 않는 경우와 비밀번호가 틀린 경우 모두
    /// 동일한 "Login failed" 에러를 반환하여, 사용자명 존재 여부를
    /// 노출하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 증명 불일치
    pub async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let login_failed = || AppError::AuthenticationError("Login failed".to_string());

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(login_failed)?;

        // 소셜 로그인 계정은 비밀번호 인증 불가
        if !user.can_authenticate_with_password() {
            return Err(login_failed());
        }

        let password_hash = user
            .password_hash
            .as_ref()
            .ok_or_else(login_failed)?;

        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            return Err(login_failed());
        }

        Ok(user)
    }
}
