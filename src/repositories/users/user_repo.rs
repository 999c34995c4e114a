//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. MongoDB를 주 저장소로
//! 사용하고, Redis를 통한 read-through 캐싱을 지원합니다.
//!
//! 인증 서브시스템은 이 리포지토리를 좁은 협력자 인터페이스로만
//! 사용합니다: `find_by_username` / `exists_by_username` / `create` /
//! `find_by_id`. 저장소 오류는 재시도 없이 그대로 전파되어 로그인
//! 실패로 이어집니다.
//!
//! ## 캐싱 전략
//!
//! - 개별 사용자: `user:{user_id}` (TTL 10분)
//! - 사용자명 조회: `user:username:{username}` (TTL 10분)
//! - 데이터 변경 시 관련 키 무효화

use std::sync::Arc;

use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
    errors::errors::AppError,
};

/// 사용자 데이터 액세스 리포지토리
///
/// `users` 컬렉션에 대한 조회/생성 연산을 담당하며,
/// 사용자명 유니크 제약을 관리합니다.
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (자동 주입)
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만
    /// 반환됩니다. 캐시 우선 조회를 수행합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 사용자명의 사용자가 없는 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let cache_key = format!("user:username:{}", username);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시에 저장 (10분)
        if let Some(ref user) = user {
            let _ = self.redis.set_with_expiry(&cache_key, user, 600).await;
        }

        Ok(user)
    }

    /// 사용자명 존재 여부 확인
    pub async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// ID로 사용자 조회
    ///
    /// 가장 빈번한 조회 패턴이므로 캐싱을 적용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis.set_with_expiry(&cache_key, user, 600).await;
        }

        Ok(user)
    }

    /// 새 사용자 생성
    ///
    /// 사용자명 중복을 사전에 검증하고, 성공 시 할당된 ID를 포함한
    /// 사용자를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명 중복
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명입니다".to_string(),
            ));
        }

        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        // 생성 직전의 미스 결과가 캐시에 남지 않도록 무효화
        let _ = self
            .redis
            .del(&format!("user:username:{}", user.username))
            .await;

        Ok(user)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자명 유니크 인덱스를 생성하여 중복 가입을 저장소 수준에서도
    /// 차단합니다. 애플리케이션 초기화 시점에 한 번 실행합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        collection
            .create_indexes([username_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
