//! Redis 캐시 클라이언트
//!
//! JSON 직렬화 기반의 얇은 Redis 래퍼입니다. 리포지토리 계층의
//! read-through 캐싱에 사용됩니다.

use std::env;

use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

/// Redis 캐시 클라이언트
///
/// 멀티플렉싱을 지원하는 Redis 클라이언트로, 단일 TCP 연결에서
/// 여러 동시 요청을 처리할 수 있습니다.
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 서버 주소를 읽으며, 미설정 시
    /// `redis://localhost:6379`를 사용합니다. 생성 시 PING으로
    /// 연결 상태를 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 지정된 키에서 값을 조회합니다.
    ///
    /// JSON으로 직렬화된 데이터를 자동으로 역직렬화하여 반환합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// * `Ok(None)` - 키가 존재하지 않음
    /// * `Err(RedisError)` - Redis 오류 또는 역직렬화 실패
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization failed",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 만료 시간과 함께 값을 저장합니다.
    ///
    /// # Arguments
    ///
    /// * `key` - 저장할 Redis 키
    /// * `value` - 저장할 값 (JSON으로 직렬화됨)
    /// * `seconds` - TTL (초 단위)
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: usize,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization failed",
                e.to_string(),
            ))
        })?;
        conn.set_ex(key, json, seconds as u64).await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리됩니다. 데이터 변경 후 캐시 무효화에
    /// 사용됩니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: u64 = conn.del(key).await?;
        Ok(())
    }

    /// 패턴과 일치하는 모든 키를 조회합니다.
    ///
    /// 패턴 기반 캐시 무효화에 사용됩니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys)
    }

    /// 여러 키를 한 번에 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리됩니다. 패턴 기반 캐시 무효화에
    /// 사용됩니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: u64 = conn.del(keys).await?;
        Ok(())
    }
}
