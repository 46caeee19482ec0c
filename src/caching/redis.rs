//! # Redis 캐시 클라이언트
//!
//! JSON 직렬화 기반의 얇은 Redis 래퍼입니다.
//! 스토어 단건 조회와 집계 결과(태그 목록, 평점 상위 스토어)를 캐싱하는 데 사용합니다.
//!
//! 연결은 멀티플렉싱된 비동기 연결을 요청마다 가져옵니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use log::info;
use crate::config::DatabaseConfig;

/// Redis 캐시 클라이언트 래퍼
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
/// redis.set_with_expiry("store:slug:cafe", &store, 600).await?;
/// let cached: Option<Store> = redis.get("store:slug:cafe").await?;
/// redis.del("store:slug:cafe").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

fn serialization_error(context: &'static str, e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, context, e.to_string()))
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(DatabaseConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// JSON으로 저장된 값을 역직렬화하여 가져옵니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| serialization_error("Deserialization failed", e)))
            .transpose()
    }

    /// TTL(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(|e| serialization_error("Serialization failed", e))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }
}
