//! # セッション管理
//!
//! Redis を使用したセッション管理を提供する。
//!
//! ## Redis キー設計
//!
//! | キー | 値 | TTL |
//! |-----|-----|-----|
//! | `session:{session_id}` | SessionData (JSON) | 28800秒（8時間） |
//!
//! ログアウトは提供しないため、TTL 経過のみがセッション終了の経路になる。

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use worklog_domain::access::AccessLevel;

use crate::InfraError;

/// セッションの有効期限（秒）
/// 8時間 = 28800秒
pub const SESSION_TTL_SECONDS: u64 = 28800;

/// セッションデータ
///
/// Redis に JSON 形式で保存されるセッション情報。
/// 管理者ログイン成功時に作成される。
/// 有効期限は Redis の TTL で管理する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
   access_level: AccessLevel,
}

impl SessionData {
   pub fn new(access_level: AccessLevel) -> Self {
      Self { access_level }
   }

   pub fn access_level(&self) -> AccessLevel {
      self.access_level
   }
}

/// セッション管理トレイト
#[async_trait]
pub trait SessionManager: Send + Sync {
   /// セッションを作成し、セッション ID（UUID v4）を返す
   async fn create(&self, data: &SessionData) -> Result<String, InfraError>;

   /// セッションを取得する
   ///
   /// 存在しない、または期限切れの場合は `None` を返す。
   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError>;
}

/// Redis を使用したセッションマネージャ
pub struct RedisSessionManager {
   conn: ConnectionManager,
}

impl RedisSessionManager {
   /// 新しい RedisSessionManager を作成する
   ///
   /// # 引数
   ///
   /// - `redis_url`: Redis 接続 URL（例: `redis://localhost:6379`）
   pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
      let client = redis::Client::open(redis_url)?;
      let conn = ConnectionManager::new(client).await?;
      Ok(Self { conn })
   }

   fn session_key(session_id: &str) -> String {
      format!("session:{session_id}")
   }
}

#[async_trait]
impl SessionManager for RedisSessionManager {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn create(&self, data: &SessionData) -> Result<String, InfraError> {
      let session_id = Uuid::new_v4().to_string();
      let key = Self::session_key(&session_id);
      let json = serde_json::to_string(data)?;

      let mut conn = self.conn.clone();
      let _: () = conn.set_ex(&key, json, SESSION_TTL_SECONDS).await?;

      Ok(session_id)
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError> {
      let key = Self::session_key(session_id);
      let mut conn = self.conn.clone();

      let result: Option<String> = conn.get(&key).await?;

      match result {
         Some(json) => {
            let data: SessionData = serde_json::from_str(&json)?;
            Ok(Some(data))
         }
         None => Ok(None),
      }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_セッションキーにidが含まれる() {
      assert_eq!(RedisSessionManager::session_key("abc"), "session:abc");
   }

   #[test]
   fn test_セッションデータはjsonで往復できる() {
      let data = SessionData::new(AccessLevel::Admin);

      let json = serde_json::to_string(&data).unwrap();
      let restored: SessionData = serde_json::from_str(&json).unwrap();

      assert_eq!(restored, data);
      assert_eq!(json, r#"{"access_level":"admin"}"#);
   }

   #[test]
   fn test_未知のフィールドを含むセッション値も読み込める() {
      let json = r#"{"access_level":"admin","created_at":"2024-06-03T08:00:00Z"}"#;

      let data: SessionData = serde_json::from_str(json).unwrap();

      assert_eq!(data.access_level(), AccessLevel::Admin);
   }
}
