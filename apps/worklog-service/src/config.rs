//! # Worklog Service 設定
//!
//! 環境変数からサーバーの設定を読み込む。

use std::{env, fmt};

use anyhow::Context as _;

/// 管理者パスワードの既定値
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Worklog Service サーバーの設定
#[derive(Clone)]
pub struct WorklogConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// データベース接続 URL
   pub database_url: String,
   /// Redis 接続 URL
   pub redis_url: String,
   /// 管理者ログイン・一括削除に使う共有パスワード（平文）
   pub admin_password: String,
   /// セッション Cookie に `Secure` を付与するか（`ENV=production`）
   pub secure_cookies: bool,
}

impl WorklogConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> anyhow::Result<Self> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// キーから値を引く関数で設定を組み立てる
   fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
      let port = match lookup("PORT") {
         Some(raw) => raw
            .parse()
            .with_context(|| format!("PORT は有効なポート番号である必要があります: {raw:?}"))?,
         None => 3000,
      };

      Ok(Self {
         host: lookup("WORKLOG_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port,
         database_url: lookup("DATABASE_URL").context("DATABASE_URL が設定されていません")?,
         redis_url: lookup("REDIS_URL").context("REDIS_URL が設定されていません")?,
         admin_password: lookup("ADMIN_PASSWORD")
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
         secure_cookies: lookup("ENV").as_deref() == Some("production"),
      })
   }
}

impl fmt::Debug for WorklogConfig {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("WorklogConfig")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("database_url", &"[REDACTED]")
         .field("redis_url", &self.redis_url)
         .field("admin_password", &"[REDACTED]")
         .field("secure_cookies", &self.secure_cookies)
         .finish()
   }
}

#[cfg(test)]
mod tests {
   // テスト間で環境変数の競合を避けるため、from_lookup で検証する

   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
      let map: HashMap<String, String> = pairs
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      move |key| map.get(key).cloned()
   }

   const REQUIRED: [(&str, &str); 2] = [
      ("DATABASE_URL", "postgres://localhost/worklog"),
      ("REDIS_URL", "redis://localhost:6379"),
   ];

   #[test]
   fn test_必須項目のみで既定値が使われる() {
      let config = WorklogConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

      assert_eq!(config.host, "0.0.0.0");
      assert_eq!(config.port, 3000);
      assert_eq!(config.admin_password, "admin");
      assert!(!config.secure_cookies);
   }

   #[test]
   fn test_env_productionでsecure_cookieが有効になる() {
      let mut pairs = REQUIRED.to_vec();
      pairs.push(("ENV", "production"));
      pairs.push(("PORT", "8080"));

      let config = WorklogConfig::from_lookup(lookup_from(&pairs)).unwrap();

      assert!(config.secure_cookies);
      assert_eq!(config.port, 8080);
   }

   #[test]
   fn test_database_url未設定はエラーになる() {
      let err = WorklogConfig::from_lookup(lookup_from(&[("REDIS_URL", "redis://x")])).unwrap_err();
      assert!(err.to_string().contains("DATABASE_URL"));
   }

   #[test]
   fn test_不正なポートはエラーになる() {
      let mut pairs = REQUIRED.to_vec();
      pairs.push(("PORT", "abc"));

      assert!(WorklogConfig::from_lookup(lookup_from(&pairs)).is_err());
   }

   #[test]
   fn test_debug出力でパスワードが伏せられる() {
      let mut pairs = REQUIRED.to_vec();
      pairs.push(("ADMIN_PASSWORD", "geheim"));

      let config = WorklogConfig::from_lookup(lookup_from(&pairs)).unwrap();

      assert!(!format!("{config:?}").contains("geheim"));
   }
}
