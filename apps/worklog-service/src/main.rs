//! # Worklog Service サーバー
//!
//! 従業員の勤務時間を記録し、管理者が閲覧・修正・CSV 出力・名簿管理を行う
//! HTTP サーバー。
//!
//! ## 起動手順
//!
//! 1. `.env` と環境変数の読み込み
//! 2. トレーシング初期化
//! 3. PostgreSQL 接続とマイグレーション
//! 4. Redis セッションストア接続
//! 5. ルーターの構築と HTTP サーバーの起動
//!
//! ## 環境変数
//!
//! | 変数 | 必須 | 既定値 |
//! |------|------|--------|
//! | `WORKLOG_HOST` | no | `0.0.0.0` |
//! | `PORT` | no | `3000` |
//! | `DATABASE_URL` | yes | - |
//! | `REDIS_URL` | yes | - |
//! | `ADMIN_PASSWORD` | no | `admin` |
//! | `LOG_FORMAT` | no | `pretty` |
//! | `ENV` | no | `production` で Cookie に `Secure` を付与 |

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use tokio::net::TcpListener;
use worklog_infra::{
   RedisSessionManager,
   db,
   repository::{PostgresEmployeeRepository, PostgresWorkHoursRepository},
};
use worklog_service::{
   app_builder::{AppDependencies, build_app},
   config::WorklogConfig,
};
use worklog_shared::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing("worklog-service");

   let config = WorklogConfig::from_env().context("設定の読み込みに失敗しました")?;
   tracing::info!(?config, "Worklog Service サーバーを起動します");

   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   db::run_migrations(&pool)
      .await
      .context("マイグレーションに失敗しました")?;
   tracing::info!("データベースに接続しました");

   let session_manager = RedisSessionManager::new(&config.redis_url)
      .await
      .context("Redis への接続に失敗しました")?;
   tracing::info!("Redis に接続しました");

   let app = build_app(
      &config,
      AppDependencies {
         work_hours_repository: Arc::new(PostgresWorkHoursRepository::new(pool.clone())),
         employee_repository:   Arc::new(PostgresEmployeeRepository::new(pool)),
         session_manager:       Arc::new(session_manager),
      },
   );

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .with_context(|| format!("バインドアドレスが不正です: {}:{}", config.host, config.port))?;
   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("Worklog Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await.context("サーバーが異常終了しました")?;

   Ok(())
}
