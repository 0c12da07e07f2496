//! # インフラ層エラー定義
//!
//! 失敗したストアごとに種別を分け、呼び出し側がログの分類に使えるようにする。
//! どの種別も生成時点の [`SpanTrace`] を保持する。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// クエリ対象のテーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Table {
    #[display("work_hours")]
    WorkHours,
    #[display("employees")]
    Employees,
}

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// PostgreSQL へのクエリ失敗（接続・プール取得のタイムアウトを含む）
    #[error("{table} へのクエリに失敗しました: {source}")]
    Query {
        table:  Table,
        #[source]
        source: sqlx::Error,
    },

    /// Redis セッションストアとの通信失敗
    #[error("セッションストアに接続できません: {0}")]
    SessionStore(#[source] redis::RedisError),

    /// 保存済みセッション値を読み書きできない
    #[error("セッションデータが不正です: {0}")]
    SessionPayload(#[source] serde_json::Error),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// セッションストア側の失敗かどうか
    pub fn is_session(&self) -> bool {
        matches!(
            self.kind,
            InfraErrorKind::SessionStore(_) | InfraErrorKind::SessionPayload(_)
        )
    }

    /// `map_err` に渡すクエリ失敗の変換関数を返す
    ///
    /// ```rust,ignore
    /// sqlx::query("DELETE FROM work_hours")
    ///     .execute(&pool)
    ///     .await
    ///     .map_err(InfraError::query(Table::WorkHours))?;
    /// ```
    pub fn query(table: Table) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self {
            kind:       InfraErrorKind::Query { table, source },
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<redis::RedisError> for InfraError {
    fn from(source: redis::RedisError) -> Self {
        Self {
            kind:       InfraErrorKind::SessionStore(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind:       InfraErrorKind::SessionPayload(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    fn connection_refused() -> redis::RedisError {
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "接続拒否").into()
    }

    #[test]
    fn test_クエリ失敗はテーブル名を保持しspan_traceをキャプチャする() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("work_hours_repo");
        let _enter = span.enter();

        let err = InfraError::query(Table::WorkHours)(sqlx::Error::RowNotFound);

        assert!(matches!(
            err.kind(),
            InfraErrorKind::Query { table: Table::WorkHours, .. }
        ));
        assert!(err.to_string().starts_with("work_hours へのクエリに失敗しました"));
        assert!(format!("{}", err.span_trace()).contains("work_hours_repo"));
        assert!(!err.is_session());
    }

    #[test]
    fn test_redisとjsonのエラーはセッション種別になる() {
        let store: InfraError = connection_refused().into();
        let payload: InfraError = serde_json::from_str::<String>("{").unwrap_err().into();

        assert!(matches!(store.kind(), InfraErrorKind::SessionStore(_)));
        assert!(matches!(payload.kind(), InfraErrorKind::SessionPayload(_)));
        assert!(store.is_session());
        assert!(payload.is_session());
    }

    #[test]
    fn test_sourceが元のエラーを返す() {
        use std::error::Error;

        let err = InfraError::query(Table::Employees)(sqlx::Error::PoolTimedOut);

        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some(sqlx::Error::PoolTimedOut.to_string())
        );
    }
}
