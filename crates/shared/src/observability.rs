//! # トレーシング初期化
//!
//! `RUST_LOG` 未設定時は [`DEFAULT_DIRECTIVES`] を使い、サービス・インフラ層と
//! `TraceLayer` のリクエストログを debug で出す。
//! 出力形式は `LOG_FORMAT`（`json` / それ以外は pretty）で切り替える。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_DIRECTIVES: &str = "info,worklog_service=debug,worklog_infra=debug,tower_http=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（本番）
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` も登録するので、`InfraError` の SpanTrace に
/// リポジトリのスパンが記録される。
#[cfg(feature = "observability")]
pub fn init_tracing(service: &'static str) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let format = LogFormat::from_value(std::env::var("LOG_FORMAT").ok().as_deref());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(service, ?format, "トレーシングを初期化しました");
}
