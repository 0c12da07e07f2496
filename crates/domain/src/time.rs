//! # 時刻と労働時間の計算
//!
//! `HH:MM` 形式の時刻を深夜 0 時からの経過分に変換し、
//! 開始・終了・休憩から正味労働時間を導出する。
//!
//! ## 計算式
//!
//! ```text
//! 経過時間 [h] = (終了 [分] - 開始 [分]) / 60
//! 休憩時間 [h] = 休憩 [分] / 60
//! 正味時間 [h] = 経過時間 - 休憩時間
//! ```
//!
//! 正味時間は休憩が経過時間を上回ると負になる。これは入力の不整合として
//! そのまま保存する（ガードしない）。

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::DomainError;

/// 開始時刻が終了時刻以降の場合のメッセージ
pub const START_AFTER_END_MESSAGE: &str = "Arbeitsbeginn darf nicht später als Arbeitsende sein.";

/// `HH:MM` を深夜 0 時からの経過分に変換する
///
/// `:` で分割し、時・分をそれぞれ 10 進整数として解釈する。
/// 第 3 要素（秒）は数字であれば無視する（`<input type="time">` の `HH:MM:SS` 対策）。
///
/// # エラー
///
/// 数字でない要素、時が 23 を超える、分が 59 を超える場合は
/// `DomainError::Validation` を返す。
///
/// # 例
///
/// ```rust
/// use worklog_domain::time::parse_time_to_minutes;
///
/// assert_eq!(parse_time_to_minutes("08:30").unwrap(), 510);
/// assert!(parse_time_to_minutes("8h30").is_err());
/// ```
pub fn parse_time_to_minutes(s: &str) -> Result<u32, DomainError> {
    let invalid = || DomainError::Validation(format!("Ungültige Uhrzeit: {s:?} (erwartet HH:MM)."));

    let mut parts = s.trim().split(':');
    let hours = parts.next().and_then(parse_digits).ok_or_else(invalid)?;
    let minutes = parts.next().and_then(parse_digits).ok_or_else(invalid)?;
    if let Some(seconds) = parts.next() {
        parse_digits(seconds).filter(|s| *s < 60).ok_or_else(invalid)?;
    }
    if parts.next().is_some() || hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// 1〜2 桁の数字列だけを受け付ける
fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// 時刻（値オブジェクト）
///
/// 深夜 0 時からの経過分（0〜1439）を保持する。
/// 表示・JSON では `HH:MM` 形式になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// `HH:MM` 文字列から作成する
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        parse_time_to_minutes(s).map(Self)
    }

    /// DB の `TIME` 値から作成する（秒以下は切り捨て）
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }

    /// 深夜 0 時からの経過分
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0
    }

    /// DB の `TIME` 列にバインドするための値（内部値は常に 0〜1439）
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.0 / 60, self.0 % 60, 0).unwrap_or_default()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 開始から終了までの経過時間（時間単位）
///
/// `(終了 - 開始) / 60`。開始が終了以降なら 0 以下になるため、
/// 前後関係の検証は [`WorkSpan::new`] が担う。
pub fn compute_net_hours(start: ClockTime, end: ClockTime) -> f64 {
    let diff = i64::from(end.minutes_since_midnight()) - i64::from(start.minutes_since_midnight());
    diff as f64 / 60.0
}

/// 1 日の勤務区間（開始・終了・休憩）
///
/// 生成時に `start < end` を保証する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkSpan {
    start:         ClockTime,
    end:           ClockTime,
    break_minutes: i64,
}

impl WorkSpan {
    /// 勤務区間を作成する
    ///
    /// # エラー
    ///
    /// `start >= end` の場合は `DomainError::Validation` を返す。
    pub fn new(start: ClockTime, end: ClockTime, break_minutes: i64) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::Validation(START_AFTER_END_MESSAGE.to_string()));
        }
        Ok(Self {
            start,
            end,
            break_minutes,
        })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// 休憩時間（時間単位）
    pub fn break_hours(&self) -> f64 {
        self.break_minutes as f64 / 60.0
    }

    /// 正味労働時間 = 経過時間 - 休憩時間
    pub fn net_hours(&self) -> f64 {
        compute_net_hours(self.start, self.end) - self.break_hours()
    }
}
