//! # 曜日ごとの所定労働時間
//!
//! 従業員ごとに月曜〜金曜の所定労働時間（Soll）を持つ。
//! 曜日による分岐を文字列キーで書き分けず、[`Workday`] で添字付けした
//! 固定長配列として保持する。
//!
//! 土曜・日曜の所定労働時間は常に 0。

use chrono::{Datelike, NaiveDate, Weekday};
use strum::{EnumIter, IntoStaticStr};

/// 所定労働時間を持つ平日
///
/// `IntoStaticStr` の値は DB 列名の接頭辞（`mo_hours` の `mo`）に一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Workday {
    #[strum(serialize = "mo")]
    Monday,
    #[strum(serialize = "di")]
    Tuesday,
    #[strum(serialize = "mi")]
    Wednesday,
    #[strum(serialize = "do")]
    Thursday,
    #[strum(serialize = "fr")]
    Friday,
}

impl Workday {
    /// 暦の曜日から平日を求める（土日は `None`）
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Self::Monday),
            Weekday::Tue => Some(Self::Tuesday),
            Weekday::Wed => Some(Self::Wednesday),
            Weekday::Thu => Some(Self::Thursday),
            Weekday::Fri => Some(Self::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// 配列上の位置（月曜 = 0）
    fn index(self) -> usize {
        self as usize
    }
}

/// 週の所定労働時間（値オブジェクト）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeeklySchedule {
    hours: [f64; 5],
}

impl WeeklySchedule {
    /// 月曜〜金曜の順に所定労働時間を指定して作成する
    pub fn new(hours: [f64; 5]) -> Self {
        Self { hours }
    }

    /// 未指定（`None`）を 0 として作成する
    ///
    /// DB の NULL や、リクエストで省略された曜日に使う。
    pub fn from_optional(hours: [Option<f64>; 5]) -> Self {
        Self {
            hours: hours.map(|h| h.unwrap_or(0.0)),
        }
    }

    /// 指定した平日の所定労働時間
    pub fn hours_for(&self, day: Workday) -> f64 {
        self.hours[day.index()]
    }

    /// 日付の曜日に対応する所定労働時間（土日は 0）
    pub fn expected_hours_for(&self, date: NaiveDate) -> f64 {
        Workday::from_weekday(date.weekday())
            .map(|day| self.hours_for(day))
            .unwrap_or(0.0)
    }

    /// 月曜〜金曜の順の配列
    pub fn as_array(&self) -> [f64; 5] {
        self.hours
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    fn schedule() -> WeeklySchedule {
        WeeklySchedule::new([8.0, 7.5, 6.0, 5.5, 4.0])
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[rstest]
    #[case("2024-06-03", 8.0)] // 月
    #[case("2024-06-04", 7.5)] // 火
    #[case("2024-06-05", 6.0)] // 水
    #[case("2024-06-06", 5.5)] // 木
    #[case("2024-06-07", 4.0)] // 金
    fn test_平日は曜日に対応する所定時間を返す(#[case] d: &str, #[case] expected: f64) {
        assert_eq!(schedule().expected_hours_for(date(d)), expected);
    }

    #[rstest]
    #[case("2024-06-08")] // 土
    #[case("2024-06-09")] // 日
    #[case("2024-12-29")] // 日
    fn test_土日は所定時間に関係なく0を返す(#[case] d: &str) {
        let all_days = WeeklySchedule::new([9.0; 5]);
        assert_eq!(all_days.expected_hours_for(date(d)), 0.0);
    }

    #[test]
    fn test_水曜日はmi_hoursを返す() {
        let s = WeeklySchedule::new([0.0, 0.0, 3.25, 0.0, 0.0]);
        assert_eq!(s.expected_hours_for(date("2024-06-12")), 3.25);
        assert_eq!(s.hours_for(Workday::Wednesday), 3.25);
    }

    #[test]
    fn test_未指定の曜日は0になる() {
        let s = WeeklySchedule::from_optional([Some(8.0), None, Some(6.0), None, None]);
        assert_eq!(s.as_array(), [8.0, 0.0, 6.0, 0.0, 0.0]);
    }

    #[test]
    fn test_曜日コードは列名の接頭辞に一致する() {
        let codes: Vec<&'static str> = Workday::iter().map(Into::into).collect();
        assert_eq!(codes, vec!["mo", "di", "mi", "do", "fr"]);
    }

    #[test]
    fn test_from_weekdayは土日をnoneにする() {
        assert_eq!(Workday::from_weekday(Weekday::Sat), None);
        assert_eq!(Workday::from_weekday(Weekday::Sun), None);
        assert_eq!(Workday::from_weekday(Weekday::Thu), Some(Workday::Thursday));
    }
}
