//! リクエスト値の寛容な解釈
//!
//! フォームから届く値は型が揃っていない。数値は JSON の数値と文字列の
//! どちらでも受け付け、それ以外の JSON 値も拒否せずに受け取ってから
//! 項目ごとの規則で解釈する。

use serde::Deserialize;
use serde_json::Value;

/// フォーム項目の値
///
/// `null` は `Option` 側で `None` になるため、ここには現れない。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
   Number(f64),
   Text(String),
   /// 真偽値・配列・オブジェクト
   Other(Value),
}

impl FormValue {
   /// 先頭の整数部分を取り出す（`"30min"` → 30、`"abc"` → `None`）
   ///
   /// 小数は 0 方向に切り捨てる。
   pub fn leading_integer(&self) -> Option<i64> {
      match self {
         Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
         Self::Text(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.as_bytes().first() {
               Some(b'-') => (-1, &s[1..]),
               Some(b'+') => (1, &s[1..]),
               _ => (1, s),
            };
            let end = digits
               .find(|c: char| !c.is_ascii_digit())
               .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
         }
         _ => None,
      }
   }

   /// 実数として解釈する
   pub fn as_f64(&self) -> Option<f64> {
      let value = match self {
         Self::Number(n) => Some(*n),
         Self::Text(s) => s.trim().parse::<f64>().ok(),
         Self::Other(_) => None,
      };
      value.filter(|n| n.is_finite())
   }

   /// ストア採番 ID として解釈する
   pub fn as_id(&self) -> Option<i32> {
      match self {
         Self::Number(n) if n.fract() == 0.0 => i32::try_from(*n as i64).ok(),
         Self::Text(s) => s.trim().parse::<i32>().ok(),
         _ => None,
      }
   }

   /// 文字列のときだけ中身を返す
   pub fn as_text(&self) -> Option<&str> {
      match self {
         Self::Text(s) => Some(s),
         _ => None,
      }
   }

   /// 自由記述欄として保存する文字列に変換する（`5` → `"5"`、`true` → `"true"`）
   pub fn into_text(self) -> String {
      match self {
         Self::Number(n) => n.to_string(),
         Self::Text(s) => s,
         Self::Other(v) => v.to_string(),
      }
   }
}

/// 休憩時間（分）。解釈できなければ 0
pub fn break_minutes(value: Option<&FormValue>) -> i64 {
   value.and_then(FormValue::leading_integer).unwrap_or(0)
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn parse(json: &str) -> FormValue {
      serde_json::from_str(json).unwrap()
   }

   #[rstest]
   #[case("30", Some(30))]
   #[case("\"45\"", Some(45))]
   #[case("\" 15min\"", Some(15))]
   #[case("\"-10\"", Some(-10))]
   #[case("12.9", Some(12))]
   #[case("\"abc\"", None)]
   #[case("\"\"", None)]
   #[case("true", None)]
   #[case("[30]", None)]
   fn test_先頭の整数部分を取り出す(#[case] json: &str, #[case] expected: Option<i64>) {
      assert_eq!(parse(json).leading_integer(), expected);
   }

   #[rstest]
   #[case(None, 0)]
   #[case(Some("\"x\""), 0)]
   #[case(Some("true"), 0)]
   #[case(Some("{\"min\":30}"), 0)]
   #[case(Some("30"), 30)]
   fn test_休憩時間は未指定や解釈不能なら0になる(#[case] json: Option<&str>, #[case] expected: i64) {
      let value = json.map(parse);
      assert_eq!(break_minutes(value.as_ref()), expected);
   }

   #[rstest]
   #[case("7.5", Some(7.5))]
   #[case("\"6\"", Some(6.0))]
   #[case("\"acht\"", None)]
   #[case("false", None)]
   fn test_実数として解釈する(#[case] json: &str, #[case] expected: Option<f64>) {
      assert_eq!(parse(json).as_f64(), expected);
   }

   #[rstest]
   #[case("3", Some(3))]
   #[case("\"12\"", Some(12))]
   #[case("1.5", None)]
   #[case("\"x\"", None)]
   fn test_idとして解釈する(#[case] json: &str, #[case] expected: Option<i32>) {
      assert_eq!(parse(json).as_id(), expected);
   }

   #[test]
   fn test_文字列以外はパスワードとして扱わない() {
      assert_eq!(parse("\"geheim\"").as_text(), Some("geheim"));
      assert_eq!(parse("123").as_text(), None);
      assert_eq!(parse("true").as_text(), None);
   }

   #[rstest]
   #[case("\"Inventur\"", "Inventur")]
   #[case("5", "5")]
   #[case("7.5", "7.5")]
   #[case("true", "true")]
   fn test_自由記述欄は文字列に変換する(#[case] json: &str, #[case] expected: &str) {
      assert_eq!(parse(json).into_text(), expected);
   }
}
