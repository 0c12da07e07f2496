//! # アクセスレベル
//!
//! セッションごとの権限状態。`Anonymous → Admin` の遷移はログインでのみ起き、
//! 逆方向の遷移はセッションの期限切れのみ。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 管理者権限が無い場合のメッセージ
pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Admin privileges required.";

/// セッションの権限状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Anonymous,
    Admin,
}

impl AccessLevel {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// 管理者でなければ `Forbidden` を返す
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(ADMIN_REQUIRED_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_既定値は匿名() {
        assert_eq!(AccessLevel::default(), AccessLevel::Anonymous);
    }

    #[test]
    fn test_管理者はrequire_adminを通過する() {
        assert!(AccessLevel::Admin.require_admin().is_ok());
    }

    #[test]
    fn test_匿名はrequire_adminでforbiddenになる() {
        let err = AccessLevel::Anonymous.require_admin().unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(msg) if msg == ADMIN_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_snake_caseでシリアライズされる() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::Admin).unwrap(),
            "\"admin\""
        );
    }
}
