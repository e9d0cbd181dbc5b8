//! 候选类型可访问性过滤选项

use crate::errors::RegistrationError;
use crate::metadata::Visibility;
use std::fmt;
use std::str::FromStr;

/// 可访问性选项
///
/// 由候选类型来源在候选进入注册引擎之前应用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessibilityOption {
    /// 所有类型
    #[default]
    AllTypes,
    /// 仅公开类型
    PublicOnly,
}

impl AccessibilityOption {
    /// 检查指定可见性的类型是否被此选项接受
    pub fn admits(self, visibility: Visibility) -> bool {
        match self {
            Self::AllTypes => true,
            Self::PublicOnly => visibility == Visibility::Public,
        }
    }
}

impl FromStr for AccessibilityOption {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_types" | "alltypes" => Ok(Self::AllTypes),
            "public" | "public_only" | "publiconly" => Ok(Self::PublicOnly),
            _ => Err(RegistrationError::InvalidAccessibilityOption {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for AccessibilityOption {
    type Error = RegistrationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::AllTypes),
            1 => Ok(Self::PublicOnly),
            other => Err(RegistrationError::InvalidAccessibilityOption {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccessibilityOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTypes => f.write_str("all_types"),
            Self::PublicOnly => f.write_str("public_only"),
        }
    }
}
