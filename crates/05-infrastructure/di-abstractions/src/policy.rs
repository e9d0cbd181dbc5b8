//! 冲突策略抽象接口

use registration_common::{RegistrationResult, TypeInfo};
use serde::Deserialize;
use std::sync::Arc;

/// 冲突策略 trait
///
/// 在任何回调执行之前，对每个分组检查一次。
pub trait ConflictPolicy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 检查分组是否允许分派
    fn check(
        &self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
    ) -> RegistrationResult<()>;
}

/// 注册模式，选择内置冲突策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// 每个封闭服务类型只允许一个实现
    #[default]
    #[serde(alias = "single")]
    SingleImplementation,
    /// 允许多个实现，冲突交由回调处理
    #[serde(alias = "multiple")]
    AllowMultiple,
}
