//! 注册回调抽象接口

use registration_common::{RegistrationResult, TypeInfo};
use std::sync::Arc;

/// 注册回调 trait
///
/// 每个解析出的分组调用一次，参数为封闭服务类型和按候选顺序排列的实现列表。
/// 返回错误会中止剩余分组的分派。
pub trait Registrar {
    /// 注册一个封闭服务类型及其实现
    fn register(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
    ) -> RegistrationResult<()>;
}

impl<F> Registrar for F
where
    F: FnMut(&Arc<TypeInfo>, &[Arc<TypeInfo>]) -> RegistrationResult<()>,
{
    fn register(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
    ) -> RegistrationResult<()> {
        self(service_type, implementations)
    }
}
