//! 外部容器注册接口

use registration_common::{Lifetime, RegistrationResult, TypeInfo};
use std::sync::Arc;

/// 服务注册表 trait
///
/// 由外部注入容器实现，负责真正的绑定与生命周期存储。
pub trait ServiceRegistry {
    /// 将单个实现注册到封闭服务类型
    fn register(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementation: &Arc<TypeInfo>,
        lifetime: Lifetime,
    ) -> RegistrationResult<()>;

    /// 将一组实现作为集合注册到封闭服务类型
    fn register_collection(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
        lifetime: Lifetime,
    ) -> RegistrationResult<()>;

    /// 检查服务类型是否已注册
    fn is_registered(&self, service_type: &TypeInfo) -> bool;
}
