//! 内存服务集合
//!
//! [`ServiceRegistry`] 的参考实现，只记录服务描述符，不创建实例。

use di_abstractions::ServiceRegistry;
use registration_common::{Lifetime, RegistrationError, RegistrationResult, TypeInfo};
use std::sync::Arc;
use tracing::info;

/// 服务描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// 封闭服务类型
    pub service_type: Arc<TypeInfo>,
    /// 实现类型，单个注册时只有一项
    pub implementations: Vec<Arc<TypeInfo>>,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 是否为集合注册
    pub is_collection: bool,
}

impl ServiceDescriptor {
    /// 单个注册的实现类型
    pub fn implementation(&self) -> Option<&Arc<TypeInfo>> {
        if self.is_collection {
            None
        } else {
            self.implementations.first()
        }
    }
}

/// 内存服务集合
///
/// 按注册顺序保存描述符；同一封闭服务类型不允许重复注册。
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    /// 创建新的服务集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有描述符，按注册顺序
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// 查找服务类型的描述符
    pub fn get(&self, service_type: &TypeInfo) -> Option<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.service_type.as_ref() == service_type)
    }

    /// 已注册的服务数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 清空所有注册
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }

    fn insert(&mut self, descriptor: ServiceDescriptor) -> RegistrationResult<()> {
        if self.is_registered(&descriptor.service_type) {
            return Err(RegistrationError::registrar_failed(
                descriptor.service_type.to_string(),
                "服务类型已注册，不允许覆盖",
            ));
        }

        info!(
            "注册服务: {} ({}, {} 个实现)",
            descriptor.service_type,
            descriptor.lifetime,
            descriptor.implementations.len()
        );
        self.descriptors.push(descriptor);
        Ok(())
    }
}

impl ServiceRegistry for ServiceCollection {
    fn register(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementation: &Arc<TypeInfo>,
        lifetime: Lifetime,
    ) -> RegistrationResult<()> {
        self.insert(ServiceDescriptor {
            service_type: Arc::clone(service_type),
            implementations: vec![Arc::clone(implementation)],
            lifetime,
            is_collection: false,
        })
    }

    fn register_collection(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
        lifetime: Lifetime,
    ) -> RegistrationResult<()> {
        self.insert(ServiceDescriptor {
            service_type: Arc::clone(service_type),
            implementations: implementations.to_vec(),
            lifetime,
            is_collection: true,
        })
    }

    fn is_registered(&self, service_type: &TypeInfo) -> bool {
        self.get(service_type).is_some()
    }
}
