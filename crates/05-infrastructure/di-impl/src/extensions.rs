//! 批量注册便捷入口
//!
//! 容器入口使用单一实现策略，并以瞬时或单例生命周期转交给 [`ServiceRegistry`]；
//! 回调入口使用允许多实现策略，把冲突处理留给调用方。

use crate::batch::OpenGenericBatch;
use crate::dispatch::DispatchSummary;
use di_abstractions::{CandidateSource, Registrar, RegistrationMode, ServiceRegistry};
use registration_common::{AccessibilityOption, Lifetime, RegistrationResult, TypeInfo};
use std::sync::Arc;

/// 把分组转交给外部容器的默认回调
pub struct ContainerRegistrar<'r, R: ?Sized> {
    registry: &'r mut R,
    lifetime: Lifetime,
    as_collection: bool,
}

impl<'r, R: ServiceRegistry + ?Sized> ContainerRegistrar<'r, R> {
    /// 每个分组注册为单个实现
    pub fn single(registry: &'r mut R, lifetime: Lifetime) -> Self {
        Self {
            registry,
            lifetime,
            as_collection: false,
        }
    }

    /// 每个分组注册为实现集合
    pub fn collection(registry: &'r mut R, lifetime: Lifetime) -> Self {
        Self {
            registry,
            lifetime,
            as_collection: true,
        }
    }
}

impl<R: ServiceRegistry + ?Sized> Registrar for ContainerRegistrar<'_, R> {
    fn register(
        &mut self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
    ) -> RegistrationResult<()> {
        match implementations {
            [implementation] if !self.as_collection => {
                self.registry.register(service_type, implementation, self.lifetime)
            }
            _ => self
                .registry
                .register_collection(service_type, implementations, self.lifetime),
        }
    }
}

/// 开放泛型批量注册扩展
pub trait OpenGenericRegistrationExt: ServiceRegistry {
    /// 扫描来源中的所有类型，以瞬时生命周期注册
    fn register_many_for_open_generic(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        sources: &[&dyn CandidateSource],
    ) -> RegistrationResult<DispatchSummary> {
        self.register_many_for_open_generic_with_accessibility(
            open_generic,
            AccessibilityOption::AllTypes,
            sources,
        )
    }

    /// 扫描来源中满足可访问性的类型，以瞬时生命周期注册
    fn register_many_for_open_generic_with_accessibility(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        accessibility: AccessibilityOption,
        sources: &[&dyn CandidateSource],
    ) -> RegistrationResult<DispatchSummary> {
        OpenGenericBatch::new()
            .open_generic(Arc::clone(open_generic))
            .scan(sources.iter().copied(), accessibility)
            .registrar(ContainerRegistrar::single(self, Lifetime::Transient))
            .execute()
    }

    /// 注册显式给出的类型，以瞬时生命周期注册
    fn register_many_for_open_generic_types(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        types: &[Arc<TypeInfo>],
    ) -> RegistrationResult<DispatchSummary> {
        OpenGenericBatch::new()
            .open_generic(Arc::clone(open_generic))
            .types(types.iter().cloned())
            .registrar(ContainerRegistrar::single(self, Lifetime::Transient))
            .execute()
    }

    /// 扫描来源中的所有类型，以单例生命周期注册
    fn register_single_many_for_open_generic(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        sources: &[&dyn CandidateSource],
    ) -> RegistrationResult<DispatchSummary> {
        self.register_single_many_for_open_generic_with_accessibility(
            open_generic,
            AccessibilityOption::AllTypes,
            sources,
        )
    }

    /// 扫描来源中满足可访问性的类型，以单例生命周期注册
    fn register_single_many_for_open_generic_with_accessibility(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        accessibility: AccessibilityOption,
        sources: &[&dyn CandidateSource],
    ) -> RegistrationResult<DispatchSummary> {
        OpenGenericBatch::new()
            .open_generic(Arc::clone(open_generic))
            .scan(sources.iter().copied(), accessibility)
            .registrar(ContainerRegistrar::single(self, Lifetime::Singleton))
            .execute()
    }

    /// 注册显式给出的类型，以单例生命周期注册
    fn register_single_many_for_open_generic_types(
        &mut self,
        open_generic: &Arc<TypeInfo>,
        types: &[Arc<TypeInfo>],
    ) -> RegistrationResult<DispatchSummary> {
        OpenGenericBatch::new()
            .open_generic(Arc::clone(open_generic))
            .types(types.iter().cloned())
            .registrar(ContainerRegistrar::single(self, Lifetime::Singleton))
            .execute()
    }
}

impl<R: ServiceRegistry + ?Sized> OpenGenericRegistrationExt for R {}

/// 扫描来源，把每个分组的全部实现交给回调
pub fn register_many_for_open_generic_with<'a>(
    open_generic: &Arc<TypeInfo>,
    callback: impl Registrar + 'a,
    accessibility: AccessibilityOption,
    sources: &[&'a dyn CandidateSource],
) -> RegistrationResult<DispatchSummary> {
    OpenGenericBatch::new()
        .open_generic(Arc::clone(open_generic))
        .scan(sources.iter().copied(), accessibility)
        .registrar(callback)
        .mode(RegistrationMode::AllowMultiple)
        .execute()
}

/// 对显式给出的类型分组，把每个分组的全部实现交给回调
pub fn register_many_for_open_generic_types_with(
    open_generic: &Arc<TypeInfo>,
    callback: impl Registrar,
    types: &[Arc<TypeInfo>],
) -> RegistrationResult<DispatchSummary> {
    OpenGenericBatch::new()
        .open_generic(Arc::clone(open_generic))
        .types(types.iter().cloned())
        .registrar(callback)
        .mode(RegistrationMode::AllowMultiple)
        .execute()
}
