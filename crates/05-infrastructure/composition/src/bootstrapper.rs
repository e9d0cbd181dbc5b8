//! 注册启动器
//!
//! 按配置声明顺序，把每个开放泛型注册应用到服务注册表。第一个失败的注册终止启动，
//! 之前已完成的注册保留在注册表中。

use crate::logging::init_logging;
use crate::settings::{OpenGenericRegistrationSettings, RegistrationSettings};
use di_abstractions::{CandidateSource, RegistrationMode, ServiceRegistry};
use di_impl::{CancellationToken, ContainerRegistrar, DispatchSummary, OpenGenericBatch, TypeCatalog};
use registration_common::{
    AccessibilityOption, ConfigError, InfrastructureResult, RegistrationError, TypeInfo,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 单个注册的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// 开放泛型服务定义
    pub service: Arc<TypeInfo>,
    /// 分派统计
    pub summary: DispatchSummary,
}

/// 启动报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// 按执行顺序排列的注册结果
    pub outcomes: Vec<RegistrationOutcome>,
}

impl BootstrapReport {
    /// 已注册的封闭服务类型总数
    pub fn total_groups(&self) -> usize {
        self.outcomes.iter().map(|o| o.summary.groups).sum()
    }
}

/// 注册启动器
///
/// 类型目录既用于解析配置中的类型名称，也是未额外指定来源时的扫描来源。
pub struct RegistrationBootstrapper<'c> {
    catalog: &'c TypeCatalog,
    sources: Vec<&'c dyn CandidateSource>,
    cancellation: Option<CancellationToken>,
    logging_enabled: bool,
}

impl<'c> RegistrationBootstrapper<'c> {
    /// 创建新的注册启动器
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        Self {
            catalog,
            sources: Vec::new(),
            cancellation: None,
            logging_enabled: false,
        }
    }

    /// 添加扫描来源，替代默认的类型目录
    pub fn with_source(mut self, source: &'c dyn CandidateSource) -> Self {
        self.sources.push(source);
        self
    }

    /// 设置取消令牌
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// 启动时按配置初始化日志
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// 应用配置中的所有注册
    pub fn bootstrap<R>(
        &self,
        settings: &RegistrationSettings,
        registry: &mut R,
    ) -> InfrastructureResult<BootstrapReport>
    where
        R: ServiceRegistry + ?Sized,
    {
        if self.logging_enabled {
            init_logging(&settings.logging)?;
        }

        info!("开始应用 {} 个开放泛型注册", settings.registrations.len());

        let mut report = BootstrapReport::default();
        for (index, registration) in settings.registrations.iter().enumerate() {
            match self.apply(registration, registry) {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => {
                    error!("第 {} 个开放泛型注册失败: {}", index, e);
                    return Err(e);
                }
            }
        }

        info!("开放泛型注册完成: {} 个封闭服务类型", report.total_groups());
        Ok(report)
    }

    /// 应用单个注册
    pub fn apply<R>(
        &self,
        registration: &OpenGenericRegistrationSettings,
        registry: &mut R,
    ) -> InfrastructureResult<RegistrationOutcome>
    where
        R: ServiceRegistry + ?Sized,
    {
        let service_name = registration
            .service
            .as_deref()
            .ok_or_else(|| RegistrationError::missing_argument("service"))?;
        let service = self
            .catalog
            .resolve(service_name)
            .ok_or_else(|| ConfigError::UnknownType {
                name: service_name.to_string(),
            })?;
        let accessibility: AccessibilityOption = registration.accessibility.parse()?;

        debug!(
            "应用开放泛型注册: {} ({}, {:?})",
            service, registration.lifetime, registration.mode
        );

        let mut batch = OpenGenericBatch::new()
            .open_generic(Arc::clone(&service))
            .mode(registration.mode);

        batch = match &registration.implementations {
            Some(names) => batch.resolved_types(names.iter().map(|name| self.resolve_implementation(name))),
            None => batch.scan(self.scan_sources(), accessibility),
        };

        if let Some(token) = &self.cancellation {
            batch = batch.cancellation(token.clone());
        }

        let summary = match registration.mode {
            RegistrationMode::SingleImplementation => batch
                .registrar(ContainerRegistrar::single(&mut *registry, registration.lifetime))
                .execute()?,
            RegistrationMode::AllowMultiple => batch
                .registrar(ContainerRegistrar::collection(&mut *registry, registration.lifetime))
                .execute()?,
        };

        Ok(RegistrationOutcome { service, summary })
    }

    fn resolve_implementation(&self, name: &str) -> Option<Arc<TypeInfo>> {
        let resolved = self.catalog.resolve(name);
        if resolved.is_none() {
            warn!("类型目录 {} 中不存在实现类型: {}", CandidateSource::name(self.catalog), name);
        }
        resolved
    }

    fn scan_sources(&self) -> Vec<&'c dyn CandidateSource> {
        if self.sources.is_empty() {
            vec![self.catalog as &dyn CandidateSource]
        } else {
            self.sources.clone()
        }
    }
}
