//! 开放泛型批量注册
//!
//! 一次调用处理一批候选：先完整校验输入，再匹配、分组，最后分派。
//! 校验顺序固定，第一个失败的检查生效：
//!
//! 1. 必需输入（开放泛型定义、候选来源、回调）存在；
//! 2. 服务定义确实是开放泛型定义；
//! 3. 显式候选列表中没有缺失或非具体的条目；
//! 4. 显式候选列表中的每个类型至少满足一个封闭服务类型。

use crate::dispatch::{dispatch, policy_for, DispatchSummary};
use crate::grouping::{group_by_service_type, RegistrationGroup};
use crate::matcher::implements_open_generic;
use crate::scanning::{ensure_open_generic, registrable_candidates};
use di_abstractions::{CandidateSource, Registrar, RegistrationMode};
use registration_common::{AccessibilityOption, RegistrationError, RegistrationResult, TypeInfo};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

enum Candidates<'a> {
    /// 从来源扫描，不满足服务定义的类型会被静默过滤
    Scanned {
        sources: Vec<&'a dyn CandidateSource>,
        accessibility: AccessibilityOption,
    },
    /// 调用方显式给出的类型，`None` 表示缺失条目
    Explicit(Vec<Option<Arc<TypeInfo>>>),
}

/// 开放泛型批量注册构建器
pub struct OpenGenericBatch<'a> {
    open_generic: Option<Arc<TypeInfo>>,
    candidates: Option<Candidates<'a>>,
    registrar: Option<Box<dyn Registrar + 'a>>,
    mode: RegistrationMode,
    cancellation: Option<CancellationToken>,
}

impl<'a> OpenGenericBatch<'a> {
    /// 创建新的批量注册
    pub fn new() -> Self {
        Self {
            open_generic: None,
            candidates: None,
            registrar: None,
            mode: RegistrationMode::SingleImplementation,
            cancellation: None,
        }
    }

    /// 设置开放泛型服务定义
    pub fn open_generic(mut self, open_generic: Arc<TypeInfo>) -> Self {
        self.open_generic = Some(open_generic);
        self
    }

    /// 从候选来源扫描
    pub fn scan<I>(mut self, sources: I, accessibility: AccessibilityOption) -> Self
    where
        I: IntoIterator<Item = &'a dyn CandidateSource>,
    {
        self.candidates = Some(Candidates::Scanned {
            sources: sources.into_iter().collect(),
            accessibility,
        });
        self
    }

    /// 显式指定要注册的类型
    pub fn types<I>(self, types: I) -> Self
    where
        I: IntoIterator<Item = Arc<TypeInfo>>,
    {
        self.resolved_types(types.into_iter().map(Some))
    }

    /// 显式指定要注册的类型，允许包含未能解析的条目
    pub fn resolved_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = Option<Arc<TypeInfo>>>,
    {
        self.candidates = Some(Candidates::Explicit(types.into_iter().collect()));
        self
    }

    /// 设置注册回调
    pub fn registrar(mut self, registrar: impl Registrar + 'a) -> Self {
        self.registrar = Some(Box::new(registrar));
        self
    }

    /// 设置注册模式
    pub fn mode(mut self, mode: RegistrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// 设置取消令牌
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// 校验并分组，不执行回调
    pub fn plan(&self) -> RegistrationResult<Vec<RegistrationGroup>> {
        let open_generic = self
            .open_generic
            .as_ref()
            .ok_or_else(|| RegistrationError::missing_argument("open_generic_service_type"))?;
        let candidates = self
            .candidates
            .as_ref()
            .ok_or_else(|| RegistrationError::missing_argument("candidates"))?;

        plan_groups(open_generic, candidates)
    }

    /// 执行批量注册
    pub fn execute(self) -> RegistrationResult<DispatchSummary> {
        let Self {
            open_generic,
            candidates,
            registrar,
            mode,
            cancellation,
        } = self;

        let open_generic =
            open_generic.ok_or_else(|| RegistrationError::missing_argument("open_generic_service_type"))?;
        let candidates = candidates.ok_or_else(|| RegistrationError::missing_argument("candidates"))?;
        let mut registrar = registrar.ok_or_else(|| RegistrationError::missing_argument("registrar"))?;

        let groups = plan_groups(&open_generic, &candidates)?;
        let policy = policy_for(mode);
        let summary = dispatch(&groups, policy.as_ref(), registrar.as_mut(), cancellation.as_ref())?;

        info!(
            "开放泛型 {} 注册完成: {} 个封闭服务类型, {} 个实现",
            open_generic, summary.groups, summary.implementations
        );
        Ok(summary)
    }
}

impl Default for OpenGenericBatch<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn plan_groups(open_generic: &TypeInfo, candidates: &Candidates<'_>) -> RegistrationResult<Vec<RegistrationGroup>> {
    ensure_open_generic(open_generic)?;

    let implementations = match candidates {
        Candidates::Scanned {
            sources,
            accessibility,
        } => {
            let found = registrable_candidates(open_generic, sources, *accessibility);
            if found.is_empty() {
                warn!("候选来源中没有实现 {} 的类型", open_generic);
            }
            found
        }
        Candidates::Explicit(types) => validate_explicit(open_generic, types)?,
    };

    Ok(group_by_service_type(&implementations, open_generic))
}

fn validate_explicit(
    open_generic: &TypeInfo,
    types: &[Option<Arc<TypeInfo>>],
) -> RegistrationResult<Vec<Arc<TypeInfo>>> {
    let mut implementations = Vec::with_capacity(types.len());
    for (index, entry) in types.iter().enumerate() {
        let Some(candidate) = entry else {
            return Err(RegistrationError::invalid_candidate(index, "缺失"));
        };
        if !candidate.is_concrete() {
            return Err(RegistrationError::invalid_candidate(
                index,
                format!("{candidate} 不是具体类型（抽象类型、接口或开放泛型）"),
            ));
        }
        implementations.push(Arc::clone(candidate));
    }

    if let Some(unrelated) = implementations
        .iter()
        .find(|candidate| !implements_open_generic(candidate, open_generic))
    {
        return Err(RegistrationError::UnrelatedImplementation {
            implementation: unrelated.to_string(),
            service_type: open_generic.to_string(),
        });
    }

    Ok(implementations)
}
