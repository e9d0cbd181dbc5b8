//! 冲突策略与分派器

use crate::grouping::RegistrationGroup;
use di_abstractions::{ConflictPolicy, Registrar, RegistrationMode};
use registration_common::{RegistrationError, RegistrationResult, TypeInfo};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// 单一实现策略：同一封闭服务类型只允许一个实现
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleImplementation;

impl ConflictPolicy for SingleImplementation {
    fn name(&self) -> &'static str {
        "single_implementation"
    }

    fn check(
        &self,
        service_type: &Arc<TypeInfo>,
        implementations: &[Arc<TypeInfo>],
    ) -> RegistrationResult<()> {
        if implementations.len() > 1 {
            let names = implementations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RegistrationError::MultipleImplementations {
                service_type: service_type.to_string(),
                implementations: names,
            });
        }
        Ok(())
    }
}

/// 允许多实现策略：冲突交由回调处理
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowMultiple;

impl ConflictPolicy for AllowMultiple {
    fn name(&self) -> &'static str {
        "allow_multiple"
    }

    fn check(&self, _service_type: &Arc<TypeInfo>, _implementations: &[Arc<TypeInfo>]) -> RegistrationResult<()> {
        Ok(())
    }
}

/// 获取注册模式对应的内置策略
pub fn policy_for(mode: RegistrationMode) -> Box<dyn ConflictPolicy> {
    match mode {
        RegistrationMode::SingleImplementation => Box::new(SingleImplementation),
        RegistrationMode::AllowMultiple => Box::new(AllowMultiple),
    }
}

/// 分派结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// 已分派的分组数量
    pub groups: usize,
    /// 已分派的实现总数
    pub implementations: usize,
}

/// 按分组顺序分派注册
///
/// 先用冲突策略检查全部分组，任何冲突都会在第一次回调之前中止整批。
/// 随后依次同步调用回调；回调失败时不再分派剩余分组，已执行的回调不回滚。
/// 取消令牌在两次分派之间检查。
pub fn dispatch<R>(
    groups: &[RegistrationGroup],
    policy: &dyn ConflictPolicy,
    registrar: &mut R,
    cancellation: Option<&CancellationToken>,
) -> RegistrationResult<DispatchSummary>
where
    R: Registrar + ?Sized,
{
    for group in groups {
        if let Err(e) = policy.check(&group.service_type, &group.implementations) {
            error!("冲突策略 {} 拒绝分组 {}: {}", policy.name(), group.service_type, e);
            return Err(e);
        }
    }

    let mut summary = DispatchSummary::default();
    for group in groups {
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            warn!("注册已取消，已分派 {} 个分组", summary.groups);
            return Err(RegistrationError::Cancelled {
                dispatched: summary.groups,
            });
        }

        debug!(
            "分派注册分组: {} -> [{}]",
            group.service_type,
            group.implementation_names()
        );
        registrar.register(&group.service_type, &group.implementations)?;

        summary.groups += 1;
        summary.implementations += group.implementations.len();
    }

    Ok(summary)
}
