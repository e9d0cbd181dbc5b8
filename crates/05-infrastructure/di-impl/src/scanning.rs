//! 候选类型扫描

use crate::matcher::implements_open_generic;
use di_abstractions::CandidateSource;
use registration_common::{AccessibilityOption, RegistrationError, RegistrationResult, TypeInfo};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 获取来源中所有应注册到开放泛型服务的类型
///
/// 只保留具体类型（非抽象、非接口、非开放泛型）且至少满足一个封闭服务类型的候选。
/// 多个来源中重复出现的同一类型只保留第一次。
pub fn types_to_register(
    open_generic: &TypeInfo,
    sources: &[&dyn CandidateSource],
    accessibility: AccessibilityOption,
) -> RegistrationResult<Vec<Arc<TypeInfo>>> {
    ensure_open_generic(open_generic)?;
    Ok(registrable_candidates(open_generic, sources, accessibility))
}

pub(crate) fn ensure_open_generic(open_generic: &TypeInfo) -> RegistrationResult<()> {
    if open_generic.is_generic_type_definition() {
        Ok(())
    } else {
        Err(RegistrationError::NotOpenGenericType {
            type_name: open_generic.to_string(),
        })
    }
}

pub(crate) fn registrable_candidates(
    open_generic: &TypeInfo,
    sources: &[&dyn CandidateSource],
    accessibility: AccessibilityOption,
) -> Vec<Arc<TypeInfo>> {
    let mut seen = HashSet::new();
    let mut registrable = Vec::new();

    for source in sources {
        let candidates = source.candidates(accessibility);
        debug!("扫描来源 {}: {} 个候选类型", source.name(), candidates.len());

        for candidate in candidates {
            if candidate.is_concrete()
                && implements_open_generic(&candidate, open_generic)
                && seen.insert(candidate.key().clone())
            {
                registrable.push(candidate);
            }
        }
    }

    registrable
}
