//! 泛型契约匹配器
//!
//! 对单个实现类型遍历其完整祖先，找出由开放泛型定义构造的封闭服务类型。

use registration_common::TypeInfo;
use std::sync::Arc;

/// 获取候选类型满足的所有封闭服务类型
///
/// 候选自身排在最前，其后按祖先遍历顺序排列，且已按结构化身份去重：经由多条路径到达的
/// 同一封闭接口只出现一次。没有匹配时返回空列表，这不是错误。
pub fn closed_service_types(candidate: &Arc<TypeInfo>, open_generic: &TypeInfo) -> Vec<Arc<TypeInfo>> {
    std::iter::once(Arc::clone(candidate))
        .chain(candidate.ancestry())
        .filter(|ancestor| {
            ancestor.is_constructed_from(open_generic) && !ancestor.contains_generic_parameters()
        })
        .collect()
}

/// 检查候选类型是否至少满足一个封闭服务类型
pub fn implements_open_generic(candidate: &Arc<TypeInfo>, open_generic: &TypeInfo) -> bool {
    !closed_service_types(candidate, open_generic).is_empty()
}
