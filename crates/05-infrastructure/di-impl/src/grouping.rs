//! 分组归约
//!
//! 对每个候选执行匹配，把（封闭服务类型，实现）对按封闭服务类型分组。

use crate::matcher::closed_service_types;
use indexmap::IndexMap;
use registration_common::{TypeInfo, TypeKey};
use std::sync::Arc;
use tracing::{debug, trace};

/// 注册分组
///
/// 由归约器创建，实现列表保持候选输入顺序且永不为空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationGroup {
    /// 封闭服务类型
    pub service_type: Arc<TypeInfo>,
    /// 满足该服务类型的实现
    pub implementations: Vec<Arc<TypeInfo>>,
}

impl RegistrationGroup {
    /// 以逗号连接的实现名称，按分组顺序
    pub fn implementation_names(&self) -> String {
        self.implementations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 按封闭服务类型对候选分组
///
/// 分组顺序由服务类型首次产生的位置决定，组内实现保持候选顺序。
/// 使用插入有序映射，结果与哈希迭代顺序无关。
pub fn group_by_service_type<'c, I>(candidates: I, open_generic: &TypeInfo) -> Vec<RegistrationGroup>
where
    I: IntoIterator<Item = &'c Arc<TypeInfo>>,
{
    let mut groups: IndexMap<TypeKey, RegistrationGroup> = IndexMap::new();

    for candidate in candidates {
        let service_types = closed_service_types(candidate, open_generic);
        if service_types.is_empty() {
            trace!("候选类型 {} 不满足 {}，已跳过", candidate, open_generic);
            continue;
        }

        for service_type in service_types {
            debug!("匹配: {} -> {}", candidate, service_type);
            groups
                .entry(service_type.key().clone())
                .or_insert_with(|| RegistrationGroup {
                    service_type: Arc::clone(&service_type),
                    implementations: Vec::new(),
                })
                .implementations
                .push(Arc::clone(candidate));
        }
    }

    groups.into_values().collect()
}
