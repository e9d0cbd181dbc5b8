//! 类型目录
//!
//! 有序的命名类型集合，作为候选类型来源，也用于按名称解析配置中的类型。

use di_abstractions::CandidateSource;
use registration_common::{AccessibilityOption, Describe, TypeInfo};
use std::sync::Arc;

/// 类型目录
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    name: String,
    types: Vec<Arc<TypeInfo>>,
}

impl TypeCatalog {
    /// 创建新的类型目录
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// 添加类型
    pub fn with_type(mut self, type_info: Arc<TypeInfo>) -> Self {
        self.add(type_info);
        self
    }

    /// 添加实现了 [`Describe`] 的 Rust 类型
    pub fn with_described<T: Describe>(self) -> Self {
        self.with_type(T::type_info())
    }

    /// 添加类型
    pub fn add(&mut self, type_info: Arc<TypeInfo>) {
        self.types.push(type_info);
    }

    /// 目录中的所有类型，保持添加顺序
    pub fn types(&self) -> &[Arc<TypeInfo>] {
        &self.types
    }

    /// 类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// 按名称解析类型
    ///
    /// 依次尝试完整显示名（`Handler<T>`）、类型路径和简短名称，返回第一个匹配。
    pub fn resolve(&self, name: &str) -> Option<Arc<TypeInfo>> {
        let name = name.trim();
        self.types
            .iter()
            .find(|t| t.to_string() == name)
            .or_else(|| self.types.iter().find(|t| t.name() == name))
            .or_else(|| self.types.iter().find(|t| t.short_name() == name))
            .cloned()
    }
}

impl CandidateSource for TypeCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn candidates(&self, accessibility: AccessibilityOption) -> Vec<Arc<TypeInfo>> {
        self.types
            .iter()
            .filter(|t| accessibility.admits(t.visibility()))
            .cloned()
            .collect()
    }
}

impl Extend<Arc<TypeInfo>> for TypeCatalog {
    fn extend<I: IntoIterator<Item = Arc<TypeInfo>>>(&mut self, iter: I) {
        self.types.extend(iter);
    }
}
