//! 候选类型来源抽象接口
//!
//! 程序集扫描在 Rust 中对应一个类型目录：手工维护的列表，或由 [`Describe`]
//! 实现汇总而成的编译期目录。
//!
//! [`Describe`]: registration_common::Describe

use registration_common::{AccessibilityOption, TypeInfo};
use std::sync::Arc;

/// 候选类型来源 trait
pub trait CandidateSource {
    /// 来源名称
    fn name(&self) -> &str;

    /// 按可访问性过滤后的候选类型，保持来源中的顺序
    fn candidates(&self, accessibility: AccessibilityOption) -> Vec<Arc<TypeInfo>>;
}
