//! # Registration Common
//!
//! 这个 crate 提供开放泛型服务注册所需的公共类型。
//!
//! ## 核心组件
//!
//! - [`TypeInfo`] - 类型元数据（基类、接口、泛型参数）
//! - [`TypeBuilder`] - 类型元数据构建器
//! - [`Describe`] - Rust 类型暴露自身元数据的适配 trait
//! - [`Lifetime`] - 注册生命周期
//! - [`AccessibilityOption`] - 候选类型可访问性过滤选项
//! - [`RegistrationError`] - 注册错误分类
//!
//! ## 设计原则
//!
//! - 类型元数据不可变，通过 `Arc` 共享
//! - 封闭泛型类型的身份由结构决定（定义 + 有序类型实参）
//! - 所有错误均为同步、不可重试的调用方输入错误

pub mod accessibility;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use accessibility::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
