//! # Dependency Injection Abstractions
//!
//! 开放泛型批量注册的抽象层，定义注册引擎与外部协作方之间的接缝。
//!
//! ## 核心接口
//!
//! - [`Registrar`] - 注册回调（每个封闭服务类型调用一次）
//! - [`ServiceRegistry`] - 外部注入容器的注册入口
//! - [`CandidateSource`] - 候选实现类型来源
//! - [`ConflictPolicy`] - 同一封闭服务存在多个实现时的冲突策略

pub mod policy;
pub mod registrar;
pub mod registry;
pub mod scanner;

pub use policy::*;
pub use registrar::*;
pub use registry::*;
pub use scanner::*;
