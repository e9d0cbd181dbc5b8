//! # 开放泛型批量注册实现
//!
//! 给定一组具体实现类型和一个开放泛型服务定义（例如 `Handler<T>`），
//! 找出实现类型满足的每个封闭泛型服务类型，按封闭服务类型分组，
//! 检测冲突，并把每个（封闭服务类型，实现集合）交给注册回调。
//!
//! 数据单向流动：
//!
//! 候选类型 → [`matcher`] → [`grouping`] → [`dispatch`] → 回调
//!
//! 引擎不持有任何跨调用的可变状态，也不实例化任何类型。

pub mod batch;
pub mod catalog;
pub mod collection;
pub mod dispatch;
pub mod extensions;
pub mod grouping;
pub mod matcher;
pub mod scanning;

pub use batch::OpenGenericBatch;
pub use catalog::TypeCatalog;
pub use collection::{ServiceCollection, ServiceDescriptor};
pub use dispatch::{dispatch, policy_for, AllowMultiple, DispatchSummary, SingleImplementation};
pub use extensions::{
    register_many_for_open_generic_types_with, register_many_for_open_generic_with,
    ContainerRegistrar, OpenGenericRegistrationExt,
};
pub use grouping::{group_by_service_type, RegistrationGroup};
pub use matcher::{closed_service_types, implements_open_generic};
pub use scanning::types_to_register;

pub use tokio_util::sync::CancellationToken;
