//! 错误类型定义

use thiserror::Error;

/// 开放泛型注册错误类型
///
/// 所有变体都是调用方输入错误：同步报告，不可重试。
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("缺少必需参数: {argument}")]
    MissingArgument { argument: &'static str },

    #[error("类型 {type_name} 不是开放泛型类型定义")]
    NotOpenGenericType { type_name: String },

    #[error("候选类型列表无效: 第 {index} 项: {reason}")]
    InvalidCandidateList { index: usize, reason: String },

    #[error("类型 {implementation} 没有实现 {service_type} 的任何封闭泛型版本")]
    UnrelatedImplementation {
        implementation: String,
        service_type: String,
    },

    #[error("无效的可访问性选项: {value}")]
    InvalidAccessibilityOption { value: String },

    #[error("封闭泛型服务 {service_type} 存在多个实现: {implementations}")]
    MultipleImplementations {
        service_type: String,
        implementations: String,
    },

    #[error("注册回调失败: {service_type}, 原因: {source}")]
    RegistrarFailed {
        service_type: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("注册已取消，已分派 {dispatched} 个分组")]
    Cancelled { dispatched: usize },
}

impl RegistrationError {
    /// 创建缺少参数错误
    pub fn missing_argument(argument: &'static str) -> Self {
        Self::MissingArgument { argument }
    }

    /// 创建候选列表无效错误
    pub fn invalid_candidate(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidCandidateList {
            index,
            reason: reason.into(),
        }
    }

    /// 创建注册回调失败错误
    pub fn registrar_failed(
        service_type: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::RegistrarFailed {
            service_type: service_type.into(),
            source: source.into(),
        }
    }
}

/// 类型元数据构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeModelError {
    #[error("类型 {type_name} 不是泛型类型定义，无法封闭")]
    NotGenericTypeDefinition { type_name: String },

    #[error("泛型参数数量不匹配: {type_name}, 期望 {expected}, 实际 {actual}")]
    ArityMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    #[error("类型目录中不存在类型: {name}")]
    UnknownType { name: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("注册错误: {source}")]
    RegistrationError {
        #[from]
        source: RegistrationError,
    },

    #[error("类型元数据错误: {source}")]
    TypeModelError {
        #[from]
        source: TypeModelError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type RegistrationResult<T> = Result<T, RegistrationError>;
/// 类型元数据结果
pub type TypeModelResult<T> = Result<T, TypeModelError>;
/// 配置结果
pub type ConfigResult<T> = Result<T, ConfigError>;
/// 基础设施结果
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
