//! 注册配置
//!
//! 配置按以下顺序叠加，后者覆盖前者：
//! 1. 内置默认值；
//! 2. TOML 配置文件（可选）；
//! 3. `REGISTRATION__` 前缀的环境变量，层级以 `__` 分隔，
//!    例如 `REGISTRATION__LOGGING__LEVEL=debug`。

use crate::logging::LoggingConfig;
use config::{Config, Environment, File, FileFormat};
use di_abstractions::RegistrationMode;
use registration_common::{ConfigError, ConfigResult, Lifetime};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "REGISTRATION";

/// 注册配置根节点
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// 日志配置
    pub logging: LoggingConfig,
    /// 开放泛型注册，按声明顺序执行
    pub registrations: Vec<OpenGenericRegistrationSettings>,
}

/// 单个开放泛型注册配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenGenericRegistrationSettings {
    /// 开放泛型服务定义名称
    #[serde(default)]
    pub service: Option<String>,
    /// 显式实现类型名称；省略时扫描类型目录
    #[serde(default)]
    pub implementations: Option<Vec<String>>,
    /// 生命周期，默认瞬时
    #[serde(default)]
    pub lifetime: Lifetime,
    /// 可访问性选项，只在扫描时生效
    #[serde(default = "default_accessibility")]
    pub accessibility: String,
    /// 注册模式，默认单一实现
    #[serde(default)]
    pub mode: RegistrationMode,
}

fn default_accessibility() -> String {
    "all".to_string()
}

impl OpenGenericRegistrationSettings {
    /// 以服务名称创建扫描注册配置
    pub fn scan(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            implementations: None,
            lifetime: Lifetime::default(),
            accessibility: default_accessibility(),
            mode: RegistrationMode::default(),
        }
    }

    /// 设置显式实现类型
    pub fn with_implementations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implementations = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// 设置可访问性选项
    pub fn with_accessibility(mut self, accessibility: impl Into<String>) -> Self {
        self.accessibility = accessibility.into();
        self
    }

    /// 设置注册模式
    pub fn with_mode(mut self, mode: RegistrationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// 配置加载器
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// 创建新的配置加载器，默认读取 `REGISTRATION__*` 环境变量
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
        }
    }

    /// 添加 TOML 配置文件
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 加载配置
    pub fn load(&self) -> ConfigResult<RegistrationSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            info!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        if let Some(prefix) = &self.env_prefix {
            debug!("添加环境变量配置源，前缀: {}", prefix);
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::ParseError { source: Box::new(e) })?;
        let settings: RegistrationSettings = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError { source: Box::new(e) })?;

        settings.validate()?;
        info!("配置加载完成: {} 个开放泛型注册", settings.registrations.len());
        Ok(settings)
    }

    /// 从 TOML 字符串加载配置，不读取文件和环境变量
    pub fn from_toml_str(content: &str) -> ConfigResult<RegistrationSettings> {
        let settings: RegistrationSettings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigError::ParseError { source: Box::new(e) })?;

        settings.validate()?;
        Ok(settings)
    }
}

impl RegistrationSettings {
    /// 校验配置
    ///
    /// 只检查与注册无关的部分；注册项本身的问题在执行时按注册错误报告。
    pub fn validate(&self) -> ConfigResult<()> {
        self.logging.env_filter().map(|_| ())
    }
}
