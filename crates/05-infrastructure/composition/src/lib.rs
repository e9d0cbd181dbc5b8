//! # 开放泛型注册组合层
//!
//! 负责把配置、日志和注册引擎组合起来：
//!
//! - [`settings`]：通过 `config` 从 TOML 文件和环境变量加载注册配置
//! - [`logging`]：基于 `tracing-subscriber` 的日志初始化
//! - [`bootstrapper`]：按配置把开放泛型注册应用到服务注册表
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use di_impl::{ServiceCollection, TypeCatalog};
//! use registration_composition::{RegistrationBootstrapper, SettingsLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TypeCatalog::new("app");
//! let settings = SettingsLoader::new().with_file("registration.toml").load()?;
//! let mut services = ServiceCollection::new();
//!
//! RegistrationBootstrapper::new(&catalog)
//!     .with_logging(true)
//!     .bootstrap(&settings, &mut services)?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrapper;
pub mod logging;
pub mod settings;

pub use bootstrapper::{BootstrapReport, RegistrationBootstrapper, RegistrationOutcome};
pub use logging::{init_logging, LoggingConfig};
pub use settings::{OpenGenericRegistrationSettings, RegistrationSettings, SettingsLoader, DEFAULT_ENV_PREFIX};
