//! 容器构建器

use std::path::Path;
use tracing::{debug, info};
use weft_abstractions::{ContainerConfig, TypeCatalog, TypeModule};
use weft_common::{DependencyResult, InfrastructureError, InfrastructureResult};
use weft_impl::WeftContainer;

/// 注册步骤
///
/// 目录并入完成后依次作用在容器上
type RegistrationStep = Box<dyn FnOnce(&mut WeftContainer) -> DependencyResult<()> + Send>;

/// 容器构建器
///
/// 使用建造者模式组装类型目录、容器配置与注册步骤
pub struct ContainerBuilder {
    /// 待并入的类型模块
    modules: Vec<TypeModule>,
    /// 容器配置
    config: ContainerConfig,
    /// 注册步骤列表
    registrations: Vec<RegistrationStep>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            config: ContainerConfig::default(),
            registrations: Vec::new(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加类型模块
    pub fn with_module(mut self, module: TypeModule) -> Self {
        debug!("添加类型模块: {}", module.name());
        self.modules.push(module);
        self
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 从 JSON 配置文件加载容器配置
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| InfrastructureError::BootstrapFailed {
                message: format!("读取配置文件失败: {}, 原因: {}", path.display(), e),
            })?;
        self.config = serde_json::from_str(&content).map_err(|e| {
            InfrastructureError::BootstrapFailed {
                message: format!("解析配置文件失败: {}, 原因: {}", path.display(), e),
            }
        })?;

        info!("加载容器配置: {}", path.display());
        Ok(self)
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 追加注册步骤
    ///
    /// 步骤在 [`build`](Self::build) 中按追加顺序作用在容器上。
    pub fn register<F>(mut self, step: F) -> Self
    where
        F: FnOnce(&mut WeftContainer) -> DependencyResult<()> + Send + 'static,
    {
        self.registrations.push(Box::new(step));
        self
    }

    /// 构建容器实例
    pub fn build(self) -> InfrastructureResult<WeftContainer> {
        info!("开始构建容器");

        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        let mut catalog = TypeCatalog::new();
        for module in self.modules {
            catalog.add_module(module)?;
        }

        let mut container = WeftContainer::with_config(catalog, self.config);
        for step in self.registrations {
            step(&mut container)?;
        }

        info!("容器构建完成: 映射 {} 条", container.stats().registered_mappings);
        Ok(container)
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> InfrastructureResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}
