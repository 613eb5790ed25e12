//! 错误类型定义

use thiserror::Error;

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("依赖重复注册: {type_name}")]
    DuplicateRegistration { type_name: String },

    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("构造函数数量不符: {type_name} 声明了 {count} 个构造函数，要求恰好一个")]
    ConstructorArity { type_name: String, count: usize },

    #[error("组件构造失败: {type_name}, 原因: {source}")]
    ConstructionFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("检测到循环依赖: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("依赖解析深度超限: {type_name}, 最大深度 {max_depth}")]
    ResolutionDepthExceeded { type_name: String, max_depth: usize },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },

    #[error("依赖解析失败: {type_name}, 原因: {message}")]
    DependencyResolutionFailed { type_name: String, message: String },
}

impl DependencyError {
    /// 创建注册错误
    pub fn registration(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistrationError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 创建解析错误
    pub fn resolution(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DependencyResolutionFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 组件目录与扫描错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("类型未在目录中声明: {type_name}")]
    TypeNotDeclared { type_name: String },

    #[error("类型声明无效: {type_name}, 原因: {message}")]
    InvalidDeclaration { type_name: String, message: String },

    #[error("构造函数数量不符: {type_name} 声明了 {count} 个构造函数，要求恰好一个")]
    ConstructorArity { type_name: String, count: usize },

    #[error("类型重复声明: {type_name}")]
    DuplicateDeclaration { type_name: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }
}

/// 生命周期管理错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("实例释放失败: {type_name}, 原因: {message}")]
    ReleaseFailed { type_name: String, message: String },

    #[error("生命周期管理失败: {message}")]
    LifecycleManagementFailed { message: String },
}

/// 基础设施错误类型
///
/// 组合层的统一错误出口
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("组件目录错误: {source}")]
    ComponentError {
        #[from]
        source: ComponentError,
    },

    #[error("生命周期错误: {source}")]
    LifecycleError {
        #[from]
        source: LifecycleError,
    },

    #[error("容器启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type LifecycleResult<T> = Result<T, LifecycleError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
