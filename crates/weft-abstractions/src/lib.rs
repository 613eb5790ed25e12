//! # Weft Abstractions
//!
//! 映射注册表、类型目录与依赖解析的核心抽象。
//!
//! ## 核心组件
//!
//! - [`Mapping`] / [`MappingRegistry`] - 抽象到具体实现的映射声明
//! - [`TypeCatalog`] - 显式声明的类型目录（取代运行时反射扫描）
//! - [`ImplementationScanner`] - 实现类型扫描器接口
//! - [`ResolveContext`] - 解析链上下文与循环依赖检测
//! - [`ContainerConfig`] - 容器配置

pub mod catalog;
pub mod container;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use catalog::*;
pub use container::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
