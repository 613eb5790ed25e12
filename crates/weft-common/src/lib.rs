//! # Weft Common
//!
//! 这个 crate 提供了 Weft DI 容器的公共类型和错误分类体系。
//!
//! ## 核心组件
//!
//! - [`TypeKey`] / [`ServiceKey`] - 类型标识与注册表键
//! - [`SharedInstance`] - 类型擦除的共享实例持有者
//! - [`Scope`] - 组件生命周期作用域
//! - [`DependencyError`] - 依赖解析错误分类
//!
//! ## 设计原则
//!
//! - 显式的工厂闭包注册，完全避免运行时类型内省
//! - 组合阶段单线程构建，解析阶段只读
//! - 错误在发生点不可恢复，直接传播给调用方

pub mod errors;
pub mod instance;
pub mod lifetime;
pub mod metadata;
pub mod type_key;

pub use errors::*;
pub use instance::*;
pub use lifetime::*;
pub use metadata::*;
pub use type_key::*;
