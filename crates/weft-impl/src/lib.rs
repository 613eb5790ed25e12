//! # Weft Implementation
//!
//! 依赖注入容器的具体实现。
//!
//! ## 核心组件
//!
//! - [`WeftContainer`] - 容器本体：注册 API 与解析 API
//! - [`CatalogScanner`] - 基于类型目录的实现类型扫描器
//! - [`SingletonArena`] - 单例实例区与逆序释放
//!
//! 解析逻辑按关注点拆分在 `graph` / `decorator` / `collection`
//! 三个模块中，均为 [`WeftContainer`] 的内部实现块。

pub mod container;
pub mod lifecycle;
pub mod scanner;

mod collection;
mod decorator;
mod graph;

pub use container::WeftContainer;
pub use lifecycle::SingletonArena;
pub use scanner::CatalogScanner;
