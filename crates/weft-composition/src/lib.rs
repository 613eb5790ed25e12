//! # Weft Composition
//!
//! 容器组合层：把类型目录、容器配置、日志初始化与注册步骤
//! 组装成一个可用的 [`WeftContainer`](weft_impl::WeftContainer)。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use weft_composition::{ContainerBuilder, LoggingConfig};
//! use weft_abstractions::TypeModule;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = ContainerBuilder::new()
//!         .with_logging(LoggingConfig::development())
//!         .with_module(TypeModule::new("core"))
//!         .build()?;
//!
//!     container.dispose();
//!     Ok(())
//! }
//! ```

pub mod builder;

pub use builder::{ContainerBuilder, LoggingConfig};

pub use weft_common::InfrastructureError;
