//! 解析上下文
//!
//! 提供解析链跟踪、循环依赖检测与递归深度保护

use crate::container::ContainerConfig;
use weft_common::{DependencyError, DependencyResult, ServiceKey};

/// 解析上下文
///
/// 每次 `get_service` 调用创建一个，随递归传递
#[derive(Debug)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    chain: Vec<ServiceKey>,
    /// 最大递归深度
    max_depth: usize,
    /// 是否启用循环依赖检测
    cycle_detection: bool,
}

impl ResolveContext {
    /// 根据容器配置创建解析上下文
    pub fn new(config: &ContainerConfig) -> Self {
        Self {
            chain: Vec::new(),
            max_depth: config.max_resolution_depth,
            cycle_detection: config.enable_circular_dependency_detection,
        }
    }

    /// 进入一个解析节点
    ///
    /// 节点已在解析链上时报告循环依赖；超出最大深度时报告深度超限。
    pub fn enter(&mut self, key: ServiceKey) -> DependencyResult<()> {
        if self.cycle_detection && self.chain.contains(&key) {
            return Err(DependencyError::CircularDependency {
                dependency_chain: self.format_chain(&key),
            });
        }

        if self.chain.len() >= self.max_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                type_name: key.to_string(),
                max_depth: self.max_depth,
            });
        }

        self.chain.push(key);
        Ok(())
    }

    /// 离开当前解析节点
    pub fn exit(&mut self) {
        self.chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    fn format_chain(&self, repeated: &ServiceKey) -> String {
        let mut chain: Vec<String> = self.chain.iter().map(ServiceKey::to_string).collect();
        chain.push(repeated.to_string());
        chain.join(" -> ")
    }
}
