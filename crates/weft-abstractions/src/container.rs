//! 容器抽象与配置

use serde::{Deserialize, Serialize};
use weft_common::{DependencyResult, ServiceKey, SharedInstance};

/// 服务提供者 trait
///
/// 容器对外的最小解析能力面
pub trait ServiceProvider: Send + Sync {
    /// 按服务键解析类型擦除的实例
    fn get_service_by_key(&self, key: &ServiceKey) -> DependencyResult<SharedInstance>;

    /// 检查是否已注册指定服务键
    fn is_registered_key(&self, key: &ServiceKey) -> bool;
}

/// 容器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 是否启用循环依赖检测
    pub enable_circular_dependency_detection: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            enable_circular_dependency_detection: true,
            max_resolution_depth: 100,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerStats {
    /// 已注册映射数量
    pub registered_mappings: usize,
    /// 成功解析次数
    pub resolved_components: usize,
    /// 活跃单例数量
    pub active_singletons: usize,
    /// 解析错误次数
    pub resolution_errors: usize,
}
