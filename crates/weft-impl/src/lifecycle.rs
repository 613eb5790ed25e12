//! 单例实例区与生命周期管理
//!
//! 缓存按抽象键存放的单例实例，记录插入顺序；容器销毁时按
//! 插入的逆序释放，单个释放钩子失败不会中断其余实例的释放。

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};
use weft_common::{ReleaseFn, ServiceKey, SharedInstance};

/// 单例缓存记录
pub struct SingletonRecord {
    /// 缓存的实例
    pub instance: SharedInstance,
    /// 缓存时间
    pub created_at: DateTime<Utc>,
    /// 释放钩子
    pub release: Option<ReleaseFn>,
}

/// 单例实例区
///
/// 解析路径上只做无锁读取；插入顺序单独记录，作为释放顺序的依据
#[derive(Default)]
pub struct SingletonArena {
    instances: DashMap<ServiceKey, SingletonRecord>,
    order: Mutex<Vec<ServiceKey>>,
}

impl SingletonArena {
    /// 创建空实例区
    pub fn new() -> Self {
        Self::default()
    }

    /// 缓存一个单例实例
    pub fn insert(&self, key: ServiceKey, instance: SharedInstance, release: Option<ReleaseFn>) {
        let record = SingletonRecord {
            instance,
            created_at: Utc::now(),
            release,
        };
        if self.instances.insert(key, record).is_none() {
            self.order.lock().push(key);
        }
    }

    /// 查询缓存的实例
    pub fn get(&self, key: &ServiceKey) -> Option<SharedInstance> {
        self.instances
            .get(key)
            .map(|record| record.instance.clone())
    }

    /// 是否已缓存指定抽象
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.instances.contains_key(key)
    }

    /// 活跃单例数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 实例区是否为空
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// 按插入的逆序释放全部实例
    ///
    /// 返回被移出实例区的实例数量。释放钩子失败只记录日志，
    /// 不影响后续实例的释放。
    pub fn dispose_all(&self) -> usize {
        let order = std::mem::take(&mut *self.order.lock());
        let mut released = 0;

        for key in order.iter().rev() {
            let Some((_, record)) = self.instances.remove(key) else {
                continue;
            };
            released += 1;

            if let Some(hook) = record.release {
                match hook(&record.instance) {
                    Ok(()) => debug!("实例已释放: {key}"),
                    Err(error) => warn!("实例释放失败: {key}, 原因: {error}"),
                }
            }
        }

        released
    }
}

impl std::fmt::Debug for SingletonArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonArena")
            .field("instances", &self.instances.len())
            .finish()
    }
}
