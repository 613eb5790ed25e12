//! 类型擦除的实例持有者
//!
//! 容器内部以 [`SharedInstance`] 传递所有已构造的组件，
//! 仅在类型化 API 边界处进行向下转型

use crate::errors::{DependencyError, DependencyResult};
use crate::type_key::TypeKey;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;

/// 内部持有者
///
/// `Arc<dyn Trait>` 本身不是 Sized，无法直接通过 `Any` 向下转型，
/// 因此以一个 Sized 的包装结构承载它。
struct Holder<T: ?Sized + Send + Sync + 'static> {
    instance: Arc<T>,
}

/// 类型擦除的共享实例
///
/// 持有任意抽象（包括 `dyn Trait`）的 `Arc`，克隆只复制引用。
#[derive(Clone)]
pub struct SharedInstance {
    holder: Arc<dyn Any + Send + Sync>,
    type_key: TypeKey,
}

impl SharedInstance {
    /// 包装一个共享实例
    pub fn new<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            holder: Arc::new(Holder { instance }),
            type_key: TypeKey::of::<T>(),
        }
    }

    /// 向下转型为具体抽象
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.holder
            .downcast_ref::<Holder<T>>()
            .map(|holder| Arc::clone(&holder.instance))
            .ok_or_else(|| DependencyError::DependencyResolutionFailed {
                type_name: TypeKey::of::<T>().short_name().to_string(),
                message: format!("类型转换失败, 实例的实际类型为 {}", self.type_key),
            })
    }

    /// 实例被包装时的类型键
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }
}

impl std::fmt::Debug for SharedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInstance")
            .field("type_key", &self.type_key)
            .finish()
    }
}

/// 延迟初始化的实例持有者
///
/// 对应注册表中 `is_lazy` 的映射：缓存里存放的是持有者本身，
/// 解析时才解包取出真正的实例，初始化至多执行一次。
pub struct DeferredInstance {
    cell: OnceCell<SharedInstance>,
    init: Box<dyn Fn() -> SharedInstance + Send + Sync>,
}

impl DeferredInstance {
    /// 创建延迟实例
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> SharedInstance + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    /// 解包实例，首次调用时执行初始化
    pub fn unwrap_value(&self) -> SharedInstance {
        self.cell.get_or_init(|| (self.init)()).clone()
    }

    /// 是否已经初始化
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for DeferredInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredInstance")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
