//! 组件生命周期定义

use crate::errors::{LifecycleError, LifecycleResult};
use crate::instance::SharedInstance;
use std::sync::Arc;

/// 组件生命周期作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// 单例模式 - 容器生命周期内只创建一个实例
    #[default]
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
}

/// 可释放组件 trait
///
/// 支持在容器销毁时释放资源的组件实现此 trait。
/// 需要释放钩子的抽象应将其声明为超 trait。
pub trait Disposable {
    /// 释放组件持有的资源
    fn dispose(&self) -> LifecycleResult<()>;
}

/// 释放钩子函数类型
///
/// 对类型擦除实例执行释放，由声明方在注册时显式提供
pub type ReleaseFn = Arc<dyn Fn(&SharedInstance) -> LifecycleResult<()> + Send + Sync>;

/// 为指定抽象创建释放钩子
///
/// 抽象必须以 [`Disposable`] 为超 trait，钩子内部先向下转型再调用 `dispose`。
pub fn release_hook_of<T>() -> ReleaseFn
where
    T: ?Sized + Disposable + Send + Sync + 'static,
{
    Arc::new(|instance: &SharedInstance| {
        let typed = instance
            .downcast::<T>()
            .map_err(|error| LifecycleError::ReleaseFailed {
                type_name: instance.type_key().short_name().to_string(),
                message: error.to_string(),
            })?;
        typed.dispose()
    })
}
