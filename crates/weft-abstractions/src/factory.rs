//! 组件工厂抽象
//!
//! 每个映射携带显式的工厂闭包，构造参数由图解析器按声明顺序解析后传入，
//! 完全避免运行时类型内省

use std::sync::Arc;
use weft_common::{DependencyError, DependencyResult, SharedInstance, TypeKey};

/// 组件工厂函数类型
///
/// 接收已解析的构造参数列表，返回类型擦除的实例
pub type FactoryFn =
    Arc<dyn Fn(ArgumentList) -> DependencyResult<SharedInstance> + Send + Sync>;

/// 已解析的单个构造参数
#[derive(Debug, Clone)]
pub enum ResolvedArgument {
    /// 标量依赖
    Scalar(SharedInstance),
    /// 序列依赖
    Sequence(Vec<SharedInstance>),
}

/// 已解析的构造参数列表
///
/// 工厂闭包按声明顺序依次取出参数并向下转型
pub struct ArgumentList {
    arguments: std::vec::IntoIter<ResolvedArgument>,
}

impl ArgumentList {
    /// 从解析结果创建参数列表
    pub fn new(arguments: Vec<ResolvedArgument>) -> Self {
        Self {
            arguments: arguments.into_iter(),
        }
    }

    /// 取出下一个标量参数
    pub fn take<T: ?Sized + Send + Sync + 'static>(&mut self) -> DependencyResult<Arc<T>> {
        match self.arguments.next() {
            Some(ResolvedArgument::Scalar(instance)) => instance.downcast::<T>(),
            Some(ResolvedArgument::Sequence(_)) => Err(argument_mismatch::<T>("标量", "序列")),
            None => Err(argument_exhausted::<T>()),
        }
    }

    /// 取出下一个序列参数
    pub fn take_sequence<T: ?Sized + Send + Sync + 'static>(
        &mut self,
    ) -> DependencyResult<Vec<Arc<T>>> {
        match self.arguments.next() {
            Some(ResolvedArgument::Sequence(instances)) => instances
                .iter()
                .map(|instance| instance.downcast::<T>())
                .collect(),
            Some(ResolvedArgument::Scalar(_)) => Err(argument_mismatch::<T>("序列", "标量")),
            None => Err(argument_exhausted::<T>()),
        }
    }

    /// 剩余未取出的参数数量
    pub fn remaining(&self) -> usize {
        self.arguments.len()
    }
}

fn argument_mismatch<T: ?Sized + 'static>(expected: &str, actual: &str) -> DependencyError {
    DependencyError::resolution(
        TypeKey::of::<T>().short_name(),
        format!("参数类别不匹配: 期望{expected}参数, 实际为{actual}参数"),
    )
}

fn argument_exhausted<T: ?Sized + 'static>() -> DependencyError {
    DependencyError::resolution(TypeKey::of::<T>().short_name(), "构造参数列表已耗尽")
}
