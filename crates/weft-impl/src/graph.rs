//! 依赖图解析
//!
//! 递归解析的主干：按服务键查映射、查单例缓存、解析构造参数、
//! 调用工厂闭包。解析链由 [`ResolveContext`] 跟踪，进入接口键与
//! 具体类型键两级节点，循环依赖与深度超限都在进入时报告。

use crate::container::WeftContainer;
use tracing::trace;
use weft_abstractions::{
    ArgumentList, ConstructorParameter, Mapping, ResolveContext, ResolvedArgument,
};
use weft_common::{
    DeferredInstance, DependencyError, DependencyResult, Scope, ServiceKey, SharedInstance,
};

impl WeftContainer {
    /// 按服务键解析实例
    ///
    /// 单例命中缓存直接返回；延迟映射的缓存里存放的是
    /// [`DeferredInstance`] 持有者，命中后解包取出真正的实例。
    pub(crate) fn resolve_key(
        &self,
        key: &ServiceKey,
        context: &mut ResolveContext,
    ) -> DependencyResult<SharedInstance> {
        let Some(mapping) = self.registry.lookup(key) else {
            return Err(DependencyError::ComponentNotRegistered {
                type_name: key.to_string(),
            });
        };

        if mapping.scope == Scope::Singleton {
            if let Some(cached) = self.arena.get(key) {
                trace!("单例缓存命中: {key}");
                return if mapping.is_lazy {
                    unwrap_deferred(&cached)
                } else {
                    Ok(cached)
                };
            }
        }

        context.enter(*key)?;
        let constructed = self.construct_from_mapping(mapping, context);
        context.exit();
        let instance = constructed?;

        if mapping.scope == Scope::Singleton {
            let release = mapping
                .concrete
                .and_then(|concrete| self.catalog().declaration(concrete))
                .and_then(|declaration| declaration.release().cloned());
            self.arena.insert(*key, instance.clone(), release);
        }
        Ok(instance)
    }

    /// 按映射构造实例
    ///
    /// 构造参数按声明顺序解析后交给工厂闭包；装饰映射在核心实例
    /// 构造完成后继续走装饰器链。
    pub(crate) fn construct_from_mapping(
        &self,
        mapping: &Mapping,
        context: &mut ResolveContext,
    ) -> DependencyResult<SharedInstance> {
        let concrete = mapping.concrete.ok_or_else(|| {
            DependencyError::resolution(mapping.interface.to_string(), "映射缺少具体类型")
        })?;
        let constructor = self.catalog().single_constructor(concrete)?;

        // 具体类型键也计入解析链，组合成员间接包含自身时能被发现
        context.enter(ServiceKey::Type(concrete))?;
        let mut arguments = Vec::with_capacity(constructor.parameters().len());
        let mut resolved = Ok(());
        for parameter in constructor.parameters() {
            match self.resolve_parameter(parameter, mapping, context) {
                Ok(argument) => arguments.push(argument),
                Err(error) => {
                    resolved = Err(error);
                    break;
                }
            }
        }
        context.exit();
        resolved?;

        trace!("构造实例: {concrete}");
        let instance = (constructor.factory())(ArgumentList::new(arguments))
            .map_err(|error| DependencyError::ConstructionFailed {
                type_name: concrete.short_name().to_string(),
                source: Box::new(error),
            })?;

        if mapping.is_decorated {
            return self.resolve_decorator(mapping, instance, context);
        }
        Ok(instance)
    }

    /// 解析单个构造参数
    ///
    /// 序列参数优先使用已注册的序列映射；没有时回退到当前映射
    /// 自身的子映射（组合情形），二者都没有则注入空序列。
    fn resolve_parameter(
        &self,
        parameter: &ConstructorParameter,
        owner: &Mapping,
        context: &mut ResolveContext,
    ) -> DependencyResult<ResolvedArgument> {
        match parameter {
            ConstructorParameter::Scalar(key) => Ok(ResolvedArgument::Scalar(
                self.resolve_key(&ServiceKey::Type(*key), context)?,
            )),
            ConstructorParameter::Sequence(element) => {
                let sequence_key = ServiceKey::Sequence(*element);
                let children = match self.registry.lookup(&sequence_key) {
                    Some(sequence_mapping) => &sequence_mapping.children,
                    None => &owner.children,
                };
                Ok(ResolvedArgument::Sequence(
                    self.build_sequence(children, context)?,
                ))
            }
        }
    }
}

/// 解包延迟实例
fn unwrap_deferred(cached: &SharedInstance) -> DependencyResult<SharedInstance> {
    let deferred = cached.downcast::<DeferredInstance>()?;
    Ok(deferred.unwrap_value())
}
