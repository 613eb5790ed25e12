//! 集合映射注册与序列构建
//!
//! 集合注册扫描元素抽象的全部实现者；其中某个实现者若已经按
//! 装饰映射注册，则把该装饰映射整体折叠为集合的子映射，并从
//! 注册表移除独立条目，使装饰后的实例只出现在集合中一次。

use crate::container::{WeftContainer, scan_failure};
use tracing::{debug, info};
use weft_abstractions::{
    ImplementationScanner, ImplementationType, Mapping, ResolveContext,
};
use weft_common::{DependencyResult, ServiceKey, SharedInstance, TypeKey};

impl WeftContainer {
    /// 注册元素抽象的集合映射
    ///
    /// 成员为目录中 `I` 的全部实现者，按声明顺序排列；
    /// 没有任何实现者时集合为空序列。
    pub fn map_collection<I>(&mut self) -> DependencyResult<&mut Self>
    where
        I: ?Sized + 'static,
    {
        let element = TypeKey::of::<I>();
        let implementations = self
            .scanner
            .implementations_of(element)
            .map_err(scan_failure)?;
        let children = self.fold_decorated_children(implementations);

        info!("注册集合映射: Vec<{element}>, 成员 {} 个", children.len());
        self.registry
            .register(Mapping::sequence(element).with_children(children))?;
        Ok(self)
    }

    /// 注册开放泛型族的集合映射
    ///
    /// 封闭实现按封闭接口分组，每个泛型参数组合各注册一条
    /// 序列映射。
    pub fn map_collection_family(&mut self, definition: TypeKey) -> DependencyResult<&mut Self> {
        let implementations = self
            .scanner
            .implementations_of_family(definition)
            .map_err(scan_failure)?;

        let mut groups: Vec<(TypeKey, Vec<ImplementationType>)> = Vec::new();
        for implementation in implementations {
            match groups
                .iter_mut()
                .find(|(closed, _)| *closed == implementation.interface)
            {
                Some((_, members)) => members.push(implementation),
                None => groups.push((implementation.interface, vec![implementation])),
            }
        }

        for (closed, members) in groups {
            let children = self.fold_decorated_children(members);
            info!("注册集合映射: Vec<{closed}>, 成员 {} 个", children.len());
            self.registry
                .register(Mapping::sequence(closed).with_children(children))?;
        }
        Ok(self)
    }

    /// 把实现者折叠为集合子映射
    ///
    /// 实现者的任一已实现接口上若存在装饰映射，移除该独立条目并
    /// 以装饰映射整体作为子映射，否则按普通子映射加入。
    fn fold_decorated_children(
        &mut self,
        implementations: Vec<ImplementationType>,
    ) -> Vec<Mapping> {
        let mut children = Vec::new();

        for implementation in implementations {
            let decorated_key = implementation
                .implemented_interfaces
                .iter()
                .map(|interface| ServiceKey::Type(*interface))
                .find(|key| {
                    self.registry
                        .lookup(key)
                        .is_some_and(|mapping| mapping.is_decorated)
                });

            match decorated_key.and_then(|key| self.registry.remove(&key)) {
                Some(decorated) => {
                    debug!("折叠装饰映射入集合: {}", decorated.interface);
                    children.push(decorated);
                }
                None => children.push(Mapping::child(
                    implementation.interface,
                    implementation.concrete,
                )),
            }
        }

        children
    }

    /// 依次构造子映射序列
    ///
    /// 集合与组合的成员每次解析都重新构造，装饰子映射构造后
    /// 继续走装饰器链。
    pub(crate) fn build_sequence(
        &self,
        children: &[Mapping],
        context: &mut ResolveContext,
    ) -> DependencyResult<Vec<SharedInstance>> {
        children
            .iter()
            .map(|child| self.construct_from_mapping(child, context))
            .collect()
    }
}
