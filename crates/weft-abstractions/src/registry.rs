//! 映射注册表
//!
//! 存放抽象到具体实现的映射声明。注册表在组合阶段一次性构建，
//! 解析阶段只读。

use weft_common::{DependencyError, DependencyResult, Scope, ServiceKey, TypeKey};

/// 注册表条目
///
/// `children` 在装饰器链中按注册顺序排列（最外层在最后），
/// 在集合/组合映射中为成员集合。
#[derive(Debug, Clone)]
pub struct Mapping {
    /// 抽象键，注册表内唯一
    pub interface: ServiceKey,
    /// 具体类型键；纯序列映射没有具体类型
    pub concrete: Option<TypeKey>,
    /// 生命周期作用域
    pub scope: Scope,
    /// 解析时是否经过装饰器链
    pub is_decorated: bool,
    /// 缓存实例是否为延迟持有者，解析时需要解包
    pub is_lazy: bool,
    /// 子映射
    pub children: Vec<Mapping>,
}

impl Mapping {
    /// 创建标量映射
    pub fn new(interface: ServiceKey, concrete: TypeKey, scope: Scope) -> Self {
        Self {
            interface,
            concrete: Some(concrete),
            scope,
            is_decorated: false,
            is_lazy: false,
            children: Vec::new(),
        }
    }

    /// 创建序列映射
    pub fn sequence(element: TypeKey) -> Self {
        Self {
            interface: ServiceKey::Sequence(element),
            concrete: None,
            scope: Scope::Singleton,
            is_decorated: false,
            is_lazy: false,
            children: Vec::new(),
        }
    }

    /// 创建子映射（装饰器或集合成员）
    pub fn child(interface: TypeKey, concrete: TypeKey) -> Self {
        Self::new(ServiceKey::Type(interface), concrete, Scope::Singleton)
    }

    /// 标记为装饰映射
    pub fn decorated(mut self) -> Self {
        self.is_decorated = true;
        self
    }

    /// 标记为延迟映射
    pub fn lazy(mut self) -> Self {
        self.is_lazy = true;
        self
    }

    /// 追加子映射
    pub fn with_children(mut self, children: Vec<Mapping>) -> Self {
        self.children = children;
        self
    }
}

/// 映射注册表
///
/// 纯内存映射；重复注册同一抽象是配置错误，在注册时立即失败
#[derive(Debug, Default)]
pub struct MappingRegistry {
    mappings: std::collections::HashMap<ServiceKey, Mapping>,
}

impl MappingRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册映射
    pub fn register(&mut self, mapping: Mapping) -> DependencyResult<()> {
        let key = mapping.interface;
        if self.mappings.contains_key(&key) {
            return Err(DependencyError::DuplicateRegistration {
                type_name: key.to_string(),
            });
        }
        self.mappings.insert(key, mapping);
        Ok(())
    }

    /// 查询映射
    pub fn lookup(&self, key: &ServiceKey) -> Option<&Mapping> {
        self.mappings.get(key)
    }

    /// 移除映射
    ///
    /// 集合注册把已注册的装饰映射折叠为子映射时使用
    pub fn remove(&mut self, key: &ServiceKey) -> Option<Mapping> {
        self.mappings.remove(key)
    }

    /// 是否已注册指定抽象
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.mappings.contains_key(key)
    }

    /// 遍历全部映射
    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.values()
    }

    /// 注册条目总数
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
