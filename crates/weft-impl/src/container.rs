//! 依赖注入容器实现
//!
//! [`WeftContainer`] 分两个阶段使用：组合阶段通过 `map_*` 系列方法
//! 构建映射注册表（需要 `&mut self`），之后容器只读，`get_service`
//! 可以在任意线程并发调用。
//!
//! 注册 API 与原插件框架的映射模型一一对应：
//!
//! - [`map`](WeftContainer::map) - 平面抽象到具体类型的映射，
//!   构造函数注入自身接口序列的类型自动按组合映射注册
//! - [`map_family`](WeftContainer::map_family) - 开放泛型族按封闭形式逐一注册
//! - [`map_instance`](WeftContainer::map_instance) - 既有实例直接入缓存
//! - [`map_deferred`](WeftContainer::map_deferred) - 延迟初始化的单例
//! - [`map_decorator`](WeftContainer::map_decorator) - 装饰器链
//! - [`map_collection`](WeftContainer::map_collection) - 元素抽象的序列
//! - [`map_composite`](WeftContainer::map_composite) - 组合类型与其成员

use crate::lifecycle::SingletonArena;
use crate::scanner::CatalogScanner;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};
use uuid::Uuid;
use weft_abstractions::{
    ConstructorParameter, ContainerConfig, ContainerStats, ImplementationScanner, Mapping,
    MappingRegistry, ResolveContext, ServiceProvider, TypeCatalog,
};
use weft_common::{
    ComponentError, ComponentMetadata, DeferredInstance, DependencyError, DependencyResult,
    Disposable, Scope, ServiceKey, SharedInstance, TypeKey, release_hook_of,
};

/// 依赖注入容器
#[derive(Debug)]
pub struct WeftContainer {
    id: Uuid,
    created_at: DateTime<Utc>,
    config: ContainerConfig,
    catalog: Arc<TypeCatalog>,
    pub(crate) scanner: CatalogScanner,
    pub(crate) registry: MappingRegistry,
    pub(crate) arena: SingletonArena,
    resolved_count: AtomicUsize,
    error_count: AtomicUsize,
}

impl WeftContainer {
    /// 以默认配置在指定类型目录上创建容器
    pub fn new(catalog: TypeCatalog) -> Self {
        Self::with_config(catalog, ContainerConfig::default())
    }

    /// 以指定配置创建容器
    pub fn with_config(catalog: TypeCatalog, config: ContainerConfig) -> Self {
        let catalog = Arc::new(catalog);
        let container = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            scanner: CatalogScanner::new(Arc::clone(&catalog)),
            catalog,
            registry: MappingRegistry::new(),
            arena: SingletonArena::new(),
            resolved_count: AtomicUsize::new(0),
            error_count: AtomicUsize::new(0),
        };
        info!(
            "容器已创建: {}, 目录声明 {} 个",
            container.id,
            container.catalog.len()
        );
        container
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器创建时间
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 容器使用的类型目录
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // 注册 API
    // ------------------------------------------------------------------

    /// 注册抽象到具体类型的映射
    ///
    /// 具体类型的构造函数注入自身某个已实现接口的序列时，
    /// 视为组合类型，自动改按组合映射注册。
    pub fn map<I, C>(&mut self, scope: Scope) -> DependencyResult<&mut Self>
    where
        I: ?Sized + 'static,
        C: 'static,
    {
        self.map_keys(TypeKey::of::<I>(), TypeKey::of::<C>(), scope)
    }

    pub(crate) fn map_keys(
        &mut self,
        interface: TypeKey,
        concrete: TypeKey,
        scope: Scope,
    ) -> DependencyResult<&mut Self> {
        if self.is_composite_declaration(concrete)? {
            return self.map_composite_keys(interface, concrete, scope);
        }

        info!("注册映射: {interface} -> {concrete} ({scope:?})");
        self.registry
            .register(Mapping::new(ServiceKey::Type(interface), concrete, scope))?;
        Ok(self)
    }

    /// 注册开放泛型族的全部封闭实现
    ///
    /// `definition` 为族定义键，目录中声明了对应封闭绑定的每个
    /// (封闭接口, 具体类型) 组合各注册一条映射。
    pub fn map_family(&mut self, definition: TypeKey, scope: Scope) -> DependencyResult<&mut Self> {
        let implementations = self
            .scanner
            .implementations_of_family(definition)
            .map_err(scan_failure)?;
        if implementations.is_empty() {
            return Err(DependencyError::registration(
                definition.short_name(),
                "泛型族没有任何封闭实现",
            ));
        }

        for implementation in implementations {
            info!(
                "注册封闭泛型映射: {} -> {}",
                implementation.interface, implementation.concrete
            );
            self.registry.register(Mapping::new(
                ServiceKey::Type(implementation.interface),
                implementation.concrete,
                scope,
            ))?;
        }
        Ok(self)
    }

    /// 注册既有实例
    ///
    /// 实例直接进入单例缓存，解析时不经过构造路径。
    pub fn map_instance<I>(&mut self, instance: Arc<I>) -> DependencyResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.map_instance_inner(instance, None)
    }

    /// 注册既有实例并挂接释放钩子
    ///
    /// 容器销毁时按注册的逆序调用实例的 [`Disposable::dispose`]。
    pub fn map_instance_disposable<I>(&mut self, instance: Arc<I>) -> DependencyResult<&mut Self>
    where
        I: ?Sized + Disposable + Send + Sync + 'static,
    {
        self.map_instance_inner(instance, Some(release_hook_of::<I>()))
    }

    fn map_instance_inner<I>(
        &mut self,
        instance: Arc<I>,
        release: Option<weft_common::ReleaseFn>,
    ) -> DependencyResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let interface = TypeKey::of::<I>();
        let key = ServiceKey::Type(interface);
        info!("注册实例映射: {interface}");
        self.registry
            .register(Mapping::new(key, interface, Scope::Singleton))?;
        self.arena.insert(key, SharedInstance::new(instance), release);
        Ok(self)
    }

    /// 注册延迟初始化的单例
    ///
    /// `init` 至多执行一次，在抽象第一次被解析时触发。
    pub fn map_deferred<I, F>(&mut self, init: F) -> DependencyResult<&mut Self>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        let interface = TypeKey::of::<I>();
        let key = ServiceKey::Type(interface);
        info!("注册延迟映射: {interface}");
        self.registry
            .register(Mapping::new(key, interface, Scope::Singleton).lazy())?;

        let deferred = DeferredInstance::new(move || SharedInstance::new(init()));
        self.arena
            .insert(key, SharedInstance::new(Arc::new(deferred)), None);
        Ok(self)
    }

    /// 注册装饰器链
    ///
    /// `decorators` 按应用顺序排列，最后一个是最外层；每个装饰器
    /// 类型必须在目录中标记为装饰器。解析时先构造核心类型 `C`，
    /// 再逐层包裹。
    pub fn map_decorator<I, C>(&mut self, decorators: &[TypeKey]) -> DependencyResult<&mut Self>
    where
        I: ?Sized + 'static,
        C: 'static,
    {
        let interface = TypeKey::of::<I>();
        let core = TypeKey::of::<C>();
        self.catalog.single_constructor(core)?;

        for decorator in decorators {
            let declaration = self.catalog.declaration(*decorator).ok_or_else(|| {
                DependencyError::registration(decorator.short_name(), "类型未在目录中声明")
            })?;
            if !declaration.is_decorator() {
                return Err(DependencyError::registration(
                    decorator.short_name(),
                    "类型未标记为装饰器",
                ));
            }
            self.catalog.single_constructor(*decorator)?;
        }

        let children = decorators
            .iter()
            .map(|decorator| Mapping::child(interface, *decorator))
            .collect();
        info!(
            "注册装饰映射: {interface} -> {core}, 装饰器 {} 层",
            decorators.len()
        );
        self.registry.register(
            Mapping::new(ServiceKey::Type(interface), core, Scope::Singleton)
                .decorated()
                .with_children(children),
        )?;
        Ok(self)
    }

    /// 注册组合映射
    ///
    /// 组合类型 `C` 注入元素抽象 `I` 的序列，序列成员为目录中
    /// `I` 的其余实现者，不包含 `C` 自身。
    pub fn map_composite<I, C>(&mut self, scope: Scope) -> DependencyResult<&mut Self>
    where
        I: ?Sized + 'static,
        C: 'static,
    {
        self.map_composite_keys(TypeKey::of::<I>(), TypeKey::of::<C>(), scope)
    }

    pub(crate) fn map_composite_keys(
        &mut self,
        interface: TypeKey,
        concrete: TypeKey,
        scope: Scope,
    ) -> DependencyResult<&mut Self> {
        let implementations = self
            .scanner
            .implementations_of(interface)
            .map_err(scan_failure)?;
        let children: Vec<Mapping> = implementations
            .into_iter()
            .filter(|implementation| implementation.concrete != concrete)
            .map(|implementation| Mapping::child(implementation.interface, implementation.concrete))
            .collect();

        info!(
            "注册组合映射: {interface} -> {concrete}, 成员 {} 个",
            children.len()
        );
        self.registry.register(
            Mapping::new(ServiceKey::Type(interface), concrete, scope).with_children(children),
        )?;
        Ok(self)
    }

    fn is_composite_declaration(&self, concrete: TypeKey) -> DependencyResult<bool> {
        let declaration = self.catalog.declaration(concrete).ok_or_else(|| {
            DependencyError::registration(concrete.short_name(), "类型未在目录中声明")
        })?;
        let constructor = self.catalog.single_constructor(concrete)?;

        Ok(constructor
            .parameters()
            .iter()
            .any(|parameter| match parameter {
                ConstructorParameter::Sequence(element) => declaration
                    .interfaces()
                    .iter()
                    .any(|binding| binding.interface == *element),
                ConstructorParameter::Scalar(_) => false,
            }))
    }

    // ------------------------------------------------------------------
    // 解析 API
    // ------------------------------------------------------------------

    /// 解析指定抽象的实例
    pub fn get_service<I>(&self) -> DependencyResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.get_service_by_key(&ServiceKey::of::<I>())
            .and_then(|instance| instance.downcast::<I>())
    }

    /// 解析指定元素抽象的全部实例
    pub fn get_services<I>(&self) -> DependencyResult<Vec<Arc<I>>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::sequence_of::<I>();
        let mapping = self
            .registry
            .lookup(&key)
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: key.to_string(),
            })?;

        let mut context = ResolveContext::new(&self.config);
        let result = self
            .build_sequence(&mapping.children, &mut context)
            .and_then(|instances| {
                instances
                    .iter()
                    .map(|instance| instance.downcast::<I>())
                    .collect()
            });
        self.record_outcome(&key, result.is_ok());
        result
    }

    /// 是否已注册指定抽象
    pub fn is_registered<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.registry.contains(&ServiceKey::of::<I>())
    }

    /// 已注册组件的元数据列表
    pub fn registered_components(&self) -> Vec<ComponentMetadata> {
        self.registry
            .mappings()
            .map(|mapping| {
                mapping
                    .concrete
                    .and_then(|concrete| self.catalog.declaration(concrete))
                    .map(|declaration| declaration.metadata().clone())
                    .unwrap_or_else(|| {
                        ComponentMetadata::new(
                            mapping.interface.type_key(),
                            mapping.interface.to_string(),
                        )
                    })
            })
            .collect()
    }

    /// 容器统计信息
    pub fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_mappings: self.registry.len(),
            resolved_components: self.resolved_count.load(Ordering::Relaxed),
            active_singletons: self.arena.len(),
            resolution_errors: self.error_count.load(Ordering::Relaxed),
        }
    }

    /// 销毁容器
    ///
    /// 单例实例按缓存的逆序释放；销毁后容器不应再用于解析。
    pub fn dispose(&self) {
        let released = self.arena.dispose_all();
        info!("容器 {} 已销毁, 释放实例 {released} 个", self.id);
    }

    pub(crate) fn record_outcome(&self, key: &ServiceKey, ok: bool) {
        if ok {
            self.resolved_count.fetch_add(1, Ordering::Relaxed);
            debug!("解析成功: {key}");
        } else {
            self.error_count.fetch_add(1, Ordering::Relaxed);
            debug!("解析失败: {key}");
        }
    }
}

impl ServiceProvider for WeftContainer {
    fn get_service_by_key(&self, key: &ServiceKey) -> DependencyResult<SharedInstance> {
        let mut context = ResolveContext::new(&self.config);
        let result = self.resolve_key(key, &mut context);
        self.record_outcome(key, result.is_ok());
        result
    }

    fn is_registered_key(&self, key: &ServiceKey) -> bool {
        self.registry.contains(key)
    }
}

pub(crate) fn scan_failure(error: ComponentError) -> DependencyError {
    match error {
        ComponentError::ConstructorArity { type_name, count } => {
            DependencyError::ConstructorArity { type_name, count }
        }
        other => DependencyError::registration("TypeCatalog", other.to_string()),
    }
}
