//! 类型目录
//!
//! 取代运行时反射扫描的显式声明模型：每个具体类型提交一份
//! [`TypeDeclaration`]，携带其实现的接口、封闭泛型绑定、唯一的
//! 构造函数描述（含工厂闭包）以及显式的装饰器标记。
//! 扫描器只在这份目录上做查询，"待扫描模块集合"即目录中的
//! [`TypeModule`] 列表。

use crate::factory::FactoryFn;
use std::collections::HashMap;
use weft_common::{
    ComponentError, ComponentMetadata, ComponentResult, DependencyError, DependencyResult,
    Disposable, ReleaseFn, TypeKey, release_hook_of,
};

/// 构造参数描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorParameter {
    /// 标量依赖，按抽象键解析
    Scalar(TypeKey),
    /// 序列依赖，携带元素抽象键
    Sequence(TypeKey),
}

impl ConstructorParameter {
    /// 声明标量参数
    pub fn scalar<T: ?Sized + 'static>() -> Self {
        Self::Scalar(TypeKey::of::<T>())
    }

    /// 声明序列参数
    pub fn sequence<T: ?Sized + 'static>() -> Self {
        Self::Sequence(TypeKey::of::<T>())
    }

    /// 参数引用的抽象键
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Scalar(key) | Self::Sequence(key) => *key,
        }
    }
}

/// 构造函数声明
///
/// 参数描述与工厂闭包一一对应：图解析器按声明顺序解析参数，
/// 工厂按同一顺序取出
#[derive(Clone)]
pub struct ConstructorDeclaration {
    parameters: Vec<ConstructorParameter>,
    factory: FactoryFn,
}

impl ConstructorDeclaration {
    /// 开始构建构造函数声明
    pub fn builder() -> ConstructorBuilder {
        ConstructorBuilder {
            parameters: Vec::new(),
        }
    }

    /// 参数描述列表
    pub fn parameters(&self) -> &[ConstructorParameter] {
        &self.parameters
    }

    /// 工厂闭包
    pub fn factory(&self) -> &FactoryFn {
        &self.factory
    }
}

impl std::fmt::Debug for ConstructorDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDeclaration")
            .field("parameters", &self.parameters)
            .field("factory", &"<closure>")
            .finish()
    }
}

/// 构造函数声明构建器
pub struct ConstructorBuilder {
    parameters: Vec<ConstructorParameter>,
}

impl ConstructorBuilder {
    /// 追加标量参数
    pub fn scalar<T: ?Sized + 'static>(mut self) -> Self {
        self.parameters.push(ConstructorParameter::scalar::<T>());
        self
    }

    /// 追加序列参数
    pub fn sequence<T: ?Sized + 'static>(mut self) -> Self {
        self.parameters.push(ConstructorParameter::sequence::<T>());
        self
    }

    /// 绑定工厂闭包，完成声明
    pub fn factory<F>(self, factory: F) -> ConstructorDeclaration
    where
        F: Fn(crate::factory::ArgumentList) -> DependencyResult<weft_common::SharedInstance>
            + Send
            + Sync
            + 'static,
    {
        ConstructorDeclaration {
            parameters: self.parameters,
            factory: std::sync::Arc::new(factory),
        }
    }
}

/// 接口绑定
///
/// `family` 为 `Some` 时表示该接口是某个开放泛型族的封闭形式，
/// 族定义键约定使用一个标记类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceBinding {
    /// 接口键（封闭形式时为 `dyn Trait<Arg>` 的键）
    pub interface: TypeKey,
    /// 所属泛型族定义键
    pub family: Option<TypeKey>,
}

/// 类型声明
///
/// 目录中一个具体类型的完整描述
pub struct TypeDeclaration {
    concrete: TypeKey,
    metadata: ComponentMetadata,
    interfaces: Vec<InterfaceBinding>,
    constructors: Vec<ConstructorDeclaration>,
    is_decorator: bool,
    release: Option<ReleaseFn>,
}

impl TypeDeclaration {
    /// 为指定具体类型创建声明
    pub fn of<C: 'static>() -> Self {
        Self {
            concrete: TypeKey::of::<C>(),
            metadata: ComponentMetadata::of::<C>(),
            interfaces: Vec::new(),
            constructors: Vec::new(),
            is_decorator: false,
            release: None,
        }
    }

    /// 覆盖默认元数据
    pub fn with_metadata(mut self, metadata: ComponentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// 声明实现的接口
    pub fn implements<I: ?Sized + 'static>(mut self) -> Self {
        self.interfaces.push(InterfaceBinding {
            interface: TypeKey::of::<I>(),
            family: None,
        });
        self
    }

    /// 声明实现的封闭泛型接口
    ///
    /// `family` 为泛型族的定义键，每个封闭具体类型各自声明一次，
    /// 即按声明类型列表展开的显式泛型注册。
    pub fn implements_closed<I: ?Sized + 'static>(mut self, family: TypeKey) -> Self {
        self.interfaces.push(InterfaceBinding {
            interface: TypeKey::of::<I>(),
            family: Some(family),
        });
        self
    }

    /// 声明构造函数
    ///
    /// 解析要求恰好一个构造函数，多次调用会在扫描时触发
    /// `ConstructorArity` 错误。
    pub fn constructor(mut self, constructor: ConstructorDeclaration) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// 标记为装饰器
    ///
    /// 装饰器不会被普通扫描与集合扫描拾取，只能通过
    /// `map_decorator` 显式注册。
    pub fn decorator(mut self) -> Self {
        self.is_decorator = true;
        self
    }

    /// 声明释放钩子
    ///
    /// `T` 为实例被缓存时的抽象类型，必须以 [`Disposable`] 为超 trait。
    pub fn disposable<T>(mut self) -> Self
    where
        T: ?Sized + Disposable + Send + Sync + 'static,
    {
        self.release = Some(release_hook_of::<T>());
        self
    }

    /// 具体类型键
    pub fn concrete(&self) -> TypeKey {
        self.concrete
    }

    /// 组件元数据
    pub fn metadata(&self) -> &ComponentMetadata {
        &self.metadata
    }

    /// 实现的接口绑定
    pub fn interfaces(&self) -> &[InterfaceBinding] {
        &self.interfaces
    }

    /// 声明的构造函数
    pub fn constructors(&self) -> &[ConstructorDeclaration] {
        &self.constructors
    }

    /// 是否为装饰器
    pub fn is_decorator(&self) -> bool {
        self.is_decorator
    }

    /// 释放钩子
    pub fn release(&self) -> Option<&ReleaseFn> {
        self.release.as_ref()
    }
}

impl std::fmt::Debug for TypeDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDeclaration")
            .field("concrete", &self.concrete)
            .field("interfaces", &self.interfaces)
            .field("constructors", &self.constructors.len())
            .field("is_decorator", &self.is_decorator)
            .finish()
    }
}

/// 类型模块
///
/// 一组归属同一模块的类型声明，对应原注册模型中的待扫描单元
#[derive(Debug)]
pub struct TypeModule {
    name: String,
    declarations: Vec<TypeDeclaration>,
}

impl TypeModule {
    /// 创建新模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// 提交类型声明
    pub fn declare(mut self, declaration: TypeDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 类型目录
///
/// 扫描器查询的唯一数据源；具体类型键在目录内唯一。
/// 声明按并入顺序保存，集合解析的输出顺序由此决定。
#[derive(Debug, Default)]
pub struct TypeCatalog {
    modules: Vec<String>,
    entries: Vec<TypeDeclaration>,
    index: HashMap<TypeKey, usize>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 并入一个类型模块
    pub fn add_module(&mut self, module: TypeModule) -> ComponentResult<()> {
        for declaration in &module.declarations {
            if self.index.contains_key(&declaration.concrete) {
                return Err(ComponentError::DuplicateDeclaration {
                    type_name: declaration.concrete.short_name().to_string(),
                });
            }
        }

        self.modules.push(module.name);
        for declaration in module.declarations {
            self.index.insert(declaration.concrete, self.entries.len());
            self.entries.push(declaration);
        }
        Ok(())
    }

    /// 查询具体类型的声明
    pub fn declaration(&self, concrete: TypeKey) -> Option<&TypeDeclaration> {
        self.index.get(&concrete).map(|position| &self.entries[*position])
    }

    /// 按声明顺序遍历全部声明
    pub fn declarations(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.entries.iter()
    }

    /// 已并入的模块名称
    pub fn module_names(&self) -> &[String] {
        &self.modules
    }

    /// 声明总数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 取出具体类型的唯一构造函数
    ///
    /// 声明了零个或多个构造函数时返回 `ConstructorArity`。
    pub fn single_constructor(
        &self,
        concrete: TypeKey,
    ) -> DependencyResult<&ConstructorDeclaration> {
        let declaration = self.declaration(concrete).ok_or_else(|| {
            DependencyError::resolution(concrete.short_name(), "类型未在目录中声明")
        })?;

        match declaration.constructors() {
            [constructor] => Ok(constructor),
            constructors => Err(DependencyError::ConstructorArity {
                type_name: concrete.short_name().to_string(),
                count: constructors.len(),
            }),
        }
    }
}
