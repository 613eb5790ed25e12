//! 基于类型目录的实现类型扫描器
//!
//! 在固定的 [`TypeCatalog`] 上查询实现了指定抽象的具体类型。
//! 装饰器声明一律跳过，构造函数数量在扫描时校验。

use std::sync::Arc;
use tracing::trace;
use weft_abstractions::{
    ConstructorDeclaration, ImplementationScanner, ImplementationType, InterfaceBinding,
    TypeCatalog, TypeDeclaration,
};
use weft_common::{ComponentError, ComponentResult, TypeKey};

/// 类型目录扫描器
#[derive(Debug, Clone)]
pub struct CatalogScanner {
    catalog: Arc<TypeCatalog>,
}

impl CatalogScanner {
    /// 在指定目录上创建扫描器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    /// 扫描器使用的类型目录
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    fn scan<F>(&self, matches: F) -> ComponentResult<Vec<ImplementationType>>
    where
        F: Fn(&InterfaceBinding) -> bool,
    {
        let mut found = Vec::new();
        for declaration in self.catalog.declarations() {
            if declaration.is_decorator() {
                continue;
            }
            for binding in declaration.interfaces() {
                if matches(binding) {
                    found.push(implementation_of(declaration, binding)?);
                }
            }
        }
        Ok(found)
    }
}

impl ImplementationScanner for CatalogScanner {
    fn implementations_of(
        &self,
        abstraction: TypeKey,
    ) -> ComponentResult<Vec<ImplementationType>> {
        let found = self.scan(|binding| binding.interface == abstraction)?;
        trace!("扫描抽象 {abstraction}: 命中 {} 个实现", found.len());
        Ok(found)
    }

    fn implementations_of_family(
        &self,
        definition: TypeKey,
    ) -> ComponentResult<Vec<ImplementationType>> {
        let found = self.scan(|binding| binding.family == Some(definition))?;
        trace!("扫描泛型族 {definition}: 命中 {} 个封闭实现", found.len());
        Ok(found)
    }
}

fn implementation_of(
    declaration: &TypeDeclaration,
    binding: &InterfaceBinding,
) -> ComponentResult<ImplementationType> {
    let constructor = single_constructor(declaration)?;
    Ok(ImplementationType {
        concrete: declaration.concrete(),
        interface: binding.interface,
        family: binding.family,
        parameters: constructor.parameters().to_vec(),
        implemented_interfaces: declaration
            .interfaces()
            .iter()
            .map(|binding| binding.interface)
            .collect(),
    })
}

fn single_constructor(
    declaration: &TypeDeclaration,
) -> ComponentResult<&ConstructorDeclaration> {
    match declaration.constructors() {
        [constructor] => Ok(constructor),
        constructors => Err(ComponentError::ConstructorArity {
            type_name: declaration.concrete().short_name().to_string(),
            count: constructors.len(),
        }),
    }
}
