//! 实现类型扫描器抽象接口

use crate::catalog::ConstructorParameter;
use weft_common::{ComponentResult, TypeKey};

/// 扫描结果
///
/// 仅在扫描与映射构建期间使用的瞬时数据，不会被持久化
#[derive(Debug, Clone)]
pub struct ImplementationType {
    /// 具体类型键
    pub concrete: TypeKey,
    /// 被实现的接口键（泛型族扫描时为封闭形式）
    pub interface: TypeKey,
    /// 所属泛型族定义键
    pub family: Option<TypeKey>,
    /// 唯一构造函数的参数描述
    pub parameters: Vec<ConstructorParameter>,
    /// 该类型实现的全部接口键
    pub implemented_interfaces: Vec<TypeKey>,
}

/// 实现类型扫描器 trait
///
/// 在固定的类型目录上查询实现了指定抽象的具体可实例化类型。
/// 装饰器类型不会出现在扫描结果中，它们只能显式注册。
pub trait ImplementationScanner: Send + Sync {
    /// 查询实现了指定平面抽象的全部类型
    fn implementations_of(&self, abstraction: TypeKey)
        -> ComponentResult<Vec<ImplementationType>>;

    /// 查询指定开放泛型族的全部封闭实现
    ///
    /// 每个 (具体类型, 封闭接口) 组合产出一条结果。
    fn implementations_of_family(
        &self,
        definition: TypeKey,
    ) -> ComponentResult<Vec<ImplementationType>>;
}
