//! 类型标识定义
//!
//! 提供抽象与具体类型的运行时标识，作为注册表与实例缓存的键

use std::any::TypeId;
use std::fmt;

/// 类型键
///
/// 以 `TypeId` 作为唯一标识，同时携带类型名称用于诊断信息。
/// 对于开放泛型族，约定使用一个标记类型作为族定义键，
/// 每个封闭形式则直接使用 `dyn Trait<Arg>` 的类型键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// 获取指定类型的类型键
    ///
    /// 支持非 Sized 类型，因此 `dyn Trait` 也可以直接作为键。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称（包含模块路径）
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        short_type_name(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// 服务键
///
/// 注册表的键空间：标量抽象使用 [`ServiceKey::Type`]，
/// 注入序列依赖使用 [`ServiceKey::Sequence`]（以元素抽象为键）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    /// 标量抽象
    Type(TypeKey),
    /// 元素抽象的序列
    Sequence(TypeKey),
}

impl ServiceKey {
    /// 获取指定抽象的标量服务键
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeKey::of::<T>())
    }

    /// 获取指定元素抽象的序列服务键
    pub fn sequence_of<T: ?Sized + 'static>() -> Self {
        Self::Sequence(TypeKey::of::<T>())
    }

    /// 底层类型键
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Type(key) | Self::Sequence(key) => *key,
        }
    }

    /// 是否为序列键
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(key) => write!(f, "{}", key.short_name()),
            Self::Sequence(key) => write!(f, "Vec<{}>", key.short_name()),
        }
    }
}

/// 截取简短类型名称
///
/// 泛型参数部分会被丢弃，诊断信息只需要基础路径的最后一段即可定位类型。
fn short_type_name(full: &str) -> &str {
    let base = match full.find('<') {
        Some(index) => &full[..index],
        None => full,
    };
    base.rsplit("::").next().unwrap_or(base)
}
