//! 组件元数据定义

use crate::type_key::TypeKey;
use std::collections::HashMap;

/// 组件元数据
///
/// 附加在类型声明上的描述信息，用于日志与诊断输出
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    /// 具体类型键
    pub type_key: TypeKey,
    /// 组件名称
    pub name: String,
    /// 组件描述
    pub description: Option<String>,
    /// 组件标签
    pub tags: Vec<String>,
    /// 自定义属性
    pub properties: HashMap<String, String>,
}

impl ComponentMetadata {
    /// 创建新的组件元数据
    pub fn new(type_key: TypeKey, name: impl Into<String>) -> Self {
        Self {
            type_key,
            name: name.into(),
            description: None,
            tags: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// 从类型创建默认元数据
    pub fn of<T: 'static>() -> Self {
        let key = TypeKey::of::<T>();
        Self::new(key, key.short_name())
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 添加标签
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// 添加属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
