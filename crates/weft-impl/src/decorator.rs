//! 装饰器链解析
//!
//! 装饰映射的子映射按注册顺序排列，最后一个是最外层。核心实例
//! 构造完成后逐层包裹：装饰器构造参数中与被装饰抽象同键的标量
//! 参数注入当前已包裹的实例，其余参数走常规解析。

use crate::container::WeftContainer;
use tracing::trace;
use weft_abstractions::{
    ArgumentList, ConstructorParameter, Mapping, ResolveContext, ResolvedArgument,
};
use weft_common::{DependencyError, DependencyResult, ServiceKey, SharedInstance};

impl WeftContainer {
    /// 将装饰器链应用到核心实例上
    pub(crate) fn resolve_decorator(
        &self,
        mapping: &Mapping,
        core: SharedInstance,
        context: &mut ResolveContext,
    ) -> DependencyResult<SharedInstance> {
        let decorated = mapping.interface.type_key();
        let mut instance = core;

        for child in &mapping.children {
            let concrete = child.concrete.ok_or_else(|| {
                DependencyError::resolution(child.interface.to_string(), "装饰器映射缺少具体类型")
            })?;
            let constructor = self.catalog().single_constructor(concrete)?;

            let mut arguments = Vec::with_capacity(constructor.parameters().len());
            for parameter in constructor.parameters() {
                let argument = match parameter {
                    ConstructorParameter::Scalar(key) if *key == decorated => {
                        ResolvedArgument::Scalar(instance.clone())
                    }
                    ConstructorParameter::Scalar(key) => ResolvedArgument::Scalar(
                        self.resolve_key(&ServiceKey::Type(*key), context)?,
                    ),
                    ConstructorParameter::Sequence(element) => {
                        let sequence_key = ServiceKey::Sequence(*element);
                        let sequence_mapping =
                            self.registry.lookup(&sequence_key).ok_or_else(|| {
                                DependencyError::ComponentNotRegistered {
                                    type_name: sequence_key.to_string(),
                                }
                            })?;
                        ResolvedArgument::Sequence(
                            self.build_sequence(&sequence_mapping.children, context)?,
                        )
                    }
                };
                arguments.push(argument);
            }

            instance = (constructor.factory())(ArgumentList::new(arguments)).map_err(|error| {
                DependencyError::ConstructionFailed {
                    type_name: concrete.short_name().to_string(),
                    source: Box::new(error),
                }
            })?;
            trace!("应用装饰器: {concrete} -> {decorated}");
        }

        Ok(instance)
    }
}
