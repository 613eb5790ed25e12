//! Weft 容器端到端演示
//!
//! 组装一个带装饰器链与集合映射的小型服务图：
//! 时钟 -> 日志（时间戳 + 脱敏装饰）-> 通知集合。

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use weft_abstractions::{ConstructorDeclaration, TypeDeclaration, TypeModule};
use weft_common::{Scope, SharedInstance, TypeKey};
use weft_composition::{ContainerBuilder, LoggingConfig};

/// 时钟抽象
trait Clock: Send + Sync {
    /// 当前的 Unix 时间戳（秒）
    fn now(&self) -> u64;
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

/// 日志抽象
trait Logger: Send + Sync {
    /// 输出一条日志
    fn log(&self, message: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("{message}");
    }
}

/// 装饰器：在消息前加时间戳
struct TimestampLogger {
    inner: Arc<dyn Logger>,
    clock: Arc<dyn Clock>,
}

impl Logger for TimestampLogger {
    fn log(&self, message: &str) {
        self.inner.log(&format!("[{}] {message}", self.clock.now()));
    }
}

/// 装饰器：屏蔽敏感词
struct RedactingLogger {
    inner: Arc<dyn Logger>,
}

impl Logger for RedactingLogger {
    fn log(&self, message: &str) {
        self.inner.log(&message.replace("password", "***"));
    }
}

/// 通知抽象
trait Notifier: Send + Sync {
    /// 发送通知
    fn notify(&self, logger: &dyn Logger, message: &str);
}

struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn notify(&self, logger: &dyn Logger, message: &str) {
        logger.log(&format!("email -> {message}"));
    }
}

struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn notify(&self, logger: &dyn Logger, message: &str) {
        logger.log(&format!("sms -> {message}"));
    }
}

fn demo_module() -> TypeModule {
    TypeModule::new("demo")
        .declare(
            TypeDeclaration::of::<SystemClock>()
                .implements::<dyn Clock>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(Arc::new(SystemClock) as Arc<dyn Clock>))
                })),
        )
        .declare(
            TypeDeclaration::of::<ConsoleLogger>()
                .implements::<dyn Logger>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(ConsoleLogger) as Arc<dyn Logger>
                    ))
                })),
        )
        .declare(
            TypeDeclaration::of::<TimestampLogger>()
                .implements::<dyn Logger>()
                .decorator()
                .constructor(
                    ConstructorDeclaration::builder()
                        .scalar::<dyn Logger>()
                        .scalar::<dyn Clock>()
                        .factory(|mut args| {
                            let inner = args.take::<dyn Logger>()?;
                            let clock = args.take::<dyn Clock>()?;
                            Ok(SharedInstance::new(
                                Arc::new(TimestampLogger { inner, clock }) as Arc<dyn Logger>,
                            ))
                        }),
                ),
        )
        .declare(
            TypeDeclaration::of::<RedactingLogger>()
                .implements::<dyn Logger>()
                .decorator()
                .constructor(
                    ConstructorDeclaration::builder()
                        .scalar::<dyn Logger>()
                        .factory(|mut args| {
                            let inner = args.take::<dyn Logger>()?;
                            Ok(SharedInstance::new(
                                Arc::new(RedactingLogger { inner }) as Arc<dyn Logger>
                            ))
                        }),
                ),
        )
        .declare(
            TypeDeclaration::of::<EmailNotifier>()
                .implements::<dyn Notifier>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(EmailNotifier) as Arc<dyn Notifier>
                    ))
                })),
        )
        .declare(
            TypeDeclaration::of::<SmsNotifier>()
                .implements::<dyn Notifier>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(Arc::new(SmsNotifier) as Arc<dyn Notifier>))
                })),
        )
}

fn main() -> Result<()> {
    let container = ContainerBuilder::new()
        .with_logging(LoggingConfig::development())
        .with_module(demo_module())
        .register(|container| {
            container.map::<dyn Clock, SystemClock>(Scope::Singleton)?;
            container.map_decorator::<dyn Logger, ConsoleLogger>(&[
                TypeKey::of::<TimestampLogger>(),
                TypeKey::of::<RedactingLogger>(),
            ])?;
            container.map_collection::<dyn Notifier>()?;
            Ok(())
        })
        .build()?;

    let logger = container.get_service::<dyn Logger>()?;
    logger.log("demo started, password=hunter2");

    let notifiers = container.get_services::<dyn Notifier>()?;
    for notifier in &notifiers {
        notifier.notify(logger.as_ref(), "container is up");
    }

    info!("统计: {:?}", container.stats());
    container.dispose();
    Ok(())
}
