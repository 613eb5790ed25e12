//! weft-impl 容器的集中式集成测试

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use weft_abstractions::{ConstructorDeclaration, ContainerConfig, TypeDeclaration, TypeModule};
use weft_common::{
    DependencyError, Disposable, LifecycleResult, Scope, SharedInstance, TypeKey,
};
use weft_composition::ContainerBuilder;
use weft_impl::WeftContainer;

// ---------------------------------------------------------------------
// 测试组件：时钟与日志
// ---------------------------------------------------------------------

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FixedClock {
    value: u64,
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.value
    }
}

trait Logger: Send + Sync {
    fn log(&self, message: &str) -> String;
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) -> String {
        format!("console:{message}")
    }
}

/// 装饰器：在消息前加时间戳
struct TimestampLogger {
    inner: Arc<dyn Logger>,
    clock: Arc<dyn Clock>,
}

impl Logger for TimestampLogger {
    fn log(&self, message: &str) -> String {
        self.inner.log(&format!("[{}] {message}", self.clock.now()))
    }
}

/// 装饰器：屏蔽敏感词
struct RedactingLogger {
    inner: Arc<dyn Logger>,
}

impl Logger for RedactingLogger {
    fn log(&self, message: &str) -> String {
        self.inner.log(&message.replace("secret", "***"))
    }
}

fn clock_module() -> TypeModule {
    TypeModule::new("clock").declare(
        TypeDeclaration::of::<FixedClock>()
            .implements::<dyn Clock>()
            .constructor(ConstructorDeclaration::builder().factory(|_| {
                Ok(SharedInstance::new(
                    Arc::new(FixedClock { value: 7 }) as Arc<dyn Clock>
                ))
            })),
    )
}

fn logger_module() -> TypeModule {
    TypeModule::new("logging")
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
}

fn container_with(modules: Vec<TypeModule>) -> WeftContainer {
    let mut builder = ContainerBuilder::new();
    for module in modules {
        builder = builder.with_module(module);
    }
    builder.build().unwrap()
}

// ---------------------------------------------------------------------
// 作用域
// ---------------------------------------------------------------------

/// 带序号的组件，用于区分实例
trait Widget: Send + Sync {
    fn serial(&self) -> usize;
}

struct StampedWidget {
    serial: usize,
}

impl Widget for StampedWidget {
    fn serial(&self) -> usize {
        self.serial
    }
}

/// 构造计数器，以实例映射注入工厂
struct Counter(AtomicUsize);

fn widget_module() -> TypeModule {
    TypeModule::new("widgets").declare(
        TypeDeclaration::of::<StampedWidget>()
            .implements::<dyn Widget>()
            .constructor(
                ConstructorDeclaration::builder()
                    .scalar::<Counter>()
                    .factory(|mut args| {
                        let counter = args.take::<Counter>()?;
                        let serial = counter.0.fetch_add(1, Ordering::SeqCst);
                        Ok(SharedInstance::new(
                            Arc::new(StampedWidget { serial }) as Arc<dyn Widget>
                        ))
                    }),
            ),
    )
}

#[test]
fn singleton_resolution_returns_the_same_instance() {
    let mut container = container_with(vec![widget_module()]);
    container
        .map_instance::<Counter>(Arc::new(Counter(AtomicUsize::new(0))))
        .unwrap();
    container
        .map::<dyn Widget, StampedWidget>(Scope::Singleton)
        .unwrap();

    let first = container.get_service::<dyn Widget>().unwrap();
    let second = container.get_service::<dyn Widget>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.serial(), 0);
}

#[test]
fn transient_resolution_constructs_a_new_instance_each_time() {
    let mut container = container_with(vec![widget_module()]);
    container
        .map_instance::<Counter>(Arc::new(Counter(AtomicUsize::new(0))))
        .unwrap();
    container
        .map::<dyn Widget, StampedWidget>(Scope::Transient)
        .unwrap();

    let first = container.get_service::<dyn Widget>().unwrap();
    let second = container.get_service::<dyn Widget>().unwrap();
    assert_ne!(first.serial(), second.serial());
}

#[test]
fn unmapped_abstraction_fails_with_not_registered() {
    let container = container_with(vec![clock_module()]);
    assert!(matches!(
        container.get_service::<dyn Clock>(),
        Err(DependencyError::ComponentNotRegistered { .. })
    ));
}

#[test]
fn duplicate_mapping_fails_at_registration_time() {
    let mut container = container_with(vec![clock_module()]);
    container
        .map::<dyn Clock, FixedClock>(Scope::Singleton)
        .unwrap();
    assert!(matches!(
        container.map::<dyn Clock, FixedClock>(Scope::Singleton),
        Err(DependencyError::DuplicateRegistration { .. })
    ));
}

// ---------------------------------------------------------------------
// 装饰器链
// ---------------------------------------------------------------------

#[test]
fn decorator_chain_wraps_core_with_last_registered_outermost() {
    let mut container = container_with(vec![clock_module(), logger_module()]);
    container
        .map::<dyn Clock, FixedClock>(Scope::Singleton)
        .unwrap();
    container
        .map_decorator::<dyn Logger, ConsoleLogger>(&[
            TypeKey::of::<TimestampLogger>(),
            TypeKey::of::<RedactingLogger>(),
        ])
        .unwrap();

    let logger = container.get_service::<dyn Logger>().unwrap();
    // 最外层是 RedactingLogger: 先屏蔽，再加时间戳，最后落到核心
    assert_eq!(logger.log("secret plan"), "console:[7] *** plan");
}

#[test]
fn decorated_singleton_is_cached_after_first_resolution() {
    let mut container = container_with(vec![clock_module(), logger_module()]);
    container
        .map::<dyn Clock, FixedClock>(Scope::Singleton)
        .unwrap();
    container
        .map_decorator::<dyn Logger, ConsoleLogger>(&[TypeKey::of::<RedactingLogger>()])
        .unwrap();

    let first = container.get_service::<dyn Logger>().unwrap();
    let second = container.get_service::<dyn Logger>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn decorator_registration_rejects_unmarked_types() {
    let mut container = container_with(vec![clock_module(), logger_module()]);
    // FixedClock 未标记为装饰器
    assert!(matches!(
        container.map_decorator::<dyn Logger, ConsoleLogger>(&[TypeKey::of::<FixedClock>()]),
        Err(DependencyError::RegistrationError { .. })
    ));
}

// ---------------------------------------------------------------------
// 集合与装饰映射折叠
// ---------------------------------------------------------------------

trait Sink: Send + Sync {
    fn id(&self) -> String;
}

struct FileSink;

impl Sink for FileSink {
    fn id(&self) -> String {
        "file".to_string()
    }
}

struct MemorySink;

impl Sink for MemorySink {
    fn id(&self) -> String {
        "memory".to_string()
    }
}

/// 装饰器：给被装饰 Sink 的标识加缓冲前缀
struct BufferingSink {
    inner: Arc<dyn Sink>,
}

impl Sink for BufferingSink {
    fn id(&self) -> String {
        format!("buffered({})", self.inner.id())
    }
}

fn sink_module() -> TypeModule {
    TypeModule::new("sinks")
        .declare(
            TypeDeclaration::of::<FileSink>()
                .implements::<dyn Sink>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(Arc::new(FileSink) as Arc<dyn Sink>))
                })),
        )
        .declare(
            TypeDeclaration::of::<MemorySink>()
                .implements::<dyn Sink>()
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(Arc::new(MemorySink) as Arc<dyn Sink>))
                })),
        )
        .declare(
            TypeDeclaration::of::<BufferingSink>()
                .implements::<dyn Sink>()
                .decorator()
                .constructor(
                    ConstructorDeclaration::builder()
                        .scalar::<dyn Sink>()
                        .factory(|mut args| {
                            let inner = args.take::<dyn Sink>()?;
                            Ok(SharedInstance::new(
                                Arc::new(BufferingSink { inner }) as Arc<dyn Sink>
                            ))
                        }),
                ),
        )
}

#[test]
fn collection_contains_all_implementers_in_declaration_order() {
    let mut container = container_with(vec![sink_module()]);
    container.map_collection::<dyn Sink>().unwrap();

    let sinks = container.get_services::<dyn Sink>().unwrap();
    let ids: Vec<String> = sinks.iter().map(|sink| sink.id()).collect();
    assert_eq!(ids, vec!["file".to_string(), "memory".to_string()]);
}

#[test]
fn decorated_mapping_is_folded_into_the_collection_once() {
    let mut container = container_with(vec![sink_module()]);
    container
        .map_decorator::<dyn Sink, FileSink>(&[TypeKey::of::<BufferingSink>()])
        .unwrap();
    container.map_collection::<dyn Sink>().unwrap();

    let sinks = container.get_services::<dyn Sink>().unwrap();
    let ids: Vec<String> = sinks.iter().map(|sink| sink.id()).collect();
    assert_eq!(ids, vec!["buffered(file)".to_string(), "memory".to_string()]);

    // 独立条目已被折叠移除
    assert!(matches!(
        container.get_service::<dyn Sink>(),
        Err(DependencyError::ComponentNotRegistered { .. })
    ));
}

#[test]
fn collection_members_are_constructed_per_resolution() {
    let mut container = container_with(vec![sink_module()]);
    container.map_collection::<dyn Sink>().unwrap();

    let first = container.get_services::<dyn Sink>().unwrap();
    let second = container.get_services::<dyn Sink>().unwrap();
    assert!(!Arc::ptr_eq(&first[0], &second[0]));
}

// ---------------------------------------------------------------------
// 泛型族
// ---------------------------------------------------------------------

struct Account;
struct Contact;

/// 泛型族定义键的标记类型
struct ValidatesFamily;

trait Validates<T>: Send + Sync {
    fn field(&self) -> &'static str;
}

struct AccountNameValidator;
struct AccountBalanceValidator;
struct ContactEmailValidator;

impl Validates<Account> for AccountNameValidator {
    fn field(&self) -> &'static str {
        "name"
    }
}

impl Validates<Account> for AccountBalanceValidator {
    fn field(&self) -> &'static str {
        "balance"
    }
}

impl Validates<Contact> for ContactEmailValidator {
    fn field(&self) -> &'static str {
        "email"
    }
}

fn validator_module() -> TypeModule {
    let family = TypeKey::of::<ValidatesFamily>();
    TypeModule::new("validators")
        .declare(
            TypeDeclaration::of::<AccountNameValidator>()
                .implements_closed::<dyn Validates<Account>>(family)
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(AccountNameValidator) as Arc<dyn Validates<Account>>
                    ))
                })),
        )
        .declare(
            TypeDeclaration::of::<AccountBalanceValidator>()
                .implements_closed::<dyn Validates<Account>>(family)
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(AccountBalanceValidator) as Arc<dyn Validates<Account>>
                    ))
                })),
        )
        .declare(
            TypeDeclaration::of::<ContactEmailValidator>()
                .implements_closed::<dyn Validates<Contact>>(family)
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(ContactEmailValidator) as Arc<dyn Validates<Contact>>
                    ))
                })),
        )
}

#[test]
fn family_collections_group_members_by_closed_interface() {
    let mut container = container_with(vec![validator_module()]);
    container
        .map_collection_family(TypeKey::of::<ValidatesFamily>())
        .unwrap();

    let account = container.get_services::<dyn Validates<Account>>().unwrap();
    let contact = container.get_services::<dyn Validates<Contact>>().unwrap();
    assert_eq!(account.len(), 2);
    assert_eq!(contact.len(), 1);
    assert_eq!(contact[0].field(), "email");
}

trait Repository<T>: Send + Sync {
    fn entity(&self) -> &'static str;
}

struct RepositoryFamily;
struct AccountRepository;
struct ContactRepository;

impl Repository<Account> for AccountRepository {
    fn entity(&self) -> &'static str {
        "account"
    }
}

impl Repository<Contact> for ContactRepository {
    fn entity(&self) -> &'static str {
        "contact"
    }
}

#[test]
fn family_mapping_registers_every_closed_form() {
    let family = TypeKey::of::<RepositoryFamily>();
    let module = TypeModule::new("repositories")
        .declare(
            TypeDeclaration::of::<AccountRepository>()
                .implements_closed::<dyn Repository<Account>>(family)
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(AccountRepository) as Arc<dyn Repository<Account>>
                    ))
                })),
        )
        .declare(
            TypeDeclaration::of::<ContactRepository>()
                .implements_closed::<dyn Repository<Contact>>(family)
                .constructor(ConstructorDeclaration::builder().factory(|_| {
                    Ok(SharedInstance::new(
                        Arc::new(ContactRepository) as Arc<dyn Repository<Contact>>
                    ))
                })),
        );

    let mut container = container_with(vec![module]);
    container.map_family(family, Scope::Singleton).unwrap();

    let account = container.get_service::<dyn Repository<Account>>().unwrap();
    let contact = container.get_service::<dyn Repository<Contact>>().unwrap();
    assert_eq!(account.entity(), "account");
    assert_eq!(contact.entity(), "contact");
}

#[test]
fn family_mapping_without_closed_forms_fails() {
    let mut container = container_with(vec![clock_module()]);
    assert!(matches!(
        container.map_family(TypeKey::of::<RepositoryFamily>(), Scope::Singleton),
        Err(DependencyError::RegistrationError { .. })
    ));
}

// ---------------------------------------------------------------------
// 组合类型
// ---------------------------------------------------------------------

trait Notifier: Send + Sync {
    fn channels(&self) -> Vec<&'static str>;
}

struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channels(&self) -> Vec<&'static str> {
        vec!["email"]
    }
}

struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn channels(&self) -> Vec<&'static str> {
        vec!["sms"]
    }
}

/// 组合类型：注入自身接口的序列
struct BroadcastNotifier {
    members: Vec<Arc<dyn Notifier>>,
}

impl Notifier for BroadcastNotifier {
    fn channels(&self) -> Vec<&'static str> {
        self.members
            .iter()
            .flat_map(|member| member.channels())
            .collect()
    }
}

fn broadcast_declaration() -> TypeDeclaration {
    TypeDeclaration::of::<BroadcastNotifier>()
        .implements::<dyn Notifier>()
        .constructor(
            ConstructorDeclaration::builder()
                .sequence::<dyn Notifier>()
                .factory(|mut args| {
                    let members = args.take_sequence::<dyn Notifier>()?;
                    Ok(SharedInstance::new(
                        Arc::new(BroadcastNotifier { members }) as Arc<dyn Notifier>,
                    ))
                }),
        )
}

fn notifier_module() -> TypeModule {
    TypeModule::new("notifiers")
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
        .declare(broadcast_declaration())
}

#[test]
fn plain_mapping_of_a_composite_type_is_detected_automatically() {
    let mut container = container_with(vec![notifier_module()]);
    container
        .map::<dyn Notifier, BroadcastNotifier>(Scope::Singleton)
        .unwrap();

    let notifier = container.get_service::<dyn Notifier>().unwrap();
    // 成员不包含组合类型自身
    assert_eq!(notifier.channels(), vec!["email", "sms"]);
}

#[test]
fn composite_without_other_implementers_gets_an_empty_sequence() {
    let module = TypeModule::new("notifiers").declare(broadcast_declaration());
    let mut container = container_with(vec![module]);
    container
        .map_composite::<dyn Notifier, BroadcastNotifier>(Scope::Singleton)
        .unwrap();

    let notifier = container.get_service::<dyn Notifier>().unwrap();
    assert!(notifier.channels().is_empty());
}

// ---------------------------------------------------------------------
// 循环依赖与深度保护
// ---------------------------------------------------------------------

trait Ping: Send + Sync {}
trait Pong: Send + Sync {}

struct PingImpl {
    _pong: Arc<dyn Pong>,
}

struct PongImpl {
    _ping: Arc<dyn Ping>,
}

impl Ping for PingImpl {}
impl Pong for PongImpl {}

fn cyclic_module() -> TypeModule {
    TypeModule::new("cyclic")
        .declare(
            TypeDeclaration::of::<PingImpl>()
                .implements::<dyn Ping>()
                .constructor(
                    ConstructorDeclaration::builder()
                        .scalar::<dyn Pong>()
                        .factory(|mut args| {
                            let pong = args.take::<dyn Pong>()?;
                            Ok(SharedInstance::new(
                                Arc::new(PingImpl { _pong: pong }) as Arc<dyn Ping>
                            ))
                        }),
                ),
        )
        .declare(
            TypeDeclaration::of::<PongImpl>()
                .implements::<dyn Pong>()
                .constructor(
                    ConstructorDeclaration::builder()
                        .scalar::<dyn Ping>()
                        .factory(|mut args| {
                            let ping = args.take::<dyn Ping>()?;
                            Ok(SharedInstance::new(
                                Arc::new(PongImpl { _ping: ping }) as Arc<dyn Pong>
                            ))
                        }),
                ),
        )
}

#[test]
fn cyclic_dependency_is_reported_with_the_chain() {
    let mut container = container_with(vec![cyclic_module()]);
    container.map::<dyn Ping, PingImpl>(Scope::Singleton).unwrap();
    container.map::<dyn Pong, PongImpl>(Scope::Singleton).unwrap();

    match container.get_service::<dyn Ping>() {
        Err(DependencyError::CircularDependency { dependency_chain }) => {
            assert!(dependency_chain.contains("Ping"));
            assert!(dependency_chain.contains("Pong"));
        }
        other => panic!("意外的解析结果: {:?}", other.map(|_| ())),
    }
}

#[test]
fn depth_guard_takes_over_when_cycle_detection_is_disabled() {
    let config = ContainerConfig {
        enable_circular_dependency_detection: false,
        max_resolution_depth: 8,
    };
    let mut container = ContainerBuilder::new()
        .with_module(cyclic_module())
        .with_config(config)
        .build()
        .unwrap();
    container.map::<dyn Ping, PingImpl>(Scope::Singleton).unwrap();
    container.map::<dyn Pong, PongImpl>(Scope::Singleton).unwrap();

    assert!(matches!(
        container.get_service::<dyn Ping>(),
        Err(DependencyError::ResolutionDepthExceeded { .. })
    ));
}

// ---------------------------------------------------------------------
// 构造函数数量
// ---------------------------------------------------------------------

#[test]
fn mapping_a_type_without_constructors_fails_with_arity_error() {
    let module = TypeModule::new("bare")
        .declare(TypeDeclaration::of::<ConsoleLogger>().implements::<dyn Logger>());
    let mut container = container_with(vec![module]);

    assert!(matches!(
        container.map::<dyn Logger, ConsoleLogger>(Scope::Singleton),
        Err(DependencyError::ConstructorArity { count: 0, .. })
    ));
}

// ---------------------------------------------------------------------
// 延迟实例
// ---------------------------------------------------------------------

#[test]
fn deferred_mapping_initializes_once_on_first_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut container = container_with(vec![]);
    container
        .map_deferred::<dyn Clock, _>(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(FixedClock { value: 99 }) as Arc<dyn Clock>
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let first = container.get_service::<dyn Clock>().unwrap();
    let second = container.get_service::<dyn Clock>().unwrap();
    assert_eq!(first.now(), 99);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------
// 生命周期
// ---------------------------------------------------------------------

trait Connection: Disposable + Send + Sync {
    fn name(&self) -> &'static str;
}

struct TrackedConnection {
    name: &'static str,
    log: Arc<parking_lot::Mutex<Vec<&'static str>>>,
}

impl Connection for TrackedConnection {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl Disposable for TrackedConnection {
    fn dispose(&self) -> LifecycleResult<()> {
        self.log.lock().push(self.name);
        Ok(())
    }
}

trait Session: Disposable + Send + Sync {}

struct TrackedSession {
    log: Arc<parking_lot::Mutex<Vec<&'static str>>>,
}

impl Session for TrackedSession {}

impl Disposable for TrackedSession {
    fn dispose(&self) -> LifecycleResult<()> {
        self.log.lock().push("session");
        Ok(())
    }
}

#[test]
fn dispose_releases_instances_in_reverse_registration_order() {
    let log = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let mut container = container_with(vec![]);
    container
        .map_instance_disposable::<dyn Connection>(Arc::new(TrackedConnection {
            name: "primary",
            log: Arc::clone(&log),
        }))
        .unwrap();
    container
        .map_instance_disposable::<dyn Session>(Arc::new(TrackedSession {
            log: Arc::clone(&log),
        }))
        .unwrap();

    container.dispose();
    assert_eq!(*log.lock(), vec!["session", "primary"]);
}

#[test]
fn constructed_singleton_with_release_hook_is_disposed() {
    let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);

    let module = TypeModule::new("connections").declare(
        TypeDeclaration::of::<TrackedConnection>()
            .implements::<dyn Connection>()
            .disposable::<dyn Connection>()
            .constructor(ConstructorDeclaration::builder().factory(move |_| {
                Ok(SharedInstance::new(Arc::new(TrackedConnection {
                    name: "pooled",
                    log: Arc::clone(&sink),
                }) as Arc<dyn Connection>))
            })),
    );

    let mut container = container_with(vec![module]);
    container
        .map::<dyn Connection, TrackedConnection>(Scope::Singleton)
        .unwrap();

    container.get_service::<dyn Connection>().unwrap();
    container.dispose();
    assert_eq!(*log.lock(), vec!["pooled"]);
}

// ---------------------------------------------------------------------
// 统计信息
// ---------------------------------------------------------------------

#[test]
fn stats_track_resolutions_and_errors() {
    let mut container = container_with(vec![clock_module()]);
    container
        .map::<dyn Clock, FixedClock>(Scope::Singleton)
        .unwrap();

    container.get_service::<dyn Clock>().unwrap();
    let _ = container.get_service::<dyn Logger>();

    let stats = container.stats();
    assert_eq!(stats.registered_mappings, 1);
    assert_eq!(stats.resolved_components, 1);
    assert_eq!(stats.resolution_errors, 1);
    assert_eq!(stats.active_singletons, 1);
}
