#![allow(non_snake_case)]

use super::*;

#[test]
fn RuntimeConfig___default___has_expected_values() {
    let config = RuntimeConfig::default();

    assert!(config.worker_threads.is_none());
    assert_eq!(config.thread_name, "napigen-worker");
    assert_eq!(config.max_blocking_threads, 4);
}

#[test]
fn RuntimeConfig___builder_chain___combines_options() {
    let config = RuntimeConfig::new()
        .with_worker_threads(2)
        .with_thread_name("test-worker")
        .with_max_blocking_threads(8);

    assert_eq!(config.worker_threads, Some(2));
    assert_eq!(config.thread_name, "test-worker");
    assert_eq!(config.max_blocking_threads, 8);
}

#[test]
fn AsyncRuntime___new___keeps_config() {
    let runtime = AsyncRuntime::new(RuntimeConfig::new().with_worker_threads(1)).unwrap();

    assert_eq!(runtime.config().worker_threads, Some(1));
}

#[test]
fn AsyncRuntime___block_on___runs_blocking_work_on_pool() {
    let runtime = AsyncRuntime::with_defaults().unwrap();
    let handle = runtime.handle();

    let name = runtime.block_on(async move {
        handle
            .spawn_blocking(|| std::thread::current().name().map(str::to_string))
            .await
            .unwrap()
    });

    assert_eq!(name.as_deref(), Some("napigen-worker"));
}

#[test]
fn AsyncRuntime___zero_blocking_threads___still_builds() {
    let runtime = AsyncRuntime::new(RuntimeConfig::new().with_max_blocking_threads(0));

    assert!(runtime.is_ok());
}
