use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// `#[traced_test]` filters out events from other crates, and each
/// integration test file is its own crate, so events from `chainvault`
/// would be dropped.
///
/// Call this at the start of each test instead. There can be only one
/// global default subscriber, so don't combine the two.
pub fn tracing_logger() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("self=trace,chainvault=trace"));
    let subscriber = FmtSubscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(env_filter)
        .with_thread_ids(true)
        .with_test_writer()
        .finish();

    // fails when another test in this process got there first
    let _result = tracing::subscriber::set_global_default(subscriber);
}
