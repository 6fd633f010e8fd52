pub mod fixtures;
pub mod mock;

/// Route `tracing` output to the test harness; set `RUST_LOG` to see it
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
