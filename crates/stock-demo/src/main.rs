//! Stock item walkthrough entry point.

use std::process::ExitCode;

use stock_demo::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Run the scenario
    tracing::info!(sequence = %config.sequence_id, "running stock item scenario");
    let report = match stock_demo::run(&config) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = %err, "scenario failed");
            return ExitCode::FAILURE;
        }
    };

    println!("immutable:\n{}", report.immutable_commit);
    println!("mutable:\n{}", report.mutable_commit);

    // 4. Dump the counters recorded along the way
    tracing::debug!(metrics = %metrics_handle.render(), "metrics snapshot");

    ExitCode::SUCCESS
}
