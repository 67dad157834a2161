use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Route `tracing` events to the browser console.
///
/// Safe to call more than once; only the first subscriber is kept.
pub fn init(max_level: Level) {
    let layer_config = WASMLayerConfigBuilder::new()
        .set_max_level(max_level)
        .set_report_logs_in_timings(false)
        .build();

    if tracing_subscriber::registry()
        .with(WASMLayer::new(layer_config))
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}
