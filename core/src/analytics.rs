//! Fire-and-forget usage events.

use tracing::info;

/// Receives user-action events. Implementations must not fail or block.
pub trait Sink {
    fn track(&self, event: &str, props: &[(&str, &str)]);
}

/// Emits every event as a `tracing` event under the `analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn track(&self, event: &str, props: &[(&str, &str)]) {
        let props = props
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(target: "analytics", event, props = %props);
    }
}
