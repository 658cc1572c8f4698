//! Injected diagnostics for the patch pipeline.
//!
//! Each stage reports what it produced through a [`Diagnostics`] sink handed
//! to the [`Differ`](crate::Differ). The core never writes to global logging
//! state on its own: pass [`TracingDiagnostics`] to route events into
//! `tracing`, [`NoDiagnostics`] to drop them, or any `Fn(&StageEvent)` to
//! capture them in tests.

use tracing::debug;

use crate::error::Stage;

/// What a pipeline stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    /// Number of hunks (script) or patches (other stages) produced.
    pub len: usize,
    /// Compact shape, e.g. `E3D1I1,E7I3` (kind initial + line count per hunk,
    /// patches separated by commas).
    pub shape: String,
}

/// Receiver of pipeline events.
pub trait Diagnostics {
    fn record(&self, event: &StageEvent);
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: &StageEvent) {
        debug!(
            stage = %event.stage,
            len = event.len,
            shape = event.shape.as_str(),
            "diff stage complete"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn record(&self, _event: &StageEvent) {}
}

impl<F> Diagnostics for F
where
    F: Fn(&StageEvent),
{
    fn record(&self, event: &StageEvent) {
        self(event);
    }
}
