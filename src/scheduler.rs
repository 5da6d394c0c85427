//! Thin tick driver: refresh gating and the per-tick pass over every
//! render target. The last-render timestamp is owned by the caller and
//! threaded through, never stored here.

use std::time::{Duration, Instant};

use glam::DMat4;
use log::{info, warn};

use crate::config::MapConfig;
use crate::frame::{render_frame, FlushPolicy, FrameStats, RenderError, TargetKind};
use crate::surface::DisplaySurface;

/// Default minimum delay between radar refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// One display surface plus the state needed to render it.
pub struct RenderTarget {
    pub label: String,
    pub kind: TargetKind,
    /// Observer world transform, sourced fresh each tick; the observer may
    /// be moving.
    pub observer: DMat4,
    pub custom_data: String,
    pub surface: Box<dyn DisplaySurface>,
}

/// Outcome of rendering a single target during one tick.
#[derive(Debug)]
pub struct TargetReport {
    pub label: String,
    pub outcome: Result<FrameStats, RenderError>,
}

/// Minimum-interval refresh gate.
pub fn should_refresh(now: Instant, last: Option<Instant>, interval: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.duration_since(last) >= interval,
    }
}

/// Renders every target in order. A failure on one target is logged and
/// reported without stopping the remaining targets.
pub fn render_targets(
    targets: &mut [RenderTarget],
    flush_policy: &dyn FlushPolicy,
) -> Vec<TargetReport> {
    targets
        .iter_mut()
        .map(|target| {
            info!("Rendering '{}'", target.label);
            // Config is re-read every tick; the blob may have been edited.
            let config = MapConfig::from_custom_data(&target.custom_data);
            let outcome = render_frame(
                target.surface.as_mut(),
                &target.observer,
                target.kind,
                &config,
                &target.custom_data,
                flush_policy,
            );
            if let Err(err) = &outcome {
                warn!("Skipping '{}': {err}", target.label);
            }
            TargetReport {
                label: target.label.clone(),
                outcome,
            }
        })
        .collect()
}
