//! Frame assembly: one render pass for one display surface.
//!
//! A pass primes the sink for script-driven sprites, optionally injects a
//! cache-clearing sprite, draws the background and the orientation glyph,
//! then one marker per waypoint (or an error glyph when there are none),
//! and submits the whole command list atomically.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::DMat4;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MapConfig;
use crate::marks;
use crate::projector::{self, ProjectionError};
use crate::sprite;
use crate::surface::{ContentMode, DisplaySurface, SpriteFrame, SubmitError};

/// Message drawn when the blob contains no usable waypoint.
pub const NO_DATA_MESSAGE: &str = "No GPS coordinates in custom data";

/// Which orientation glyph a render target gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Fixed panel acting as an antenna; draws the antenna glyph.
    Stationary,
    /// Moving observer such as a vehicle; draws its own heading triangle.
    Mobile,
}

/// Decides whether a pass starts with a cache-clearing transparent sprite.
///
/// The decision has no effect on the visible geometry; it only defeats
/// sinks that suppress retransmission of unchanged sprite lists.
pub trait FlushPolicy {
    fn should_flush(&self) -> bool;
}

/// Default policy: flush on even system-clock milliseconds (roughly half
/// of all passes).
#[derive(Debug, Default, Clone, Copy)]
pub struct MillisParity;

impl FlushPolicy for MillisParity {
    fn should_flush(&self) -> bool {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.subsec_millis())
            .unwrap_or(0);
        millis % 2 == 0
    }
}

/// Policy that always injects the flush sprite.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFlush;

impl FlushPolicy for AlwaysFlush {
    fn should_flush(&self) -> bool {
        true
    }
}

/// Policy that never injects the flush sprite.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverFlush;

impl FlushPolicy for NeverFlush {
    fn should_flush(&self) -> bool {
        false
    }
}

/// Reason a render pass was abandoned. Each failure is scoped to its own
/// surface; other targets in the same tick are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("observer transform is singular and cannot be inverted")]
    SingularTransform,
    #[error("detection radius must be positive, got {radius}")]
    InvalidDetectionRadius { radius: f64 },
    #[error("frame submission failed")]
    Submit(#[from] SubmitError),
}

impl From<ProjectionError> for RenderError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::Singular => Self::SingularTransform,
        }
    }
}

/// Summary of one completed render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub marks_drawn: usize,
    pub cache_flushed: bool,
}

/// Renders one frame onto `surface`.
///
/// `config` arrives already parsed from the configuration collaborator;
/// `custom_data` supplies the GPS lines. An empty waypoint set is a
/// normal steady state rendered as an in-frame message, not an error.
pub fn render_frame(
    surface: &mut dyn DisplaySurface,
    observer: &DMat4,
    kind: TargetKind,
    config: &MapConfig,
    custom_data: &str,
    flush_policy: &dyn FlushPolicy,
) -> Result<FrameStats, RenderError> {
    if config.detection_radius <= 0.0 {
        return Err(RenderError::InvalidDetectionRadius {
            radius: config.detection_radius,
        });
    }

    surface.set_content_mode(ContentMode::Script);
    surface.set_active_script("");
    if surface.supports_transparent_background() {
        debug!("Zeroing background alpha of transparent surface");
        surface.set_background_alpha(0.0);
    }

    let size = surface.surface_size();
    let center = projector::surface_center(size);
    let radius = projector::surface_radius(size);
    let foreground = surface.foreground_color();

    let mut frame = SpriteFrame::new(surface);
    let cache_flushed = flush_policy.should_flush();
    if cache_flushed {
        debug!("Injecting sprite cache flush");
        frame.extend(sprite::cache_flush(size));
    }

    frame.extend(sprite::background_grid(size, foreground));
    match kind {
        TargetKind::Stationary => frame.extend(sprite::antenna(foreground, center, 1.0, 0.0, 1.5)),
        TargetKind::Mobile => frame.extend(sprite::vehicle_mark(foreground, center, 1.0, 1.5)),
    }

    let marks = marks::parse_custom_data(custom_data);
    if marks.is_empty() {
        frame.extend(sprite::error_text(size, NO_DATA_MESSAGE));
        frame.submit()?;
        return Ok(FrameStats {
            marks_drawn: 0,
            cache_flushed,
        });
    }
    info!("{} coordinates", marks.len());

    for mark in &marks {
        let position = projector::project(
            mark.coords,
            observer,
            config.detection_radius,
            radius,
            center,
        )?;
        frame.extend(sprite::marker(position, &mark.name, 1.0, 0.0, 1.0));
    }

    frame.submit()?;
    Ok(FrameStats {
        marks_drawn: marks.len(),
        cache_flushed,
    })
}
