//! Radar-style GPS waypoint overlay rendering.
//!
//! The crate projects named 3D waypoints into an observer's local plane
//! and assembles per-frame sprite command lists for script-driven display
//! surfaces.  Display hardware and host integration are intentionally kept
//! outside of the crate: sinks are consumed through the [`DisplaySurface`]
//! trait so the pipeline remains testable and easy to embed in headless
//! tools.

pub mod config;
pub mod frame;
pub mod marks;
pub mod projector;
pub mod scheduler;
pub mod sprite;
pub mod surface;

pub use config::MapConfig;
pub use frame::{
    render_frame, AlwaysFlush, FlushPolicy, FrameStats, MillisParity, NeverFlush, RenderError,
    TargetKind, NO_DATA_MESSAGE,
};
pub use marks::{parse_custom_data, GpsMark};
pub use projector::{observer_transform, project, surface_center, surface_radius, ProjectionError};
pub use scheduler::{
    render_targets, should_refresh, RenderTarget, TargetReport, DEFAULT_REFRESH_INTERVAL,
};
pub use sprite::{DrawCommand, Rgba, TextAlignment};
pub use surface::{ContentMode, DisplaySurface, RecordingSurface, SpriteFrame, SubmitError};
