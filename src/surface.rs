//! Display sink contract and an in-memory implementation.
//!
//! Real display hardware lives outside the crate; the renderer only needs
//! the small surface of [`DisplaySurface`]. [`RecordingSurface`] backs the
//! tests and the headless CLI.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sprite::{DrawCommand, Rgba};

/// Content source selected on a display sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentMode {
    /// The sink renders its built-in content.
    None,
    /// The sink renders externally submitted draw commands.
    Script,
}

/// Error raised by a sink during frame submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("display surface rejected the frame: {0}")]
    Rejected(String),
    #[error("display surface is no longer reachable")]
    Detached,
}

/// Sink for one display surface.
///
/// Geometry queries feed the projection math; the mode setters prepare the
/// sink for script-driven sprites; `commit` accepts one complete frame.
pub trait DisplaySurface {
    /// Logical size used for centering and radius math.
    fn surface_size(&self) -> Vec2;

    /// Theme color for the grid and orientation glyphs.
    fn foreground_color(&self) -> Rgba;

    fn set_content_mode(&mut self, mode: ContentMode);

    /// Selects a built-in overlay script; the empty string deactivates it.
    fn set_active_script(&mut self, script: &str);

    fn supports_transparent_background(&self) -> bool;

    fn set_background_alpha(&mut self, alpha: f32);

    /// Accepts one complete, ordered frame in a single atomic submission.
    fn commit(&mut self, commands: Vec<DrawCommand>) -> Result<(), SubmitError>;
}

/// Per-pass draw-command buffer with guaranteed submit-or-discard.
///
/// Dropping the frame without calling [`SpriteFrame::submit`] discards the
/// buffered commands; nothing reaches the sink.
pub struct SpriteFrame<'a> {
    surface: &'a mut dyn DisplaySurface,
    commands: Vec<DrawCommand>,
}

impl<'a> SpriteFrame<'a> {
    pub fn new(surface: &'a mut dyn DisplaySurface) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    pub fn append(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hands the accumulated commands to the sink.
    pub fn submit(self) -> Result<(), SubmitError> {
        let Self { surface, commands } = self;
        surface.commit(commands)
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    content_mode: Option<ContentMode>,
    active_script: Option<String>,
    background_alpha: Option<f32>,
    frames: Vec<Vec<DrawCommand>>,
    fail_next_commit: bool,
}

/// In-memory display sink for tests and headless tooling.
///
/// Clones share the same recording buffer, so a host can keep a handle
/// while the renderer owns the sink.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    foreground: Rgba,
    transparent_capable: bool,
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            foreground: Rgba::WHITE,
            transparent_capable: false,
            state: Arc::new(RwLock::new(RecordingState::default())),
        }
    }

    pub fn with_foreground(mut self, color: Rgba) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_transparency_support(mut self, capable: bool) -> Self {
        self.transparent_capable = capable;
        self
    }

    /// Makes the next `commit` fail, for exercising submission errors.
    pub fn fail_next_commit(&self) {
        self.state.write().fail_next_commit = true;
    }

    /// Snapshot of every submitted frame, oldest first.
    pub fn frames(&self) -> Vec<Vec<DrawCommand>> {
        self.state.read().frames.clone()
    }

    pub fn last_frame(&self) -> Option<Vec<DrawCommand>> {
        self.state.read().frames.last().cloned()
    }

    pub fn content_mode(&self) -> Option<ContentMode> {
        self.state.read().content_mode
    }

    pub fn active_script(&self) -> Option<String> {
        self.state.read().active_script.clone()
    }

    pub fn background_alpha(&self) -> Option<f32> {
        self.state.read().background_alpha
    }
}

impl DisplaySurface for RecordingSurface {
    fn surface_size(&self) -> Vec2 {
        self.size
    }

    fn foreground_color(&self) -> Rgba {
        self.foreground
    }

    fn set_content_mode(&mut self, mode: ContentMode) {
        self.state.write().content_mode = Some(mode);
    }

    fn set_active_script(&mut self, script: &str) {
        self.state.write().active_script = Some(script.to_string());
    }

    fn supports_transparent_background(&self) -> bool {
        self.transparent_capable
    }

    fn set_background_alpha(&mut self, alpha: f32) {
        self.state.write().background_alpha = Some(alpha);
    }

    fn commit(&mut self, commands: Vec<DrawCommand>) -> Result<(), SubmitError> {
        let mut state = self.state.write();
        if state.fail_next_commit {
            state.fail_next_commit = false;
            return Err(SubmitError::Rejected("injected commit failure".into()));
        }
        state.frames.push(commands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite;

    #[test]
    fn submit_records_one_frame() {
        let mut surface = RecordingSurface::new(Vec2::new(256.0, 256.0));
        let handle = surface.clone();

        let mut frame = SpriteFrame::new(&mut surface);
        frame.extend(sprite::background_grid(Vec2::new(256.0, 256.0), Rgba::WHITE));
        frame.submit().unwrap();

        let frames = handle.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 1);
    }

    #[test]
    fn dropping_a_frame_discards_it() {
        let mut surface = RecordingSurface::new(Vec2::new(256.0, 256.0));
        let handle = surface.clone();

        let mut frame = SpriteFrame::new(&mut surface);
        frame.extend(sprite::cache_flush(Vec2::new(256.0, 256.0)));
        drop(frame);

        assert!(handle.frames().is_empty());
    }

    #[test]
    fn injected_commit_failure_fires_once() {
        let mut surface = RecordingSurface::new(Vec2::new(64.0, 64.0));
        surface.fail_next_commit();

        assert!(matches!(
            surface.commit(Vec::new()),
            Err(SubmitError::Rejected(_))
        ));
        assert!(surface.commit(Vec::new()).is_ok());
    }

    #[test]
    fn clones_share_recorded_state() {
        let mut surface = RecordingSurface::new(Vec2::new(64.0, 64.0));
        let handle = surface.clone();
        surface.set_content_mode(ContentMode::Script);
        surface.set_active_script("");

        assert_eq!(handle.content_mode(), Some(ContentMode::Script));
        assert_eq!(handle.active_script(), Some(String::new()));
    }
}
