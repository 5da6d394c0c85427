use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Texture id for a plain filled square.
pub const TEXTURE_SQUARE: &str = "SquareSimple";
/// Texture id for a filled triangle.
pub const TEXTURE_TRIANGLE: &str = "Triangle";
/// Texture id for a filled semicircle.
pub const TEXTURE_SEMICIRCLE: &str = "SemiCircle";
/// Texture id for the background grid.
pub const TEXTURE_GRID: &str = "Grid";

/// Font id used for waypoint labels.
pub const FONT_DEBUG: &str = "Debug";
/// Font id used for in-frame error messages.
pub const FONT_ALERT: &str = "Red";

/// Alpha applied to the grid and orientation glyphs.
const OVERLAY_ALPHA: f32 = 66.0 / 255.0;

/// Base tint for waypoint markers.
const MARKER_GREEN: Rgba = Rgba::new(0.501_960_8, 1.0, 0.501_960_8, 1.0);

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies the RGB channels, preserving alpha.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Replaces the alpha channel.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Center,
    Left,
}

/// One primitive visual instruction in a frame's ordered command list.
///
/// Commands render back-to-front in insertion order, so later entries
/// occlude earlier ones at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Texture {
        texture: String,
        position: Vec2,
        size: Vec2,
        color: Rgba,
        rotation: f32,
    },
    Text {
        text: String,
        position: Vec2,
        color: Rgba,
        font: String,
        alignment: TextAlignment,
        scale: f32,
    },
}

fn texture(id: &str, position: Vec2, size: Vec2, color: Rgba, rotation: f32) -> DrawCommand {
    DrawCommand::Texture {
        texture: id.to_string(),
        position,
        size,
        color,
        rotation,
    }
}

/// Waypoint marker: a pointer rectangle, an arrowhead rotated half a turn
/// against it, and a left-aligned label further along the rotation vector.
pub fn marker(
    center: Vec2,
    label: &str,
    scale: f32,
    rotation: f32,
    color_scale: f32,
) -> Vec<DrawCommand> {
    let (sin, cos) = rotation.sin_cos();
    let color = MARKER_GREEN.scaled(color_scale);
    vec![
        texture(
            TEXTURE_SQUARE,
            Vec2::new(-sin * -5.0, cos * -5.0) * scale + center,
            Vec2::new(2.0, 10.0) * scale,
            color,
            rotation,
        ),
        texture(
            TEXTURE_TRIANGLE,
            Vec2::new(cos * -1.0 - sin * -14.0, sin * -1.0 + cos * -14.0) * scale + center,
            Vec2::new(10.0, 10.0) * scale,
            color,
            std::f32::consts::PI + rotation,
        ),
        DrawCommand::Text {
            text: label.to_string(),
            position: Vec2::new(-sin * -36.0, cos * -36.0) * scale + center,
            color,
            font: FONT_DEBUG.to_string(),
            alignment: TextAlignment::Left,
            scale: 0.5 * scale,
        },
    ]
}

/// Centered error message at one-quarter height of the surface.
pub fn error_text(surface_size: Vec2, message: &str) -> Vec<DrawCommand> {
    vec![DrawCommand::Text {
        text: message.to_string(),
        position: Vec2::new(surface_size.x / 2.0, surface_size.y / 4.0),
        color: Rgba::WHITE,
        font: FONT_ALERT.to_string(),
        alignment: TextAlignment::Center,
        scale: 1.0,
    }]
}

/// Translucent full-surface grid in the surface's foreground color.
pub fn background_grid(surface_size: Vec2, foreground: Rgba) -> Vec<DrawCommand> {
    vec![texture(
        TEXTURE_GRID,
        surface_size / 2.0,
        surface_size,
        foreground.with_alpha(OVERLAY_ALPHA),
        0.0,
    )]
}

/// Directional antenna glyph: triangular base, semicircular dish, and a
/// small triangular stem, arranged around `center`.
pub fn antenna(
    foreground: Rgba,
    center: Vec2,
    scale: f32,
    rotation: f32,
    color_scale: f32,
) -> Vec<DrawCommand> {
    let (sin, cos) = rotation.sin_cos();
    let color = foreground.with_alpha(OVERLAY_ALPHA).scaled(color_scale);
    vec![
        texture(
            TEXTURE_TRIANGLE,
            Vec2::new(cos * -1.0 - sin * 8.0, sin * -1.0 + cos * 8.0) * scale + center,
            Vec2::new(10.0, 30.0) * scale,
            color,
            rotation,
        ),
        texture(
            TEXTURE_SEMICIRCLE,
            Vec2::new(cos * 4.0 - sin * -7.0, sin * 4.0 + cos * -7.0) * scale + center,
            Vec2::new(35.0, 20.0) * scale,
            color,
            4.0143 + rotation,
        ),
        texture(
            TEXTURE_TRIANGLE,
            Vec2::new(cos * 5.0 - sin * -7.0, sin * 5.0 + cos * -7.0) * scale + center,
            Vec2::new(5.0, 20.0) * scale,
            color,
            0.7854 + rotation,
        ),
    ]
}

/// Single triangle marking the observer's own position and heading.
pub fn vehicle_mark(foreground: Rgba, center: Vec2, scale: f32, color_scale: f32) -> Vec<DrawCommand> {
    vec![texture(
        TEXTURE_TRIANGLE,
        center,
        Vec2::new(10.0, 20.0) * scale,
        foreground.with_alpha(OVERLAY_ALPHA).scaled(color_scale),
        0.0,
    )]
}

/// Fully transparent full-surface sprite that forces sinks with aggressive
/// client-side caching to retransmit an otherwise unchanged sprite list.
pub fn cache_flush(surface_size: Vec2) -> Vec<DrawCommand> {
    vec![texture(
        TEXTURE_SQUARE,
        surface_size / 2.0,
        surface_size,
        Rgba::TRANSPARENT,
        0.0,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_emits_pointer_arrow_and_label() {
        let commands = marker(Vec2::new(100.0, 100.0), "Base", 1.0, 0.0, 1.0);
        assert_eq!(commands.len(), 3);
        match &commands[0] {
            DrawCommand::Texture {
                texture, position, ..
            } => {
                assert_eq!(texture, TEXTURE_SQUARE);
                assert_eq!(*position, Vec2::new(100.0, 95.0));
            }
            other => panic!("expected pointer texture, got {other:?}"),
        }
        match &commands[2] {
            DrawCommand::Text {
                text,
                position,
                alignment,
                scale,
                ..
            } => {
                assert_eq!(text, "Base");
                assert_eq!(*position, Vec2::new(100.0, 64.0));
                assert_eq!(*alignment, TextAlignment::Left);
                assert_eq!(*scale, 0.5);
            }
            other => panic!("expected label text, got {other:?}"),
        }
    }

    #[test]
    fn marker_is_deterministic() {
        let a = marker(Vec2::new(10.0, 20.0), "Relay", 2.0, 1.25, 1.5);
        let b = marker(Vec2::new(10.0, 20.0), "Relay", 2.0, 1.25, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn color_scale_preserves_alpha() {
        let tinted = Rgba::new(0.2, 0.4, 0.6, 0.8).scaled(1.5);
        assert_eq!(tinted.a, 0.8);
        assert!((tinted.g - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn background_grid_is_translucent_foreground() {
        let foreground = Rgba::new(1.0, 0.6, 0.0, 1.0);
        let commands = background_grid(Vec2::new(512.0, 512.0), foreground);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawCommand::Texture {
                texture,
                position,
                size,
                color,
                ..
            } => {
                assert_eq!(texture, TEXTURE_GRID);
                assert_eq!(*position, Vec2::new(256.0, 256.0));
                assert_eq!(*size, Vec2::new(512.0, 512.0));
                assert_eq!(color.r, foreground.r);
                assert!(color.a < 0.3);
            }
            other => panic!("expected grid texture, got {other:?}"),
        }
    }

    #[test]
    fn antenna_uses_three_shapes() {
        let commands = antenna(Rgba::WHITE, Vec2::new(50.0, 50.0), 1.0, 0.0, 1.5);
        assert_eq!(commands.len(), 3);
        let textures: Vec<_> = commands
            .iter()
            .map(|command| match command {
                DrawCommand::Texture { texture, .. } => texture.as_str(),
                DrawCommand::Text { .. } => panic!("antenna has no text"),
            })
            .collect();
        assert_eq!(
            textures,
            [TEXTURE_TRIANGLE, TEXTURE_SEMICIRCLE, TEXTURE_TRIANGLE]
        );
    }

    #[test]
    fn cache_flush_is_fully_transparent() {
        let commands = cache_flush(Vec2::new(256.0, 128.0));
        match &commands[0] {
            DrawCommand::Texture { size, color, .. } => {
                assert_eq!(*size, Vec2::new(256.0, 128.0));
                assert_eq!(*color, Rgba::TRANSPARENT);
            }
            other => panic!("expected clear sprite, got {other:?}"),
        }
    }
}
