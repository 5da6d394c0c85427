//! Top-down projection of world-space points onto a display surface.
//!
//! The observer's local X/Z plane is the radar plane; the local vertical
//! offset is discarded. A point exactly `detection_radius` away from the
//! observer lands exactly `surface_radius` pixels from the surface center.

use glam::{DMat4, DVec3, Vec2};
use thiserror::Error;

const DETERMINANT_EPSILON: f64 = 1e-12;

/// Error raised when the observer transform cannot be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("observer transform is singular and cannot be inverted")]
    Singular,
}

/// Visible radius of a surface: half of its shorter dimension.
pub fn surface_radius(size: Vec2) -> f32 {
    size.x.min(size.y) / 2.0
}

/// Drawing center of a surface.
pub fn surface_center(size: Vec2) -> Vec2 {
    size / 2.0
}

/// Builds an observer transform from a world position and a yaw (radians)
/// around the world up axis, for hosts that do not carry a full matrix.
pub fn observer_transform(position: DVec3, yaw: f64) -> DMat4 {
    DMat4::from_translation(position) * DMat4::from_rotation_y(yaw)
}

/// Projects `world` into the observer's local frame, flattens it onto the
/// local X/Z plane, and maps it into surface pixel coordinates.
///
/// Points beyond `detection_radius` project outside the visible surface
/// bounds; clipping them is the sink's business.
pub fn project(
    world: DVec3,
    observer: &DMat4,
    detection_radius: f64,
    surface_radius: f32,
    surface_center: Vec2,
) -> Result<Vec2, ProjectionError> {
    if observer.determinant().abs() < DETERMINANT_EPSILON {
        return Err(ProjectionError::Singular);
    }
    let local = observer.inverse().transform_point3(world);
    let planar = Vec2::new(local.x as f32, local.z as f32);
    let scale = surface_radius / detection_radius as f32;
    Ok(planar * scale + surface_center)
}
