use crate::skeleton::{Body, CameraSpacePoint};

/// Depth substituted for negative `z` values.
///
/// Inferred joints sometimes report a depth behind the sensor, which breaks
/// camera-to-depth-space projection.
pub const DEFAULT_Z_FLOOR: f32 = 0.1;

/// Replace a negative depth with `z_floor`. `x`, `y` and non-negative or NaN
/// depths pass through unchanged.
pub fn sanitize(position: CameraSpacePoint, z_floor: f32) -> CameraSpacePoint {
    if position.z < 0.0 {
        CameraSpacePoint {
            z: z_floor,
            ..position
        }
    } else {
        position
    }
}

/// Copy of `body` with every joint position sanitized.
pub fn sanitize_body(body: &Body, z_floor: f32) -> Body {
    let mut out = body.clone();
    for joint in out.joints.iter_mut() {
        joint.position = sanitize(joint.position, z_floor);
    }
    out
}
