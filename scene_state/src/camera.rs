//! Free-look camera and the particle model transform.
//!
//! Both are written by the gesture core and read by the renderer; neither
//! knows anything about hands.

use glam::Vec3;

/// Pitch stays this far short of straight up/down so yaw never flips.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

/// Where every scene change puts the camera.
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 5.0, 20.0);

/// Yaw/pitch camera (Euler order YXZ, no roll).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreeLookCamera {
    pub position: Vec3,
    yaw:          f32,
    pitch:        f32,
}

impl Default for FreeLookCamera {
    fn default() -> Self {
        FreeLookCamera { position: HOME_POSITION, yaw: 0.0, pitch: 0.0 }
    }
}

impl FreeLookCamera {
    pub fn new() -> Self {
        FreeLookCamera::default()
    }

    pub fn reset(&mut self) {
        *self = FreeLookCamera::default();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Add to yaw and pitch; pitch is clamped to ±[`PITCH_LIMIT`].
    pub fn look(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit view direction.  Yaw 0, pitch 0 looks down −z.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Horizontal right vector; ignores pitch.
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// Position / rotation / uniform scale of the particle text model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub position: Vec3,
    /// Euler angles in radians; only x and y are driven by gestures.
    pub rotation: Vec3,
    pub scale:    f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        ModelTransform { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: 1.0 }
    }
}

impl ModelTransform {
    pub fn reset(&mut self) {
        *self = ModelTransform::default();
    }
}
