//! Fly camera driven by keyboard, mouse and scroll wheel
//!
//! Orientation is kept as yaw and pitch in degrees; the front, right and up
//! vectors are recomputed whenever either changes. The view matrix is a
//! right-handed look-at from the position along the front vector.

use crate::foundation::math::{self, Mat4, Vec3};

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_FOV: f32 = 45.0;

/// Pitch limit in degrees, keeps the view from flipping over the poles
pub const MAX_PITCH: f32 = 89.0;
/// Smallest field of view reachable by zooming, in degrees
pub const MIN_FOV: f32 = 1.0;
/// Largest field of view, in degrees
pub const MAX_FOV: f32 = 45.0;

/// Keyboard movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Along the front vector
    Forward,
    /// Against the front vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// First-person fly camera
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    fov: f32,
}

impl Camera {
    /// Camera at `position` looking along `front`, with `up` as world up
    ///
    /// Yaw starts at -90 degrees, which also looks down -Z; the first mouse
    /// movement recomputes `front` from yaw and pitch.
    pub fn new(position: Vec3, up: Vec3, front: Vec3) -> Self {
        let world_up = up.normalize();
        let front = front.normalize();
        let right = front.cross(&world_up).normalize();
        Self {
            position,
            front,
            up: right.cross(&front).normalize(),
            right,
            world_up,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov: DEFAULT_FOV,
        }
    }

    /// Move `speed * delta_time` units in `direction`
    pub fn move_toward(&mut self, direction: Movement, delta_time: f32) {
        let distance = self.speed * delta_time;
        match direction {
            Movement::Forward => self.position += self.front * distance,
            Movement::Backward => self.position -= self.front * distance,
            Movement::Left => self.position -= self.right * distance,
            Movement::Right => self.position += self.right * distance,
        }
    }

    /// Turn by cursor offsets in pixels
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.update_vectors();
    }

    /// Narrow the field of view by a scroll offset
    pub fn zoom(&mut self, y_offset: f32) {
        self.fov = (self.fov - y_offset).clamp(MIN_FOV, MAX_FOV);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (math::deg_to_rad(self.yaw), math::deg_to_rad(self.pitch));
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    /// Perspective projection for `aspect` with this camera's field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        math::perspective(self.fov_radians(), aspect, near, far)
    }

    /// Vertical field of view in degrees
    pub const fn fov(&self) -> f32 {
        self.fov
    }

    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f32 {
        math::deg_to_rad(self.fov)
    }

    /// World-space position
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction
    pub const fn front(&self) -> Vec3 {
        self.front
    }

    /// Yaw and pitch in degrees
    pub const fn angles(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}

/// Turns absolute cursor positions into look offsets
///
/// The y offset is reversed because window y grows downwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    /// Offsets since the previous sample; the first sample yields none
    pub fn offset(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }

    /// Forget the last position, e.g. after the cursor was released
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::y(), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_defaults() {
        let camera = camera();
        assert_eq!(camera.angles(), (-90.0, 0.0));
        assert_relative_eq!(camera.fov(), 45.0);
        assert_relative_eq!(camera.right, Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_forward_moves_along_front_at_speed() {
        let mut camera = camera();
        camera.move_toward(Movement::Forward, 0.5);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 1.75), epsilon = 1e-6);
        camera.move_toward(Movement::Right, 1.0);
        assert_relative_eq!(camera.position(), Vec3::new(2.5, 0.0, 1.75), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_look_keeps_default_front() {
        let mut camera = camera();
        camera.look(0.0, 0.0);
        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = camera();
        camera.look(0.0, 10_000.0);
        assert_relative_eq!(camera.angles().1, MAX_PITCH);
        camera.look(0.0, -20_000.0);
        assert_relative_eq!(camera.angles().1, -MAX_PITCH);
        assert!(camera.front().y < 0.0);
    }

    #[test]
    fn test_look_scales_by_sensitivity() {
        let mut camera = camera();
        camera.look(900.0, 0.0);
        // yaw -90 + 90 = 0 looks down +X
        assert_relative_eq!(camera.front(), Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = camera();
        camera.zoom(10.0);
        assert_relative_eq!(camera.fov(), 35.0);
        camera.zoom(100.0);
        assert_relative_eq!(camera.fov(), MIN_FOV);
        camera.zoom(-100.0);
        assert_relative_eq!(camera.fov(), MAX_FOV);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = camera();
        let eye = camera.view_matrix().transform_point(&math::Point3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_cursor_first_sample_is_still() {
        let mut tracker = CursorTracker::default();
        assert_eq!(tracker.offset(400.0, 300.0), (0.0, 0.0));
        assert_eq!(tracker.offset(410.0, 290.0), (10.0, 10.0));
        tracker.reset();
        assert_eq!(tracker.offset(0.0, 0.0), (0.0, 0.0));
    }
}
