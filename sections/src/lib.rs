//! Shared scaffolding for the LearnOpenGL section binaries
//!
//! Every binary under `src/bin` opens a window through [`start`], builds its
//! programs with [`program`] and, when it has a fly camera, drives it with a
//! [`FlyController`]. Paths to shaders and images come from
//! [`SectionsConfig`], which is read from `sections.toml` in the working
//! directory when that file exists.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod geometry;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gl::types::GLint;
use glfw::{Action, Key, WindowEvent};
use learn_opengl::config::{Config, ConfigError, ContextConfig};
use learn_opengl::foundation::{logging, math::Vec3, time::FrameTimer};
use learn_opengl::render::buffer::ArrayBuffer;
use learn_opengl::render::camera::{Camera, CursorTracker, Movement};
use learn_opengl::render::context::Context;
use learn_opengl::render::error::GlResult;
use learn_opengl::render::program::{Program, ShaderStage};
use learn_opengl::render::state;
use learn_opengl::render::texture::{Texture, TextureUnit};
use learn_opengl::render::vertex_array::VertexArray;
use serde::{Deserialize, Serialize};

/// Keys that move the fly camera
pub const MOVEMENT_KEYS: [Key; 4] = [Key::W, Key::S, Key::A, Key::D];

/// Near clip plane shared by every perspective section
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane shared by every perspective section
pub const FAR_PLANE: f32 = 100.0;

/// Settings shared by all section binaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Window override; each section picks its own size and title when absent
    pub window: Option<ContextConfig>,
    /// Directory holding textures and models
    pub resource_dir: PathBuf,
    /// Directory holding GLSL sources
    pub shader_dir: PathBuf,
    /// Initial fly-camera position
    pub camera_position: [f32; 3],
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            window: None,
            resource_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/resource")),
            shader_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
            camera_position: [0.0, 0.0, 3.0],
        }
    }
}

impl Config for SectionsConfig {}

impl SectionsConfig {
    /// File looked up in the working directory
    pub const FILE: &'static str = "sections.toml";

    /// Read [`Self::FILE`], falling back to the defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::FILE)
    }

    /// Window settings, using the section's own size and title unless overridden
    pub fn window_or(&self, width: u32, height: u32, title: &str) -> ContextConfig {
        self.window
            .clone()
            .unwrap_or_else(|| ContextConfig::new(width, height, title))
    }

    /// Path of a texture or model file
    pub fn resource(&self, name: impl AsRef<Path>) -> PathBuf {
        self.resource_dir.join(name)
    }

    /// Path of a shader source file
    pub fn shader(&self, name: impl AsRef<Path>) -> PathBuf {
        self.shader_dir.join(name)
    }

    /// Fly camera at [`Self::camera_position`] looking down -Z
    pub fn camera(&self) -> Camera {
        let [x, y, z] = self.camera_position;
        Camera::new(Vec3::new(x, y, z), Vec3::y(), Vec3::new(0.0, 0.0, -1.0))
    }
}

/// Initialise logging, load the configuration and open the window
pub fn start(title: &str, width: u32, height: u32) -> Result<(SectionsConfig, Context), Box<dyn Error>> {
    logging::init();
    let config = SectionsConfig::load().map_err(|e| {
        log::error!("failed to read {}: {}", SectionsConfig::FILE, e);
        e
    })?;
    let window = config.window_or(width, height, title);
    let context = Context::create(&window)?;
    log::info!("{}", startup_message(&config, &window));
    Ok((config, context))
}

/// Line logged once a section's window is open
pub fn startup_message(config: &SectionsConfig, window: &ContextConfig) -> String {
    format!(
        "Section \"{}\" started at {}x{}, resources in {}",
        window.title,
        window.width,
        window.height,
        config.resource_dir.display()
    )
}

/// Program built from a vertex and a fragment shader in the shader directory
pub fn program(config: &SectionsConfig, vertex: &str, fragment: &str) -> GlResult<Program> {
    let mut program = Program::new()?;
    program.attach_shader_file(ShaderStage::Vertex, config.shader(vertex))?;
    program.attach_shader_file(ShaderStage::Fragment, config.shader(fragment))?;
    Ok(program)
}

/// 2D texture from the resource directory with linear filtering and `wrap` on both axes
pub fn texture(config: &SectionsConfig, unit: TextureUnit, name: &str, wrap: GLint) -> GlResult<Rc<Texture>> {
    let texture = Texture::from_file_2d(unit, config.resource(name))?;
    texture.set_parameter(gl::TEXTURE_WRAP_S, wrap)?;
    texture.set_parameter(gl::TEXTURE_WRAP_T, wrap)?;
    texture.set_parameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint)?;
    texture.set_parameter(gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint)?;
    Ok(Rc::new(texture))
}

/// Upload interleaved floats into a new vertex array
///
/// `attributes` lists the component count of each attribute in order; they
/// take consecutive locations starting at 0. The buffer must outlive every
/// draw from the returned vertex array.
pub fn upload_vertices(data: &[f32], attributes: &[i32]) -> GlResult<(Rc<VertexArray>, ArrayBuffer<f32>)> {
    let stride: i32 = attributes.iter().sum();
    let vertex_array = VertexArray::new(true)?;
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(data)?;
    let mut offset = 0;
    for (index, &size) in attributes.iter().enumerate() {
        vertex_buffer.vertex_attribute_pointer_simple_offset(index as u32, size, stride, offset)?;
        offset += size as usize;
    }
    vertex_array.unbind()?;
    Ok((Rc::new(vertex_array), vertex_buffer))
}

/// Movement bound to `key`, if any
pub const fn movement_for_key(key: Key) -> Option<Movement> {
    match key {
        Key::W => Some(Movement::Forward),
        Key::S => Some(Movement::Backward),
        Key::A => Some(Movement::Left),
        Key::D => Some(Movement::Right),
        _ => None,
    }
}

/// Resize the viewport with the framebuffer and close on Escape
pub fn handle_window_event(context: &mut Context, event: &WindowEvent) -> GlResult<()> {
    match *event {
        WindowEvent::FramebufferSize(width, height) => state::viewport(0, 0, width, height),
        WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
            context.set_should_close(true);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Handle the pending events of a section without a camera
pub fn process_events(context: &mut Context) -> GlResult<()> {
    for event in context.flush_events() {
        handle_window_event(context, &event)?;
    }
    Ok(())
}

/// Camera driven by WASD, mouse look and scroll zoom
pub struct FlyController {
    /// Camera being driven
    pub camera: Camera,
    cursor: CursorTracker,
    timer: FrameTimer,
}

impl FlyController {
    /// Capture the cursor and take control of `camera`
    pub fn new(context: &mut Context, camera: Camera) -> Self {
        context.set_cursor_captured(true);
        Self {
            camera,
            cursor: CursorTracker::default(),
            timer: FrameTimer::new(),
        }
    }

    /// Start a frame: handle events and apply held movement keys
    ///
    /// Returns the seconds since the previous frame.
    pub fn update(&mut self, context: &mut Context) -> GlResult<f32> {
        let delta_time = self.timer.tick();
        for event in context.flush_events() {
            handle_window_event(context, &event)?;
            self.handle_event(&event);
        }
        for key in MOVEMENT_KEYS {
            if context.is_key_pressed(key) {
                if let Some(direction) = movement_for_key(key) {
                    self.camera.move_toward(direction, delta_time);
                }
            }
        }
        Ok(delta_time)
    }

    /// Apply a cursor or scroll event to the camera
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y) => {
                let (x_offset, y_offset) = self.cursor.offset(x, y);
                self.camera.look(x_offset, y_offset);
            }
            WindowEvent::Scroll(_, y_offset) => self.camera.zoom(y_offset as f32),
            _ => {}
        }
    }

    /// Perspective projection for the current framebuffer
    pub fn projection(&self, context: &Context) -> learn_opengl::foundation::math::Mat4 {
        self.camera.projection_matrix(context.aspect_ratio(), NEAR_PLANE, FAR_PLANE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_point_into_the_crate() {
        let config = SectionsConfig::default();
        assert!(config.shader("material.vs").ends_with("shaders/material.vs"));
        assert!(config.resource("container.jpg").ends_with("resource/container.jpg"));
        assert!(config.window.is_none());
    }

    #[test]
    fn test_window_override() {
        let config = SectionsConfig::default();
        let window = config.window_or(1280, 740, "blur");
        assert_eq!((window.width, window.height), (1280, 740));
        assert_eq!(window.title, "blur");

        let text = "resource_dir = \"assets\"\n\n[window]\nwidth = 640\nheight = 480\n";
        let config = SectionsConfig::parse(Path::new("sections.toml"), text).unwrap();
        let window = config.window_or(1280, 740, "blur");
        assert_eq!((window.width, window.height), (640, 480));
        assert_eq!(window.title, "LearnOpenGL");
        assert_eq!(config.resource("metal.png"), PathBuf::from("assets/metal.png"));
    }

    #[test]
    fn test_startup_message_names_window_and_resources() {
        let config = SectionsConfig {
            resource_dir: PathBuf::from("assets"),
            ..SectionsConfig::default()
        };
        let window = config.window_or(1280, 740, "framebuffers");
        assert_eq!(
            startup_message(&config, &window),
            "Section \"framebuffers\" started at 1280x740, resources in assets"
        );
    }

    #[test]
    fn test_camera_starts_at_configured_position() {
        let config = SectionsConfig {
            camera_position: [1.0, 2.0, 5.0],
            ..SectionsConfig::default()
        };
        assert_relative_eq!(config.camera().position(), Vec3::new(1.0, 2.0, 5.0));
        assert_relative_eq!(SectionsConfig::default().camera().front(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(movement_for_key(Key::W), Some(Movement::Forward));
        assert_eq!(movement_for_key(Key::S), Some(Movement::Backward));
        assert_eq!(movement_for_key(Key::A), Some(Movement::Left));
        assert_eq!(movement_for_key(Key::D), Some(Movement::Right));
        assert_eq!(movement_for_key(Key::Q), None);
        assert!(MOVEMENT_KEYS.iter().all(|&key| movement_for_key(key).is_some()));
    }
}
