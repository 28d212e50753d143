//! Window and GL context creation using GLFW
//!
//! [`Context::create`] opens a window with a core-profile context, loads the
//! GL function pointers and routes driver debug output into `log`. Dropping
//! the context destroys the window and terminates GLFW.

use std::ffi::c_void;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use glfw::{Action, Context as _, CursorMode, Key, OpenGlProfileHint, SwapInterval, WindowEvent, WindowHint, WindowMode};

use crate::config::ContextConfig;
use crate::render::error::{checked, GlError, GlResult};
use crate::render::state::{self, Capability};

/// Driver message IDs that carry no useful information
pub const IGNORED_DEBUG_IDS: [GLuint; 4] = [131_169, 131_185, 131_218, 131_204];

/// Open window with a current GL context
pub struct Context {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    glfw: glfw::Glfw,
    version: (u32, u32),
}

impl Context {
    /// Create the window, make its context current and load GL
    pub fn create(config: &ContextConfig) -> GlResult<Self> {
        config.validate().map_err(|e| GlError::Context(e.to_string()))?;

        let mut glfw = glfw::init(report_glfw_error).map_err(|e| {
            log::error!("glfwInit failed");
            GlError::Context(format!("glfwInit failed: {e:?}"))
        })?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlDebugContext(config.debug_context));
        #[cfg(target_os = "macos")]
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, WindowMode::Windowed)
            .ok_or_else(|| {
                log::error!("Failed to create GLFW window");
                GlError::Context(format!("window {}x{} could not be created", config.width, config.height))
            })?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync { SwapInterval::Sync(1) } else { SwapInterval::None });

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        if !gl::Viewport::is_loaded() {
            log::error!("Failed to load OpenGL function pointers");
            return Err(GlError::Context("OpenGL function pointers not loaded".to_string()));
        }

        window.set_framebuffer_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_key_polling(true);

        state::enable(Capability::DepthTest)?;
        install_debug_output()?;

        log::info!(
            "Created {}x{} window \"{}\" with OpenGL {}.{} core",
            config.width,
            config.height,
            config.title,
            major,
            minor
        );

        Ok(Self {
            window,
            events,
            glfw,
            version: (major, minor),
        })
    }

    /// Requested context version
    pub const fn version(&self) -> (u32, u32) {
        self.version
    }

    /// Whether the user asked to close the window
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request or cancel window close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Process pending window-system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain the events received since the last call
    pub fn flush_events(&self) -> Vec<WindowEvent> {
        glfw::flush_messages(&self.events).map(|(_, event)| event).collect()
    }

    /// Whether `key` is currently held
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.window.get_key(key) == Action::Press
    }

    /// Seconds since GLFW was initialised
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    /// Framebuffer width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.framebuffer_size();
        width as f32 / height.max(1) as f32
    }

    /// Hide and lock the cursor for mouse-look, or release it
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.window
            .set_cursor_mode(if captured { CursorMode::Disabled } else { CursorMode::Normal });
    }
}

fn report_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error code:{:?} description:{}", error, description);
}

fn install_debug_output() -> GlResult<()> {
    let mut flags: GLint = 0;
    // SAFETY: CONTEXT_FLAGS is a single integer query.
    unsafe { gl::GetIntegerv(gl::CONTEXT_FLAGS, &mut flags) };
    checked("glGetIntegerv")?;

    if (flags as GLenum) & gl::CONTEXT_FLAG_DEBUG_BIT == 0 {
        log::debug!("Context has no debug flag, skipping debug output");
        return Ok(());
    }
    if !gl::DebugMessageCallback::is_loaded() {
        log::warn!("Debug context without glDebugMessageCallback, skipping debug output");
        return Ok(());
    }

    // SAFETY: the callback is a plain function and ignores its user pointer.
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(debug_callback), ptr::null());
        gl::DebugMessageControl(gl::DONT_CARE, gl::DONT_CARE, gl::DONT_CARE, 0, ptr::null(), gl::TRUE);
    }
    checked("glDebugMessageCallback")
}

extern "system" fn debug_callback(
    source: GLenum,
    message_type: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if IGNORED_DEBUG_IDS.contains(&id) || message.is_null() {
        return;
    }

    // SAFETY: the driver passes `length` bytes of message text.
    let text = unsafe { std::slice::from_raw_parts(message.cast::<u8>(), length.max(0) as usize) };
    log::log!(
        severity_level(severity),
        "Debug message ({}): {} | Source: {} | Type: {} | Severity: {}",
        id,
        String::from_utf8_lossy(text).trim_end(),
        source_name(source),
        type_name(message_type),
        severity_name(severity)
    );
}

/// Name of a `GL_DEBUG_SOURCE_*` value
pub const fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

/// Name of a `GL_DEBUG_TYPE_*` value
pub const fn type_name(message_type: GLenum) -> &'static str {
    match message_type {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behaviour",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behaviour",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        gl::DEBUG_TYPE_MARKER => "Marker",
        gl::DEBUG_TYPE_PUSH_GROUP => "Push Group",
        gl::DEBUG_TYPE_POP_GROUP => "Pop Group",
        _ => "Other",
    }
}

/// Name of a `GL_DEBUG_SEVERITY_*` value
pub const fn severity_name(severity: GLenum) -> &'static str {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => "high",
        gl::DEBUG_SEVERITY_MEDIUM => "medium",
        gl::DEBUG_SEVERITY_LOW => "low",
        _ => "notification",
    }
}

/// Log level a debug message of `severity` is reported at
pub const fn severity_level(severity: GLenum) -> log::Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        gl::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_maps_to_log_level() {
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_HIGH), log::Level::Error);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_LOW), log::Level::Info);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_NOTIFICATION), log::Level::Debug);
    }

    #[test]
    fn test_names() {
        assert_eq!(source_name(gl::DEBUG_SOURCE_SHADER_COMPILER), "Shader Compiler");
        assert_eq!(source_name(0), "Other");
        assert_eq!(type_name(gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR), "Undefined Behaviour");
        assert_eq!(severity_name(gl::DEBUG_SEVERITY_NOTIFICATION), "notification");
    }

    #[test]
    fn test_ignored_ids_are_dropped_before_reading_message() {
        // A null message would be unsound to read; ignored IDs must return first.
        debug_callback(gl::DEBUG_SOURCE_API, gl::DEBUG_TYPE_OTHER, 131_185, gl::DEBUG_SEVERITY_NOTIFICATION, 10, ptr::null(), ptr::null_mut());
    }
}
