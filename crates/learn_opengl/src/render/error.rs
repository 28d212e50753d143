//! GL error reporting
//!
//! OpenGL reports failures through a sticky global flag rather than return
//! values. Every wrapper call is followed by [`checked`], which reads the flag,
//! logs the caller location and turns a pending error into a [`GlError`].

use std::fmt;
use std::panic::Location;

use gl::types::GLenum;
use thiserror::Error;

use crate::assets::AssetError;

/// Result type for all GL wrapper operations
pub type GlResult<T> = Result<T, GlError>;

/// Value of the GL error flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `GL_INVALID_ENUM`
    InvalidEnum,
    /// `GL_INVALID_VALUE`
    InvalidValue,
    /// `GL_INVALID_OPERATION`
    InvalidOperation,
    /// `GL_STACK_OVERFLOW`
    StackOverflow,
    /// `GL_STACK_UNDERFLOW`
    StackUnderflow,
    /// `GL_OUT_OF_MEMORY`
    OutOfMemory,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    InvalidFramebufferOperation,
    /// A code this crate does not know
    Unknown(GLenum),
}

impl ErrorCode {
    /// Decode a `glGetError` result, `None` for `GL_NO_ERROR`
    pub const fn from_raw(raw: GLenum) -> Option<Self> {
        Some(match raw {
            gl::NO_ERROR => return None,
            gl::INVALID_ENUM => Self::InvalidEnum,
            gl::INVALID_VALUE => Self::InvalidValue,
            gl::INVALID_OPERATION => Self::InvalidOperation,
            gl::STACK_OVERFLOW => Self::StackOverflow,
            gl::STACK_UNDERFLOW => Self::StackUnderflow,
            gl::OUT_OF_MEMORY => Self::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
            other => Self::Unknown(other),
        })
    }

    /// Symbolic name without the `GL_` prefix
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidEnum => "INVALID_ENUM",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidOperation => "INVALID_OPERATION",
            Self::StackOverflow => "STACK_OVERFLOW",
            Self::StackUnderflow => "STACK_UNDERFLOW",
            Self::OutOfMemory => "OUT_OF_MEMORY",
            Self::InvalidFramebufferOperation => "INVALID_FRAMEBUFFER_OPERATION",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) => write!(f, "UNKNOWN(0x{raw:04X})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Errors from the GL wrapper layer
#[derive(Error, Debug)]
pub enum GlError {
    /// A GL call raised the error flag
    #[error("{call} failed with {code} at {location}")]
    Api {
        /// GL entry point that failed
        call: &'static str,
        /// Error flag value
        code: ErrorCode,
        /// `file:line:column` of the wrapper call
        location: String,
    },

    /// A `glCreate*`/`glGen*` call returned no handle
    #[error("{0} returned no object")]
    CreateFailed(&'static str),

    /// Shader stage did not compile
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompile {
        /// Stage name
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// Program did not link
    #[error("program link failed: {0}")]
    ProgramLink(String),

    /// `glGetUniformLocation` returned -1
    #[error("no active uniform named \"{0}\"")]
    UniformNotFound(String),

    /// An active uniform was never given a value
    #[error("uniform variable \"{0}\" is not assigned")]
    UniformNotAssigned(String),

    /// No active uniform block has this name
    #[error("no active uniform block named \"{0}\"")]
    UniformBlockNotFound(String),

    /// Block exists but the member does not
    #[error("uniform block \"{block}\" has no member \"{member}\"")]
    UniformBlockMemberNotFound {
        /// Block name
        block: String,
        /// Member name
        member: String,
    },

    /// Value does not fit inside the uniform block
    #[error("write of {len} bytes at offset {offset} overflows a {size} byte uniform block")]
    UniformBlockOverflow {
        /// Byte offset of the write
        offset: usize,
        /// Bytes written
        len: usize,
        /// Block data size
        size: usize,
    },

    /// Uploading an empty slice
    #[error("can't write empty data")]
    EmptyData,

    /// Framebuffer status was not `GL_FRAMEBUFFER_COMPLETE`
    #[error("framebuffer incomplete: {0}")]
    FramebufferIncomplete(&'static str),

    /// A mesh has no textures of a kind a shader asked for
    #[error("no texture for kind {0}")]
    MissingTextures(String),

    /// More sampler names than textures of a kind
    #[error("more variables than textures for {kind}: {variables} > {textures}")]
    TooManyTextureVariables {
        /// Texture kind
        kind: String,
        /// Number of sampler names
        variables: usize,
        /// Number of textures
        textures: usize,
    },

    /// Reading a shader file failed
    #[error("read {path} failed: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Image or model loading failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Window or context creation failed
    #[error("context creation failed: {0}")]
    Context(String),
}

/// Read the GL error flag, logging the caller location when it is set
#[track_caller]
pub fn check_error() -> Option<ErrorCode> {
    let location = Location::caller();
    // SAFETY: glGetError has no preconditions beyond a current context.
    let raw = unsafe { gl::GetError() };
    let code = ErrorCode::from_raw(raw)?;
    log::error!("{}({}) {}", location.file(), location.line(), code);
    Some(code)
}

/// Fail with [`GlError::Api`] if the GL error flag is set after `call`
#[track_caller]
pub fn checked(call: &'static str) -> GlResult<()> {
    let location = Location::caller();
    match check_error() {
        None => Ok(()),
        Some(code) => {
            log::error!("{} failed", call);
            Err(GlError::Api {
                call,
                code,
                location: location.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_error_decodes_to_none() {
        assert_eq!(ErrorCode::from_raw(gl::NO_ERROR), None);
    }

    #[test]
    fn test_known_codes_decode() {
        assert_eq!(ErrorCode::from_raw(gl::INVALID_ENUM), Some(ErrorCode::InvalidEnum));
        assert_eq!(ErrorCode::from_raw(gl::INVALID_VALUE), Some(ErrorCode::InvalidValue));
        assert_eq!(ErrorCode::from_raw(gl::INVALID_OPERATION), Some(ErrorCode::InvalidOperation));
        assert_eq!(ErrorCode::from_raw(gl::OUT_OF_MEMORY), Some(ErrorCode::OutOfMemory));
        assert_eq!(
            ErrorCode::from_raw(gl::INVALID_FRAMEBUFFER_OPERATION),
            Some(ErrorCode::InvalidFramebufferOperation)
        );
    }

    #[test]
    fn test_unknown_code_keeps_raw_value() {
        let code = ErrorCode::from_raw(0x1234).unwrap();
        assert_eq!(code, ErrorCode::Unknown(0x1234));
        assert_eq!(code.to_string(), "UNKNOWN(0x1234)");
        assert_eq!(ErrorCode::StackOverflow.to_string(), "STACK_OVERFLOW");
    }

    #[test]
    fn test_api_error_message_names_call_and_location() {
        let err = GlError::Api {
            call: "glBindBuffer",
            code: ErrorCode::InvalidOperation,
            location: "src/buffer.rs:10:5".to_string(),
        };
        assert_eq!(err.to_string(), "glBindBuffer failed with INVALID_OPERATION at src/buffer.rs:10:5");
    }
}
