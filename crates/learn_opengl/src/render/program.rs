//! Shader programs
//!
//! A [`Program`] compiles and attaches shader stages, links lazily on first
//! use, and tracks which uniforms have been given a value. Textures and the
//! vertex array set on a program are rebound by [`Program::use_program`], so a
//! draw call only needs the program.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::CString;
use std::marker::PhantomData;
use std::path::Path;
use std::rc::Rc;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

use crate::foundation::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::render::error::{checked, GlError, GlResult};
use crate::render::texture::{BindOptions, Texture, TextureUnit};
use crate::render::uniform_block::{binding_point, UniformBlockBuffer};
use crate::render::vertex_array::VertexArray;

/// Size of the buffers used for info logs and uniform names
const NAME_BUFFER_LEN: usize = 512;

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// `GL_VERTEX_SHADER`
    Vertex,
    /// `GL_FRAGMENT_SHADER`
    Fragment,
}

impl ShaderStage {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Stage name for log messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

/// Compiled shader object, deleted when dropped
///
/// Attached shaders stay alive inside the program after deletion.
struct Shader(GLuint);

impl Drop for Shader {
    fn drop(&mut self) {
        // SAFETY: the name came from glCreateShader.
        unsafe { gl::DeleteShader(self.0) };
    }
}

/// Uniform reported by `glGetActiveUniform`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniform {
    /// Uniform name as the driver reports it
    pub name: String,
    /// Owning uniform block, `None` for default-block uniforms
    pub block_index: Option<GLuint>,
}

impl ActiveUniform {
    /// Default-block uniform
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            block_index: None,
        }
    }

    /// Member of uniform block `block_index`
    pub fn in_block(name: impl Into<String>, block_index: GLuint) -> Self {
        Self {
            name: name.into(),
            block_index: Some(block_index),
        }
    }
}

/// Names of the uniforms assigned since the last shader was attached
#[derive(Debug, Default, Clone)]
pub struct UniformTracker {
    assigned: BTreeSet<String>,
}

impl UniformTracker {
    /// Record `name` as assigned
    pub fn assign(&mut self, name: &str) {
        if !self.assigned.contains(name) {
            self.assigned.insert(name.to_string());
        }
    }

    /// Whether `name` has been assigned
    pub fn is_assigned(&self, name: &str) -> bool {
        self.assigned.contains(name)
    }

    /// Forget every assignment
    pub fn clear(&mut self) {
        self.assigned.clear();
    }

    /// First default-block uniform in `active` that was never assigned
    ///
    /// Block members are fed through uniform buffers and are skipped.
    pub fn first_unassigned<'a, I>(&self, active: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a ActiveUniform>,
    {
        active
            .into_iter()
            .filter(|uniform| uniform.block_index.is_none())
            .map(|uniform| uniform.name.as_str())
            .find(|name| !self.is_assigned(name))
    }
}

/// State that only holds for the current link
///
/// Attaching a shader invalidates all of it: the link itself, the uniforms
/// assigned since, and the block buffers sized for the old layout.
#[derive(Debug)]
pub struct LinkState<B> {
    linked: bool,
    uniforms: UniformTracker,
    blocks: HashMap<String, B>,
}

impl<B> Default for LinkState<B> {
    fn default() -> Self {
        Self {
            linked: false,
            uniforms: UniformTracker::default(),
            blocks: HashMap::new(),
        }
    }
}

impl<B> LinkState<B> {
    /// Drop everything derived from the previous link
    pub fn invalidate(&mut self) {
        self.linked = false;
        self.uniforms.clear();
        self.blocks.clear();
    }

    /// Whether the program linked since the last invalidation
    pub const fn is_linked(&self) -> bool {
        self.linked
    }

    /// Cached buffer for `block`
    pub fn block(&self, block: &str) -> Option<&B> {
        self.blocks.get(block)
    }

    /// Cache the buffer backing `block`
    pub fn insert_block(&mut self, block: &str, buffer: B) {
        self.blocks.insert(block.to_string(), buffer);
    }
}

/// Values that can be assigned to a uniform
pub trait UniformValue {
    /// Upload to `location` of the program in use
    ///
    /// # Safety
    /// Requires a current context with the owning program installed.
    unsafe fn upload(&self, location: GLint);

    /// std140 layout bytes, used for uniform block members
    fn std140_bytes(&self) -> Vec<u8>;
}

impl UniformValue for GLint {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform1i(location, *self);
    }

    fn std140_bytes(&self) -> Vec<u8> {
        self.to_ne_bytes().to_vec()
    }
}

impl UniformValue for f32 {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform1f(location, *self);
    }

    fn std140_bytes(&self) -> Vec<u8> {
        self.to_ne_bytes().to_vec()
    }
}

impl UniformValue for bool {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform1i(location, GLint::from(*self));
    }

    fn std140_bytes(&self) -> Vec<u8> {
        u32::from(*self).to_ne_bytes().to_vec()
    }
}

impl UniformValue for [GLint; 3] {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform3i(location, self[0], self[1], self[2]);
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self[..]).to_vec()
    }
}

impl UniformValue for [f32; 3] {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform3f(location, self[0], self[1], self[2]);
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self[..]).to_vec()
    }
}

impl UniformValue for Vec2 {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform2fv(location, 1, self.as_ptr());
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(self.as_slice()).to_vec()
    }
}

impl UniformValue for Vec3 {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform3fv(location, 1, self.as_ptr());
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(self.as_slice()).to_vec()
    }
}

impl UniformValue for Vec4 {
    unsafe fn upload(&self, location: GLint) {
        gl::Uniform4fv(location, 1, self.as_ptr());
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(self.as_slice()).to_vec()
    }
}

impl UniformValue for Mat3 {
    unsafe fn upload(&self, location: GLint) {
        gl::UniformMatrix3fv(location, 1, gl::FALSE, self.as_ptr());
    }

    /// Each column is padded to a vec4
    fn std140_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::with_capacity(48);
        for column in self.column_iter() {
            let padded = [column[0], column[1], column[2], 0.0_f32];
            bytes.extend_from_slice(bytemuck::cast_slice(&padded[..]));
        }
        bytes
    }
}

impl UniformValue for Mat4 {
    unsafe fn upload(&self, location: GLint) {
        gl::UniformMatrix4fv(location, 1, gl::FALSE, self.as_ptr());
    }

    fn std140_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(self.as_slice()).to_vec()
    }
}

fn c_name(name: &str) -> Option<CString> {
    CString::new(name).ok()
}

fn gl_string(buffer: &[u8], written: GLsizei) -> String {
    let len = (written.max(0) as usize).min(buffer.len());
    String::from_utf8_lossy(&buffer[..len]).trim_end_matches(['\0', '\n', ' ']).to_string()
}

/// Linked shader program with uniform bookkeeping
#[derive(Debug)]
pub struct Program {
    id: GLuint,
    link: LinkState<Rc<UniformBlockBuffer>>,
    textures: BTreeMap<TextureUnit, Rc<Texture>>,
    vertex_array: Option<Rc<VertexArray>>,
    _not_send: PhantomData<*const ()>,
}

impl Program {
    /// Create an empty program object
    pub fn new() -> GlResult<Self> {
        // SAFETY: no preconditions beyond a current context.
        let id = unsafe { gl::CreateProgram() };
        if id == 0 {
            log::error!("glCreateProgram failed");
            return Err(GlError::CreateFailed("glCreateProgram"));
        }
        Ok(Self {
            id,
            link: LinkState::default(),
            textures: BTreeMap::new(),
            vertex_array: None,
            _not_send: PhantomData,
        })
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }

    /// Whether the program linked since the last attached shader
    pub const fn is_linked(&self) -> bool {
        self.link.is_linked()
    }

    /// Read a GLSL file and attach it as `stage`
    pub fn attach_shader_file<P: AsRef<Path>>(&mut self, stage: ShaderStage, path: P) -> GlResult<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            log::error!("read {} failed: {}", path.display(), source);
            GlError::Io {
                path: path.display().to_string(),
                source,
            }
        })?;
        log::debug!("Compiling {} shader {}", stage.name(), path.display());
        self.attach_shader(stage, &source)
    }

    /// Compile `source` as `stage` and attach it
    ///
    /// Attaching resets the assigned uniforms and cached block buffers and
    /// forces a relink.
    pub fn attach_shader(&mut self, stage: ShaderStage, source: &str) -> GlResult<()> {
        // SAFETY: stage is a valid shader type.
        let shader = Shader(unsafe { gl::CreateShader(stage.gl_enum()) });
        if shader.0 == 0 {
            log::error!("glCreateShader failed");
            return Err(GlError::CreateFailed("glCreateShader"));
        }

        let source_ptr = source.as_ptr().cast::<GLchar>();
        let source_len = source.len() as GLint;
        // SAFETY: one source string with an explicit length, so no NUL terminator is needed.
        unsafe {
            gl::ShaderSource(shader.0, 1, &source_ptr, &source_len);
            gl::CompileShader(shader.0);
        }

        let mut success: GLint = 0;
        // SAFETY: single integer query.
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut success) };
        if success == 0 {
            let mut buffer = vec![0_u8; NAME_BUFFER_LEN];
            let mut written: GLsizei = 0;
            // SAFETY: the buffer holds NAME_BUFFER_LEN bytes.
            unsafe {
                gl::GetShaderInfoLog(shader.0, NAME_BUFFER_LEN as GLsizei, &mut written, buffer.as_mut_ptr().cast());
            }
            let info = gl_string(&buffer, written);
            log::error!("glCompileShader failed {}", info);
            return Err(GlError::ShaderCompile {
                stage: stage.name(),
                log: info,
            });
        }

        // SAFETY: both names are live.
        unsafe { gl::AttachShader(self.id, shader.0) };
        checked("glAttachShader")?;

        self.link.invalidate();
        Ok(())
    }

    /// Link if a shader was attached since the last link
    pub fn link(&mut self) -> GlResult<()> {
        if self.link.linked {
            return Ok(());
        }
        // SAFETY: `id` is a live program.
        unsafe { gl::LinkProgram(self.id) };

        let mut success: GLint = 0;
        // SAFETY: single integer query.
        unsafe { gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut success) };
        if success == 0 {
            let mut buffer = vec![0_u8; NAME_BUFFER_LEN];
            let mut written: GLsizei = 0;
            // SAFETY: the buffer holds NAME_BUFFER_LEN bytes.
            unsafe {
                gl::GetProgramInfoLog(self.id, NAME_BUFFER_LEN as GLsizei, &mut written, buffer.as_mut_ptr().cast());
            }
            let info = gl_string(&buffer, written);
            log::error!("glLinkProgram failed {}", info);
            return Err(GlError::ProgramLink(info));
        }
        self.link.linked = true;
        Ok(())
    }

    /// Link if needed and make this the current program
    pub fn install(&mut self) -> GlResult<()> {
        self.link()?;
        // SAFETY: the program is linked.
        unsafe { gl::UseProgram(self.id) };
        checked("glUseProgram")
    }

    /// Install the program and bind everything a draw call needs
    ///
    /// Binds the vertex array and every texture (in unit order), fails if an
    /// active uniform was never assigned, then attaches each uniform block to
    /// its shared binding point.
    pub fn use_program(&mut self) -> GlResult<()> {
        self.install()?;

        if let Some(vertex_array) = &self.vertex_array {
            vertex_array.bind()?;
        }
        for texture in self.textures.values() {
            texture.bind(&BindOptions::default())?;
        }

        let active = self.active_uniforms()?;
        if let Some(name) = self.link.uniforms.first_unassigned(&active) {
            log::error!("uniform variable \"{}\" is not assigned", name);
            return Err(GlError::UniformNotAssigned(name.to_string()));
        }

        self.bind_uniform_blocks()
    }

    /// Look up `name` and hand its location to `set`
    ///
    /// The GL error flag is checked after `set` runs, and on success the
    /// uniform counts as assigned.
    pub fn set_uniform_by_callback<F>(&mut self, name: &str, set: F) -> GlResult<()>
    where
        F: FnOnce(GLint),
    {
        self.install()?;
        let location = self.uniform_location(name)?;
        set(location);
        checked("glUniform").map_err(|e| {
            log::error!("set_function failed:{}", name);
            e
        })?;
        self.link.uniforms.assign(name);
        Ok(())
    }

    /// Assign a typed value to uniform `name`
    pub fn set_uniform<V: UniformValue>(&mut self, name: &str, value: V) -> GlResult<()> {
        // SAFETY: set_uniform_by_callback installs the program first.
        self.set_uniform_by_callback(name, |location| unsafe { value.upload(location) })
    }

    /// Point sampler `name` at `texture`'s unit and keep the texture bound on use
    ///
    /// A texture already registered on the same unit is replaced.
    pub fn set_texture(&mut self, name: &str, texture: Rc<Texture>) -> GlResult<()> {
        let unit = texture.unit();
        // SAFETY: set_uniform_by_callback installs the program first.
        self.set_uniform_by_callback(name, |location| unsafe { gl::Uniform1i(location, unit.index()) })?;
        self.textures.insert(unit, texture);
        Ok(())
    }

    /// Vertex array bound by [`Program::use_program`]
    pub fn set_vertex_array(&mut self, vertex_array: Rc<VertexArray>) {
        self.vertex_array = Some(vertex_array);
    }

    /// Write `member` of uniform block `block`
    ///
    /// The block's buffer is created on first write and shared with every
    /// other program declaring a block of the same name.
    pub fn set_uniform_of_block<V: UniformValue>(&mut self, block: &str, member: &str, value: V) -> GlResult<()> {
        self.link()?;
        let block_index = self.uniform_block_index(block)?;

        let buffer = match self.link.block(block) {
            Some(buffer) => Rc::clone(buffer),
            None => {
                let size = self.uniform_block_size(block_index)?;
                let buffer = UniformBlockBuffer::shared(block, size)?;
                self.link.insert_block(block, Rc::clone(&buffer));
                buffer
            }
        };

        let offset = self.uniform_block_member_offset(block, member)?;
        buffer.write(offset, &value.std140_bytes())?;

        // SAFETY: block_index was returned by glGetUniformBlockIndex for this program.
        unsafe { gl::UniformBlockBinding(self.id, block_index, buffer.binding()) };
        checked("glUniformBlockBinding")
    }

    fn uniform_location(&self, name: &str) -> GlResult<GLint> {
        let location = c_name(name).map_or(-1, |c_name| {
            // SAFETY: c_name is NUL terminated.
            unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) }
        });
        if location == -1 {
            log::error!("glGetUniformLocation failed:{}", name);
            return Err(GlError::UniformNotFound(name.to_string()));
        }
        Ok(location)
    }

    fn uniform_block_index(&self, block: &str) -> GlResult<GLuint> {
        let index = c_name(block).map_or(gl::INVALID_INDEX, |c_name| {
            // SAFETY: c_name is NUL terminated.
            unsafe { gl::GetUniformBlockIndex(self.id, c_name.as_ptr()) }
        });
        if index == gl::INVALID_INDEX {
            log::error!("no uniform block {}", block);
            return Err(GlError::UniformBlockNotFound(block.to_string()));
        }
        Ok(index)
    }

    fn uniform_block_size(&self, block_index: GLuint) -> GlResult<usize> {
        let mut size: GLint = 0;
        // SAFETY: single integer query on a valid block index.
        unsafe { gl::GetActiveUniformBlockiv(self.id, block_index, gl::UNIFORM_BLOCK_DATA_SIZE, &mut size) };
        checked("glGetActiveUniformBlockiv")?;
        Ok(size.max(0) as usize)
    }

    fn uniform_block_member_offset(&self, block: &str, member: &str) -> GlResult<usize> {
        let not_found = || {
            log::error!("no member {} in uniform block {}", member, block);
            GlError::UniformBlockMemberNotFound {
                block: block.to_string(),
                member: member.to_string(),
            }
        };

        let c_member = c_name(member).ok_or_else(not_found)?;
        let names = [c_member.as_ptr()];
        let mut index: GLuint = gl::INVALID_INDEX;
        // SAFETY: one NUL-terminated name in, one index out.
        unsafe { gl::GetUniformIndices(self.id, 1, names.as_ptr(), &mut index) };
        checked("glGetUniformIndices")?;
        if index == gl::INVALID_INDEX {
            return Err(not_found());
        }

        let mut offset: GLint = -1;
        // SAFETY: one index in, one integer out.
        unsafe { gl::GetActiveUniformsiv(self.id, 1, &index, gl::UNIFORM_OFFSET, &mut offset) };
        checked("glGetActiveUniformsiv")?;
        if offset < 0 {
            return Err(not_found());
        }
        Ok(offset as usize)
    }

    /// Every active uniform with its owning block
    pub fn active_uniforms(&self) -> GlResult<Vec<ActiveUniform>> {
        let mut count: GLint = 0;
        // SAFETY: single integer query.
        unsafe { gl::GetProgramiv(self.id, gl::ACTIVE_UNIFORMS, &mut count) };
        checked("glGetProgramiv")?;

        let mut uniforms = Vec::with_capacity(count.max(0) as usize);
        let mut buffer = vec![0_u8; NAME_BUFFER_LEN];
        for index in 0..count.max(0) as GLuint {
            let mut written: GLsizei = 0;
            let mut size: GLint = 0;
            let mut kind: GLenum = 0;
            let mut block_index: GLint = -1;
            // SAFETY: the name buffer holds NAME_BUFFER_LEN bytes; index < ACTIVE_UNIFORMS.
            unsafe {
                gl::GetActiveUniform(
                    self.id,
                    index,
                    NAME_BUFFER_LEN as GLsizei,
                    &mut written,
                    &mut size,
                    &mut kind,
                    buffer.as_mut_ptr().cast(),
                );
                gl::GetActiveUniformsiv(self.id, 1, &index, gl::UNIFORM_BLOCK_INDEX, &mut block_index);
            }
            checked("glGetActiveUniform")?;

            let name = gl_string(&buffer, written);
            uniforms.push(ActiveUniform {
                name,
                block_index: u32::try_from(block_index).ok(),
            });
        }
        Ok(uniforms)
    }

    fn bind_uniform_blocks(&self) -> GlResult<()> {
        let mut count: GLint = 0;
        // SAFETY: single integer query.
        unsafe { gl::GetProgramiv(self.id, gl::ACTIVE_UNIFORM_BLOCKS, &mut count) };
        checked("glGetProgramiv")?;

        let mut buffer = vec![0_u8; NAME_BUFFER_LEN];
        for index in 0..count.max(0) as GLuint {
            let mut written: GLsizei = 0;
            // SAFETY: the name buffer holds NAME_BUFFER_LEN bytes; index < ACTIVE_UNIFORM_BLOCKS.
            unsafe {
                gl::GetActiveUniformBlockName(
                    self.id,
                    index,
                    NAME_BUFFER_LEN as GLsizei,
                    &mut written,
                    buffer.as_mut_ptr().cast(),
                );
            }
            checked("glGetActiveUniformBlockName")?;

            let name = gl_string(&buffer, written);
            // SAFETY: index < ACTIVE_UNIFORM_BLOCKS.
            unsafe { gl::UniformBlockBinding(self.id, index, binding_point(&name)) };
            checked("glUniformBlockBinding")?;
        }
        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        // SAFETY: `id` came from glCreateProgram and is deleted once.
        unsafe { gl::DeleteProgram(self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_first_unassigned_skips_block_members() {
        let mut tracker = UniformTracker::default();
        let active = vec![
            ActiveUniform::plain("model"),
            ActiveUniform::in_block("view", 0),
            ActiveUniform::in_block("projection", 0),
            ActiveUniform::plain("texture1"),
        ];
        assert_eq!(tracker.first_unassigned(&active), Some("model"));

        tracker.assign("model");
        assert_eq!(tracker.first_unassigned(&active), Some("texture1"));

        tracker.assign("texture1");
        assert_eq!(tracker.first_unassigned(&active), None);
    }

    #[test]
    fn test_clear_forgets_assignments() {
        let mut tracker = UniformTracker::default();
        tracker.assign("ourColor");
        tracker.assign("ourColor");
        assert!(tracker.is_assigned("ourColor"));
        tracker.clear();
        assert!(!tracker.is_assigned("ourColor"));
    }

    #[test]
    fn test_struct_member_names_are_tracked_verbatim() {
        let mut tracker = UniformTracker::default();
        tracker.assign("material.diffuse");
        let active = [ActiveUniform::plain("material.diffuse"), ActiveUniform::plain("material.shininess")];
        assert_eq!(tracker.first_unassigned(&active), Some("material.shininess"));
    }

    #[test]
    fn test_mat4_std140_is_column_major() {
        let m = math::translate(&Mat4::identity(), &Vec3::new(1.0, 2.0, 3.0));
        let bytes = m.std140_bytes();
        assert_eq!(bytes.len(), 64);
        let floats = floats(&bytes);
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mat3_std140_pads_columns() {
        let bytes = Mat3::identity().std140_bytes();
        assert_eq!(bytes.len(), 48);
        let floats = floats(&bytes);
        assert_eq!(&floats[0..4], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&floats[4..8], &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scalar_std140_sizes() {
        assert_eq!(1_i32.std140_bytes().len(), 4);
        assert_eq!(true.std140_bytes(), 1_u32.to_ne_bytes().to_vec());
        assert_eq!([1.0_f32, 2.0, 3.0].std140_bytes().len(), 12);
        assert_eq!(Vec4::zeros().std140_bytes().len(), 16);
    }

    #[test]
    fn test_info_log_trims_terminator() {
        let mut buffer = b"0:1(1): error: syntax error\n\0".to_vec();
        buffer.resize(NAME_BUFFER_LEN, 0);
        assert_eq!(gl_string(&buffer, 29), "0:1(1): error: syntax error");
        assert_eq!(gl_string(&buffer, -1), "");
    }

    #[test]
    fn test_invalidate_drops_block_buffers_and_assignments() {
        let mut link = LinkState::<usize>::default();
        link.linked = true;
        link.uniforms.assign("model");
        link.insert_block("Matrices", 128);
        assert_eq!(link.block("Matrices"), Some(&128));

        link.invalidate();
        assert!(!link.is_linked());
        assert!(!link.uniforms.is_assigned("model"));
        assert_eq!(link.block("Matrices"), None);
    }

    #[test]
    fn test_stage_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.name(), "fragment");
    }
}
