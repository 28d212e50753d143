//! Uniform blocks shared between programs
//!
//! Each block name gets one binding point for the life of the process and,
//! while any program holds it, one uniform buffer. Programs that declare a
//! block with the same name read the same buffer, so writing the shared
//! `Matrices` block through one program updates every program using it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Mutex;

use gl::types::GLuint;
use lazy_static::lazy_static;

use crate::render::buffer::UniformBuffer;
use crate::render::error::{GlError, GlResult};

/// Binding point allocation by block name
#[derive(Debug, Default)]
pub struct BindingPoints {
    points: HashMap<String, GLuint>,
    next: GLuint,
}

impl BindingPoints {
    /// Binding point for `block`, allocating the next free one on first use
    pub fn get_or_allocate(&mut self, block: &str) -> GLuint {
        if let Some(&point) = self.points.get(block) {
            return point;
        }
        let point = self.next;
        self.next += 1;
        self.points.insert(block.to_string(), point);
        log::debug!("Uniform block \"{}\" uses binding point {}", block, point);
        point
    }

    /// Number of blocks registered so far
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no block has been registered
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

lazy_static! {
    static ref BINDING_POINTS: Mutex<BindingPoints> = Mutex::new(BindingPoints::default());
}

thread_local! {
    static SHARED_BLOCKS: RefCell<HashMap<String, Weak<UniformBlockBuffer>>> = RefCell::new(HashMap::new());
}

/// Process-wide binding point for `block`
pub fn binding_point(block: &str) -> GLuint {
    // A poisoned lock still holds a consistent map.
    let mut points = BINDING_POINTS.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    points.get_or_allocate(block)
}

/// Remove entries whose buffer every program has released
pub fn prune_released<T>(blocks: &mut HashMap<String, Weak<T>>) {
    blocks.retain(|_, block| block.strong_count() > 0);
}

/// Reject writes past the end of a `size` byte block
pub fn check_range(offset: usize, len: usize, size: usize) -> GlResult<()> {
    if offset + len > size {
        return Err(GlError::UniformBlockOverflow { offset, len, size });
    }
    Ok(())
}

/// Uniform buffer backing one named block
#[derive(Debug)]
pub struct UniformBlockBuffer {
    name: String,
    size: usize,
    binding: GLuint,
    buffer: UniformBuffer,
}

impl UniformBlockBuffer {
    /// Buffer for `name`, reusing one another program already created
    ///
    /// A new buffer is allocated with `size` bytes and attached to the
    /// block's binding point.
    pub fn shared(name: &str, size: usize) -> GlResult<Rc<Self>> {
        let existing = SHARED_BLOCKS.with(|blocks| blocks.borrow().get(name).and_then(Weak::upgrade));
        if let Some(block) = existing {
            if block.size != size {
                log::warn!(
                    "Uniform block \"{}\" declared with {} bytes, shared buffer has {}",
                    name,
                    size,
                    block.size
                );
            }
            return Ok(block);
        }

        let binding = binding_point(name);
        let buffer = UniformBuffer::new()?;
        buffer.allocate(size)?;
        buffer.bind_base(binding)?;

        let block = Rc::new(Self {
            name: name.to_string(),
            size,
            binding,
            buffer,
        });
        SHARED_BLOCKS.with(|blocks| {
            let mut blocks = blocks.borrow_mut();
            prune_released(&mut blocks);
            blocks.insert(name.to_string(), Rc::downgrade(&block));
        });
        log::debug!("Allocated {} bytes for uniform block \"{}\"", size, name);
        Ok(block)
    }

    /// Write `bytes` at `offset`, refusing writes past the block end
    pub fn write(&self, offset: usize, bytes: &[u8]) -> GlResult<()> {
        check_range(offset, bytes.len(), self.size).map_err(|e| {
            log::error!("uniform block \"{}\": {}", self.name, e);
            e
        })?;
        self.buffer.write_at(offset, bytes)
    }

    /// Block name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data size in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Binding point the buffer is attached to
    pub const fn binding(&self) -> GLuint {
        self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_points_are_stable_per_name() {
        let mut points = BindingPoints::default();
        assert!(points.is_empty());
        assert_eq!(points.get_or_allocate("Matrices"), 0);
        assert_eq!(points.get_or_allocate("Lights"), 1);
        assert_eq!(points.get_or_allocate("Matrices"), 0);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_global_registry_reuses_points() {
        let first = binding_point("RegistryTestBlock");
        assert_eq!(binding_point("RegistryTestBlock"), first);
    }

    #[test]
    fn test_prune_keeps_only_live_buffers() {
        let live = Rc::new(128_usize);
        let mut blocks = HashMap::new();
        blocks.insert("Matrices".to_string(), Rc::downgrade(&live));
        {
            let released = Rc::new(64_usize);
            blocks.insert("Lights".to_string(), Rc::downgrade(&released));
        }

        prune_released(&mut blocks);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get("Matrices").and_then(Weak::upgrade), Some(live));
    }

    #[test]
    fn test_range_check() {
        // mat4 view at 64 in a 128 byte block
        assert!(check_range(64, 64, 128).is_ok());
        assert!(matches!(
            check_range(96, 64, 128),
            Err(GlError::UniformBlockOverflow { offset: 96, len: 64, size: 128 })
        ));
    }
}
