//! Textured rectangle spinning in the bottom-right corner

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{RECTANGLE_INDICES, TEXTURED_RECTANGLE};

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    state::disable(Capability::DepthTest)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&TEXTURED_RECTANGLE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 2, 8, 6)?;
    let element_buffer = ElementBuffer::new()?;
    element_buffer.write(&RECTANGLE_INDICES)?;
    vertex_array.unbind()?;

    let repeat = gl::REPEAT as i32;
    let container = sections::texture(&config, TextureUnit(0), "container.jpg", repeat)?;
    let face = sections::texture(&config, TextureUnit(1), "awesomeface.png", repeat)?;

    let mut program = sections::program(&config, "transform.vs", "two_textures.fs")?;
    program.set_vertex_array(vertex_array);
    program.set_texture("texture1", container)?;
    program.set_texture("texture2", face)?;

    while !context.should_close() {
        sections::process_events(&mut context)?;

        state::clear_color(0.2, 0.3, 0.3, 1.0)?;
        state::clear(ClearFlags::COLOR)?;

        let transform = math::translate(&Mat4::identity(), &Vec3::new(0.5, -0.5, 0.0));
        let transform = math::rotate(&transform, context.time() as f32, &Vec3::z());
        program.set_uniform("transform", transform)?;

        program.use_program()?;
        state::draw_elements(Primitive::Triangles, RECTANGLE_INDICES.len() as i32)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
