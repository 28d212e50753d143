//! Orange rectangle drawn as two indexed triangles

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{RECTANGLE, RECTANGLE_INDICES};

const VERTEX_SHADER: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let (_config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    state::disable(Capability::DepthTest)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&RECTANGLE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 3, 0)?;
    let element_buffer = ElementBuffer::new()?;
    element_buffer.write(&RECTANGLE_INDICES)?;
    vertex_array.unbind()?;

    let mut program = Program::new()?;
    program.attach_shader(ShaderStage::Vertex, VERTEX_SHADER)?;
    program.attach_shader(ShaderStage::Fragment, FRAGMENT_SHADER)?;
    program.set_vertex_array(vertex_array);

    while !context.should_close() {
        sections::process_events(&mut context)?;

        state::clear_color(0.2, 0.3, 0.3, 1.0)?;
        state::clear(ClearFlags::COLOR)?;

        program.use_program()?;
        state::draw_elements(Primitive::Triangles, RECTANGLE_INDICES.len() as i32)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
