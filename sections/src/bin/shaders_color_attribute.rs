//! Triangle with a color per vertex, interpolated across the face

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::COLORED_TRIANGLE;

const VERTEX_SHADER: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

out vec3 ourColor;

void main()
{
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
}
";

const FRAGMENT_SHADER: &str = r"#version 330 core
out vec4 FragColor;
in vec3 ourColor;

void main()
{
    FragColor = vec4(ourColor, 1.0);
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let (_config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    state::disable(Capability::DepthTest)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&COLORED_TRIANGLE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 6, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 3, 6, 3)?;
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
        state::draw_arrays(Primitive::Triangles, 0, 3)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
