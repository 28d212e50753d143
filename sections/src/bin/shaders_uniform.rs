//! Triangle whose color pulses through a uniform

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;

const VERTEX_SHADER: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 330 core
out vec4 FragColor;

uniform vec4 ourColor;

void main()
{
    FragColor = ourColor;
}
";

const TRIANGLE: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];

fn main() -> Result<(), Box<dyn Error>> {
    let (_config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    state::disable(Capability::DepthTest)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&TRIANGLE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 3, 0)?;
    vertex_array.unbind()?;

    let mut program = Program::new()?;
    program.attach_shader(ShaderStage::Vertex, VERTEX_SHADER)?;
    program.attach_shader(ShaderStage::Fragment, FRAGMENT_SHADER)?;
    program.set_vertex_array(vertex_array);

    while !context.should_close() {
        sections::process_events(&mut context)?;

        state::clear_color(0.2, 0.3, 0.3, 1.0)?;
        state::clear(ClearFlags::COLOR)?;

        let green = (context.time().sin() / 2.0 + 0.5) as f32;
        program.set_uniform("ourColor", Vec4::new(0.0, green, 0.0, 1.0))?;
        program.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, 3)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
