//! Textured rectangle tinted by its vertex colors

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{RECTANGLE_INDICES, TEXTURED_RECTANGLE};

const VERTEX_SHADER: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
layout (location = 2) in vec2 aTexCoord;

out vec3 ourColor;
out vec2 TexCoord;

void main()
{
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
    TexCoord = aTexCoord;
}
";

const FRAGMENT_SHADER: &str = r"#version 330 core
out vec4 FragColor;

in vec3 ourColor;
in vec2 TexCoord;

uniform sampler2D ourTexture;

void main()
{
    FragColor = texture(ourTexture, TexCoord) * vec4(ourColor, 1.0);
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    state::disable(Capability::DepthTest)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&TEXTURED_RECTANGLE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 3, 8, 3)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(2, 2, 8, 6)?;
    let element_buffer = ElementBuffer::new()?;
    element_buffer.write(&RECTANGLE_INDICES)?;
    vertex_array.unbind()?;

    let container = sections::texture(&config, TextureUnit(0), "container.jpg", gl::REPEAT as i32)?;

    let mut program = Program::new()?;
    program.attach_shader(ShaderStage::Vertex, VERTEX_SHADER)?;
    program.attach_shader(ShaderStage::Fragment, FRAGMENT_SHADER)?;
    program.set_vertex_array(vertex_array);
    program.set_texture("ourTexture", container)?;

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
