//! Ten textured cubes in perspective, each turning on its own axis

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE, CUBE_POSITIONS};

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;

    let vertex_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&CUBE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 5, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 2, 5, 3)?;
    vertex_array.unbind()?;

    let repeat = gl::REPEAT as i32;
    let container = sections::texture(&config, TextureUnit(0), "container.jpg", repeat)?;
    let face = sections::texture(&config, TextureUnit(1), "awesomeface.png", repeat)?;

    let mut program = sections::program(&config, "coordinate.vs", "two_textures.fs")?;
    program.set_vertex_array(vertex_array);
    program.set_texture("texture1", container)?;
    program.set_texture("texture2", face)?;

    let view = math::translate(&Mat4::identity(), &Vec3::new(0.0, 0.0, -3.0));
    program.set_uniform("view", view)?;

    while !context.should_close() {
        sections::process_events(&mut context)?;

        state::clear_color(0.2, 0.3, 0.3, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        let projection = math::perspective(math::deg_to_rad(45.0), context.aspect_ratio(), 0.1, 100.0);
        program.set_uniform("projection", projection)?;

        let time = context.time() as f32;
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = math::translate(&Mat4::identity(), &Vec3::from(*position));
            let angle = math::deg_to_rad(20.0 * i as f32) + time;
            let model = math::rotate(&model, angle, &Vec3::new(1.0, 0.3, 0.5));
            program.set_uniform("model", model)?;

            program.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
