//! Fly through the cube field with WASD, mouse look and scroll zoom

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE, CUBE_POSITIONS};
use sections::FlyController;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    let mut controller = FlyController::new(&mut context, config.camera());

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

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.2, 0.3, 0.3, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        program.set_uniform("view", controller.camera.view_matrix())?;
        program.set_uniform("projection", controller.projection(&context))?;

        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = math::translate(&Mat4::identity(), &Vec3::from(*position));
            let model = math::rotate(&model, math::deg_to_rad(20.0 * i as f32), &Vec3::new(1.0, 0.3, 0.5));
            program.set_uniform("model", model)?;

            program.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
