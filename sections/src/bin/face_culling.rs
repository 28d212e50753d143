//! Checkerboard cube with back faces culled

use std::error::Error;

use learn_opengl::prelude::*;
use learn_opengl::render::state::{Face, Winding};
use sections::geometry::{vertex_count, CUBE};
use sections::FlyController;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 1280, 740)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    state::enable(Capability::CullFace)?;
    state::cull_face(Face::Back)?;
    state::front_face(Winding::CounterClockwise)?;

    let (cube_array, _cube_buffer) = sections::upload_vertices(&CUBE, &[3, 2])?;
    let checkerboard = sections::texture(&config, TextureUnit(0), "checkerboard.png", gl::CLAMP_TO_EDGE as i32)?;

    let mut scene = sections::program(&config, "textured.vs", "textured.fs")?;
    scene.set_vertex_array(cube_array);
    scene.set_texture("texture1", checkerboard)?;
    scene.set_uniform("model", Mat4::identity())?;

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        scene.set_uniform("view", controller.camera.view_matrix())?;
        scene.set_uniform("projection", controller.projection(&context))?;
        scene.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
