//! Scene shaded by linearised depth instead of its textures

use std::error::Error;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE, PLANE, SCENE_CUBES};
use sections::FlyController;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 1280, 740)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    let (cube_array, _cube_buffer) = sections::upload_vertices(&CUBE, &[3, 2])?;
    let (plane_array, _plane_buffer) = sections::upload_vertices(&PLANE, &[3, 2])?;

    let mut scene = sections::program(&config, "textured.vs", "depth_buffer.fs")?;

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        scene.set_uniform("view", controller.camera.view_matrix())?;
        scene.set_uniform("projection", controller.projection(&context))?;

        scene.set_vertex_array(cube_array.clone());
        for position in SCENE_CUBES {
            scene.set_uniform("model", math::translate(&Mat4::identity(), &Vec3::from(position)))?;
            scene.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        scene.set_vertex_array(plane_array.clone());
        scene.set_uniform("model", Mat4::identity())?;
        scene.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&PLANE, 5))?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
