//! Four programs reading view and projection from one shared uniform block

use std::error::Error;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE};
use sections::FlyController;

const COLORS: [&str; 4] = ["red.fs", "green.fs", "yellow.fs", "blue.fs"];
const TRANSLATIONS: [[f32; 3]; 4] = [[-0.75, 0.75, 0.0], [0.75, 0.75, 0.0], [-0.75, -0.75, 0.0], [0.75, -0.75, 0.0]];

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 1280, 740)?;
    let mut controller = FlyController::new(&mut context, config.camera());
    state::depth_func(CompareFunc::LessEqual)?;

    let (cube_array, _cube_buffer) = sections::upload_vertices(&CUBE, &[3, 2])?;

    let mut programs = COLORS
        .iter()
        .map(|fragment| -> GlResult<Program> {
            let mut program = sections::program(&config, "matrices.vs", fragment)?;
            program.set_vertex_array(cube_array.clone());
            Ok(program)
        })
        .collect::<GlResult<Vec<_>>>()?;

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        // written once, seen by every program through the shared block
        let projection = math::perspective(math::deg_to_rad(45.0), context.aspect_ratio(), 0.1, 100.0);
        programs[0].set_uniform_of_block("Matrices", "view", controller.camera.view_matrix())?;
        programs[0].set_uniform_of_block("Matrices", "projection", projection)?;

        for (program, translation) in programs.iter_mut().zip(TRANSLATIONS) {
            program.set_uniform("model", math::translate(&Mat4::identity(), &Vec3::from(translation)))?;
            program.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
