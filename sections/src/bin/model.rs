//! Nanosuit model loaded from OBJ, drawn with its diffuse maps

use std::error::Error;

use learn_opengl::prelude::*;
use sections::FlyController;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    let nanosuit = Model::load(config.resource("nanosuit/nanosuit.obj"))?;
    log::info!("Drawing {} meshes per frame", nanosuit.mesh_count());

    let mut program = sections::program(&config, "model.vs", "model.fs")?;
    program.set_uniform("model", Mat4::identity())?;

    let mut names = TextureVariables::new();
    names.insert(TextureKind::Diffuse, vec!["texture_diffuse1".to_string()]);

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        program.set_uniform("view", controller.camera.view_matrix())?;
        program.set_uniform("projection", controller.projection(&context))?;

        nanosuit.draw(&mut program, &names)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
