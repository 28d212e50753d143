//! Cubes outlined by drawing scaled-up copies where the stencil is unset

use std::error::Error;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE, PLANE, SCENE_CUBES};
use sections::FlyController;

const OUTLINE_SCALE: f32 = 1.1;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 1280, 740)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    state::enable(Capability::StencilTest)?;
    state::depth_func(CompareFunc::Less)?;
    state::stencil_op(StencilAction::Keep, StencilAction::Replace, StencilAction::Replace)?;

    let (cube_array, _cube_buffer) = sections::upload_vertices(&CUBE, &[3, 2])?;
    let (plane_array, _plane_buffer) = sections::upload_vertices(&PLANE, &[3, 2])?;

    let repeat = gl::REPEAT as i32;
    let marble = sections::texture(&config, TextureUnit(0), "marble.jpg", repeat)?;
    let metal = sections::texture(&config, TextureUnit(0), "metal.png", repeat)?;

    let mut scene = sections::program(&config, "textured.vs", "textured.fs")?;
    let mut border = sections::program(&config, "textured.vs", "border.fs")?;
    border.set_vertex_array(cube_array.clone());

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL)?;

        let view = controller.camera.view_matrix();
        let projection = controller.projection(&context);
        scene.set_uniform("view", view)?;
        scene.set_uniform("projection", projection)?;

        // floor leaves the stencil buffer untouched
        state::stencil_mask(0x00)?;
        scene.set_vertex_array(plane_array.clone());
        scene.set_texture("texture1", metal.clone())?;
        scene.set_uniform("model", Mat4::identity())?;
        scene.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&PLANE, 5))?;

        // cubes write 1 wherever they cover
        state::stencil_func(CompareFunc::Always, 1, 0xFF)?;
        state::stencil_mask(0xFF)?;
        scene.set_vertex_array(cube_array.clone());
        scene.set_texture("texture1", marble.clone())?;
        for position in SCENE_CUBES {
            scene.set_uniform("model", math::translate(&Mat4::identity(), &Vec3::from(position)))?;
            scene.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        // enlarged copies only where the cubes left no mark
        state::stencil_func(CompareFunc::NotEqual, 1, 0xFF)?;
        state::stencil_mask(0x00)?;
        state::disable(Capability::DepthTest)?;
        border.set_uniform("view", view)?;
        border.set_uniform("projection", projection)?;
        for position in SCENE_CUBES {
            let model = math::translate(&Mat4::identity(), &Vec3::from(position));
            border.set_uniform("model", math::scale(&model, &Vec3::repeat(OUTLINE_SCALE)))?;
            border.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }
        state::stencil_mask(0xFF)?;
        state::stencil_func(CompareFunc::Always, 0, 0xFF)?;
        state::enable(Capability::DepthTest)?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
