//! Phong-lit cube under a light whose color drifts over time

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, LIT_CUBE};
use sections::FlyController;

const LIGHT_POSITION: [f32; 3] = [1.2, 1.0, 2.0];

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    let cube_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&LIT_CUBE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 3, 8, 3)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(2, 2, 8, 6)?;

    // same vertex buffer, position only
    let lamp_array = Rc::new(VertexArray::new(true)?);
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    lamp_array.unbind()?;

    let light_position = Vec3::from(LIGHT_POSITION);

    let mut container = sections::program(&config, "material.vs", "material.fs")?;
    container.set_vertex_array(cube_array);
    container.set_uniform("model", Mat4::identity())?;
    container.set_uniform("normalMatrix", math::normal_matrix(&Mat4::identity()))?;
    container.set_uniform("material.ambient", [1.0_f32, 0.5, 0.31])?;
    container.set_uniform("material.diffuse", [1.0_f32, 0.5, 0.31])?;
    container.set_uniform("material.specular", [0.5_f32, 0.5, 0.5])?;
    container.set_uniform("material.shininess", 32.0_f32)?;
    container.set_uniform("light.specular", [1.0_f32, 1.0, 1.0])?;
    container.set_uniform("light.position", light_position)?;

    let mut lamp = sections::program(&config, "lamp.vs", "lamp.fs")?;
    lamp.set_vertex_array(lamp_array);
    let model = math::translate(&Mat4::identity(), &light_position);
    lamp.set_uniform("model", math::scale(&model, &Vec3::repeat(0.2)))?;

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        let view = controller.camera.view_matrix();
        let projection = controller.projection(&context);

        let time = context.time() as f32;
        let light_color = Vec3::new((time * 2.0).sin(), (time * 0.7).sin(), (time * 1.3).sin());
        let diffuse = light_color * 0.5;
        let ambient = diffuse * 0.2;

        container.set_uniform("viewPos", controller.camera.position())?;
        container.set_uniform("view", view)?;
        container.set_uniform("projection", projection)?;
        container.set_uniform("light.ambient", ambient)?;
        container.set_uniform("light.diffuse", diffuse)?;
        container.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&LIT_CUBE, 8))?;

        lamp.set_uniform("view", view)?;
        lamp.set_uniform("projection", projection)?;
        lamp.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&LIT_CUBE, 8))?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
