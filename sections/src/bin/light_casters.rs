//! Flashlight held by the camera, with a soft cone edge and distance falloff

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE_POSITIONS, LIT_CUBE};
use sections::FlyController;

const LAMP_POSITION: [f32; 3] = [1.2, 1.0, 2.0];
const INNER_CONE_DEGREES: f32 = 12.5;
const OUTER_CONE_DEGREES: f32 = 17.5;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 800, 600)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    let cube_array = Rc::new(VertexArray::new(true)?);
    let vertex_buffer = ArrayBuffer::<f32>::new()?;
    vertex_buffer.write(&LIT_CUBE)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(1, 3, 8, 3)?;
    vertex_buffer.vertex_attribute_pointer_simple_offset(2, 2, 8, 6)?;

    let lamp_array = Rc::new(VertexArray::new(true)?);
    vertex_buffer.vertex_attribute_pointer_simple_offset(0, 3, 8, 0)?;
    lamp_array.unbind()?;

    let repeat = gl::REPEAT as i32;
    let diffuse_map = sections::texture(&config, TextureUnit(0), "container2.png", repeat)?;
    let specular_map = sections::texture(&config, TextureUnit(1), "container2_specular.png", repeat)?;

    let mut container = sections::program(&config, "material.vs", "spotlight_smooth_edge.fs")?;
    container.set_vertex_array(cube_array);
    container.set_uniform("material.shininess", 32.0_f32)?;
    container.set_uniform("light.ambient", [0.1_f32, 0.1, 0.1])?;
    container.set_uniform("light.diffuse", [0.8_f32, 0.8, 0.8])?;
    container.set_uniform("light.specular", [1.0_f32, 1.0, 1.0])?;
    container.set_uniform("light.constant", 1.0_f32)?;
    container.set_uniform("light.linear", 0.09_f32)?;
    container.set_uniform("light.quadratic", 0.032_f32)?;
    container.set_uniform("light.cutOff", math::deg_to_rad(INNER_CONE_DEGREES).cos())?;
    container.set_uniform("light.outerCutOff", math::deg_to_rad(OUTER_CONE_DEGREES).cos())?;
    container.set_texture("material.diffuse", diffuse_map)?;
    container.set_texture("material.specular", specular_map)?;

    let mut lamp = sections::program(&config, "lamp.vs", "lamp.fs")?;
    lamp.set_vertex_array(lamp_array);
    let model = math::translate(&Mat4::identity(), &Vec3::from(LAMP_POSITION));
    lamp.set_uniform("model", math::scale(&model, &Vec3::repeat(0.2)))?;

    while !context.should_close() {
        controller.update(&mut context)?;

        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        let view = controller.camera.view_matrix();
        let projection = controller.projection(&context);

        container.set_uniform("light.position", controller.camera.position())?;
        container.set_uniform("light.direction", controller.camera.front())?;
        container.set_uniform("viewPos", controller.camera.position())?;
        container.set_uniform("view", view)?;
        container.set_uniform("projection", projection)?;

        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = math::translate(&Mat4::identity(), &Vec3::from(*position));
            let model = math::rotate(&model, math::deg_to_rad(20.0 * i as f32), &Vec3::new(1.0, 0.3, 0.5));
            container.set_uniform("normalMatrix", math::normal_matrix(&model))?;
            container.set_uniform("model", model)?;
            container.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&LIT_CUBE, 8))?;
        }

        lamp.set_uniform("view", view)?;
        lamp.set_uniform("projection", projection)?;
        lamp.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&LIT_CUBE, 8))?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
