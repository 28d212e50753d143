//! Scene rendered off-screen, then drawn to the window through a blur kernel

use std::error::Error;
use std::rc::Rc;

use learn_opengl::prelude::*;
use sections::geometry::{vertex_count, CUBE, PLANE, SCENE_CUBES, SCREEN_QUAD};
use sections::FlyController;

fn main() -> Result<(), Box<dyn Error>> {
    let (config, mut context) = sections::start("LearnOpenGL", 1280, 740)?;
    let mut controller = FlyController::new(&mut context, config.camera());

    let (cube_array, _cube_buffer) = sections::upload_vertices(&CUBE, &[3, 2])?;
    let (plane_array, _plane_buffer) = sections::upload_vertices(&PLANE, &[3, 2])?;
    let (quad_array, _quad_buffer) = sections::upload_vertices(&SCREEN_QUAD, &[2, 2])?;

    let repeat = gl::REPEAT as i32;
    let container = sections::texture(&config, TextureUnit(0), "container.jpg", repeat)?;
    let metal = sections::texture(&config, TextureUnit(0), "metal.png", repeat)?;

    let mut scene = sections::program(&config, "textured.vs", "textured.fs")?;
    let mut screen = sections::program(&config, "quad.vs", "blur.fs")?;
    screen.set_vertex_array(quad_array);

    // sized to the framebuffer so the blur samples one texel per pixel
    let (width, height) = context.framebuffer_size();
    let (width, height) = (width.max(1) as u32, height.max(1) as u32);
    let scene_texture = Rc::new(Texture::empty(width, height, TextureUnit(1))?);
    let mut frame_buffer = FrameBuffer::new()?;
    frame_buffer.add_color_attachment(Rc::clone(&scene_texture))?;
    frame_buffer.add_depth_and_stencil_attachment(Rc::new(RenderBuffer::depth_stencil(width, height)?))?;
    screen.set_texture("screenTexture", scene_texture)?;

    while !context.should_close() {
        controller.update(&mut context)?;

        frame_buffer.bind()?;
        state::enable(Capability::DepthTest)?;
        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        scene.set_uniform("view", controller.camera.view_matrix())?;
        scene.set_uniform("projection", controller.projection(&context))?;

        scene.set_vertex_array(cube_array.clone());
        scene.set_texture("texture1", container.clone())?;
        for position in SCENE_CUBES {
            scene.set_uniform("model", math::translate(&Mat4::identity(), &Vec3::from(position)))?;
            scene.use_program()?;
            state::draw_arrays(Primitive::Triangles, 0, vertex_count(&CUBE, 5))?;
        }

        scene.set_vertex_array(plane_array.clone());
        scene.set_texture("texture1", metal.clone())?;
        scene.set_uniform("model", Mat4::identity())?;
        scene.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&PLANE, 5))?;

        FrameBuffer::bind_default()?;
        state::disable(Capability::DepthTest)?;
        state::clear_color(0.1, 0.1, 0.1, 1.0)?;
        state::clear(ClearFlags::COLOR)?;

        screen.use_program()?;
        state::draw_arrays(Primitive::Triangles, 0, vertex_count(&SCREEN_QUAD, 4))?;

        context.swap_buffers();
        context.poll_events();
    }
    Ok(())
}
