//! Glossy spheres example.
//!
//! Renders a handful of reflective spheres and a translucent triangle lit by
//! three spot lights, on a worker pool, and saves the result as PPM.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use anyhow::Result;
use lumen_renderer::{
    color_to_rgba, AmbientLight, BasicRayTracer, Camera, Color, Geometry, GlossySampling,
    ImageBuffer, Material, Point3, Renderer, Scene, Sphere, SpotLight, Triangle, Vector3,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = Arc::new(build_scene()?);
    log::info!(
        "Scene '{}' built with {} geometries and {} lights",
        scene.name,
        scene.geometries.len(),
        scene.light_count()
    );

    let camera = Camera::new(
        Point3::new(0.0, 0.0, 1000.0),
        Vector3::new(0.0, 0.0, -1.0)?,
        Vector3::new(0.0, 1.0, 0.0)?,
    )?
    .with_view_plane_size(200.0, 200.0)?
    .with_distance(1000.0)?;

    let tracer = BasicRayTracer::new(scene)
        .with_glossy(GlossySampling::new(35, 100.0, 2.0)?)
        .with_seed(7);

    let image = Arc::new(ImageBuffer::new(400, 400));
    Renderer::new()
        .with_camera(camera)
        .with_ray_tracer(Arc::new(tracer))
        .with_pixel_sink(image.clone())
        .with_multithreading(0)
        .with_debug_print()
        .render_image()?;

    let filename = "glossy_spheres.ppm";
    save_ppm(&image, filename)?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene> {
    let shiny = |kr: f64| Material::new(0.8, 0.8, 30).with_reflection(kr);
    let attenuated = |light: SpotLight| light.with_attenuation(1.0, 1e-5, 1.5e-7);
    let orange = Color::new(400.0, 240.0, 0.0) / 255.0;

    let scene = Scene::new("Glossy spheres")
        .with_ambient_light(AmbientLight::new(Color::splat(0.1), 0.1))
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(0.0, 0.0, -700.0), 60.0)?)
                .with_emission(Color::new(1.0, 0.0, 0.0))
                .with_material(shiny(0.9)),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(70.0, 40.0, -860.0), 20.0)?)
                .with_emission(Color::new(0.0, 1.0, 0.0))
                .with_material(shiny(0.9).with_transparency(0.1)),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(200.0, 50.0, -900.0), 50.0)?)
                .with_emission(Color::splat(0.5))
                .with_material(shiny(0.9)),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(-150.0, 200.0, -800.0), 50.0)?)
                .with_emission(Color::new(1.0, 1.0, 0.0))
                .with_material(shiny(0.9)),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(0.0, 100.0, -800.0), 50.0)?)
                .with_emission(Color::new(1.0, 0.78, 0.0))
                .with_material(shiny(0.5)),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point3::new(-200.0, -100.0, -730.0), 70.0)?)
                .with_emission(Color::new(1.0, 0.69, 0.69))
                .with_material(Material::new(0.5, 0.5, 50)),
        )
        .with_geometry(
            Geometry::new(Triangle::new(
                Point3::new(-60.0, -30.0, -170.0),
                Point3::new(-30.0, -60.0, 0.0),
                Point3::new(-28.0, -28.0, -4.0),
            )?)
            .with_emission(Color::new(0.0, 1.0, 0.0))
            .with_material(Material::new(0.4, 0.4, 30).with_transparency(0.5)),
        )
        .with_light(attenuated(SpotLight::new(
            orange,
            Point3::new(-390.0, -390.0, 400.0),
            Vector3::new(1.0, 1.0, -3.0)?,
        )))
        .with_light(attenuated(SpotLight::new(
            orange,
            Point3::new(390.0, -390.0, 400.0),
            Vector3::new(0.0, 0.0, -1.0)?,
        )))
        .with_light(attenuated(SpotLight::new(
            orange,
            Point3::new(290.0, -490.0, 0.03),
            Vector3::new(0.0, 0.0, -200.0)?,
        )));

    Ok(scene)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for rgba in image.to_rgba().chunks_exact(4) {
        writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
    }

    writer.flush()
}
