use std::{error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::{rngs::SmallRng, SeedableRng};

use spheretracer::{
    render, render_seeded,
    scene::{cover_camera, cover_scene, simple_camera, simple_scene},
    CameraConfig, FrameBuffer, Scene,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Ground, hundreds of small random spheres and three large ones.
    Cover,
    /// Ground and three spheres, quick to render.
    Simple,
}

#[derive(Parser, Debug)]
#[command(version, about = "Path trace a scene of spheres")]
struct Args {
    #[arg(long, value_enum, default_value_t = Preset::Cover)]
    scene: Preset,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Width over height.
    #[arg(long)]
    aspect_ratio: Option<f64>,

    /// Samples per pixel.
    #[arg(long)]
    samples: Option<usize>,

    /// Maximum bounces per path.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    vfov: Option<f64>,

    /// Defocus cone angle in degrees, 0 disables depth of field.
    #[arg(long)]
    defocus_angle: Option<f64>,

    #[arg(long)]
    focus_dist: Option<f64>,

    /// Seed for scene layout and sampling; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value = "output_image.png")]
    output: PathBuf,

    /// Skip writing the PNG.
    #[arg(long)]
    no_output: bool,

    /// Show the image in a window, Space renders again, Escape quits.
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

impl Args {
    fn camera(&self) -> CameraConfig {
        let mut config = match self.scene {
            Preset::Cover => cover_camera(),
            Preset::Simple => simple_camera(),
        };
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            config.aspect_ratio = aspect_ratio;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(vfov) = self.vfov {
            config.vfov = vfov;
        }
        if let Some(defocus_angle) = self.defocus_angle {
            config.defocus_angle = defocus_angle;
        }
        if let Some(focus_dist) = self.focus_dist {
            config.focus_dist = focus_dist;
        }
        config
    }

    fn scene(&self) -> Scene {
        match self.scene {
            Preset::Cover => {
                let mut rng = match self.seed {
                    Some(seed) => SmallRng::seed_from_u64(seed),
                    None => SmallRng::from_entropy(),
                };
                cover_scene(&mut rng)
            }
            Preset::Simple => simple_scene(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.camera();
    config.validate()?;
    if config.max_depth == 0 {
        warn!("max depth is 0, every pixel will be black");
    }

    let scene = args.scene();
    info!("scene has {} objects", scene.len());

    let mut frame_buffer = FrameBuffer::for_camera(&config);
    match args.seed {
        Some(seed) => render_seeded(&config, &scene, frame_buffer.pixel_data_mut(), seed)?,
        None => render(&config, &scene, frame_buffer.pixel_data_mut())?,
    }

    if !args.no_output {
        frame_buffer.save_png(&args.output)?;
        info!("wrote {}", args.output.display());
    }

    #[cfg(feature = "window")]
    if args.window {
        show(&config, &scene, &mut frame_buffer)?;
    }

    Ok(())
}

#[cfg(feature = "window")]
fn show(
    config: &CameraConfig,
    scene: &Scene,
    frame_buffer: &mut FrameBuffer,
) -> Result<(), Box<dyn Error>> {
    use sdl2::{event::Event, keyboard::Keycode, pixels::PixelFormatEnum};

    let sdl2_context = sdl2::init()?;
    let mut canvas = sdl2_context
        .video()?
        .window("spheretracer", 1280, 720)
        .position_centered()
        .resizable()
        .build()?
        .into_canvas()
        .present_vsync()
        .build()?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator.create_texture_streaming(
        PixelFormatEnum::RGB24,
        frame_buffer.width() as u32,
        frame_buffer.height() as u32,
    )?;
    let mut events = sdl2_context.event_pump()?;

    'main: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => {
                    info!("rendering again");
                    render(config, scene, frame_buffer.pixel_data_mut())?;
                }
                _ => continue,
            }
        }

        texture.update(None, frame_buffer.pixel_data(), frame_buffer.pitch())?;
        canvas.clear();
        canvas.copy(&texture, None, None)?;
        canvas.present();
    }
    Ok(())
}
