//! Stochastic path tracer for scenes made of spheres.
//!
//! A [`CameraConfig`] and a [`Scene`] go in, an RGB8 buffer comes out. Scene
//! construction, image encoding and display are left to the caller; see the
//! binary for one way of wiring them up.

pub mod camera;
pub mod color;
pub mod error;
pub mod frame;
pub mod hit;
pub mod interval;
pub mod material;
pub mod ray;
pub mod render;
pub mod sampling;
pub mod scene;
pub mod sphere;

pub use camera::{Camera, CameraConfig};
pub use color::Color;
pub use error::{ConfigError, FrameError, RenderError};
pub use frame::FrameBuffer;
pub use hit::{Hit, Record};
pub use interval::Interval;
pub use material::Material;
pub use ray::{Point3, Ray};
pub use render::{ray_color, render, render_seeded};
pub use scene::Scene;
pub use sphere::Sphere;
