//! Rendering system using wgpu: lit scene into HDR targets, ping-pong bloom blur,
//! exposure tone-map composite.

pub mod bloom;
pub mod camera;
pub mod lights;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod targets;
pub mod texture;
pub mod vertex;

pub use bloom::*;
pub use camera::*;
pub use lights::*;
pub use mesh::*;
pub use pipeline::*;
pub use renderer::*;
pub use targets::*;
pub use texture::*;
pub use vertex::*;
