//! Core engine types shared by the renderer and the game.
//!
//! - Frame clock (`Time`)
//! - Spatial transforms (`Transform`)

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
