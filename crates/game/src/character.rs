//! The player character: a panda assembled from coloured unit cubes.

use engine_core::Transform;
use glam::Vec3;
use renderer::InstanceData;

/// Where the character stands relative to its lane offset.
pub const CHARACTER_HEIGHT: f32 = 0.6;
pub const CHARACTER_DEPTH: f32 = 0.7;

const WHITE: [f32; 4] = [0.95, 0.95, 0.92, 1.0];
const BLACK: [f32; 4] = [0.05, 0.05, 0.06, 1.0];

/// One box of the model, relative to the character origin.
struct Part {
    offset: Vec3,
    size: Vec3,
    color: [f32; 4],
}

const fn part(offset: [f32; 3], size: [f32; 3], color: [f32; 4]) -> Part {
    Part {
        offset: Vec3::from_array(offset),
        size: Vec3::from_array(size),
        color,
    }
}

// Facing -Z (away from the camera), so the back of the head is what the player sees.
const PARTS: [Part; 10] = [
    // body
    part([0.0, -0.02, 0.0], [0.16, 0.14, 0.12], WHITE),
    // belt of black around the shoulders
    part([0.0, 0.04, 0.0], [0.165, 0.04, 0.125], BLACK),
    // head
    part([0.0, 0.12, -0.01], [0.13, 0.11, 0.11], WHITE),
    // ears
    part([-0.055, 0.19, -0.01], [0.04, 0.04, 0.03], BLACK),
    part([0.055, 0.19, -0.01], [0.04, 0.04, 0.03], BLACK),
    // eye patches, on the far side of the head
    part([-0.03, 0.13, -0.066], [0.03, 0.025, 0.01], BLACK),
    part([0.03, 0.13, -0.066], [0.03, 0.025, 0.01], BLACK),
    // legs
    part([-0.05, -0.11, 0.0], [0.05, 0.06, 0.06], BLACK),
    part([0.05, -0.11, 0.0], [0.05, 0.06, 0.06], BLACK),
    // tail
    part([0.0, -0.04, 0.065], [0.03, 0.03, 0.02], WHITE),
];

/// Character origin for a player at lateral offset `x`.
pub fn origin(x: f32) -> Vec3 {
    Vec3::new(x, CHARACTER_HEIGHT, CHARACTER_DEPTH)
}

/// Cube instances for the character at lateral offset `x`.
pub fn instances(x: f32) -> Vec<InstanceData> {
    let base = origin(x);
    PARTS
        .iter()
        .map(|p| {
            let t = Transform::from_position_scale3(base + p.offset, p.size);
            InstanceData::from_transform(&t, p.color)
        })
        .collect()
}
