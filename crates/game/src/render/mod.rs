//! Rendering: scene batches, bloom blur and the tone-mapped composite.

use anyhow::Result;
use engine_core::Transform;
use glam::Vec3;
use renderer::{DrawBatch, InstanceData, LitMode};

use crate::character;
use crate::lane::{EntityKind, LaneEntity};
use crate::GameState;

/// Ground tiles laid out along -Z.
const GROUND_TILES: usize = 10;
const GROUND_TILE_SIZE: f32 = 2.0;

const OBSTACLE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const COLLECTIBLE_COLOR: [f32; 4] = [1.0, 0.85, 0.35, 1.0];
const PLAIN: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn ground_instances() -> Vec<InstanceData> {
    (0..GROUND_TILES)
        .map(|i| {
            let t = Transform::from_position(Vec3::new(0.0, 0.0, -GROUND_TILE_SIZE * i as f32));
            InstanceData::from_transform(&t, PLAIN)
        })
        .collect()
}

fn entity_instance(entity: &LaneEntity) -> InstanceData {
    match entity.kind() {
        EntityKind::Obstacle => InstanceData::from_transform(&entity.transform(), OBSTACLE_COLOR),
        EntityKind::Collectible => {
            InstanceData::from_transform(&entity.transform(), COLLECTIBLE_COLOR).emissive(true)
        }
    }
}

fn vegetation_instances(entities: &[LaneEntity]) -> Vec<InstanceData> {
    entities
        .iter()
        .filter_map(LaneEntity::vegetation_transform)
        .map(|t| InstanceData::from_transform(&t, PLAIN))
        .collect()
}

/// Run all render passes. Called from `GameState::render()`.
pub fn run(state: &mut GameState) -> Result<()> {
    let ground = ground_instances();
    let entities = state.stream.entities();
    let cubes: Vec<InstanceData> = entities.iter().map(entity_instance).collect();
    let vegetation = vegetation_instances(entities);
    let panda = character::instances(state.program.session.player_x());

    let batches = [
        DrawBatch {
            mesh: &state.meshes.ground,
            material: state.materials.ground,
            mode: LitMode::Opaque,
            instances: &ground,
        },
        DrawBatch {
            mesh: &state.meshes.cube,
            material: state.materials.brick,
            mode: LitMode::Opaque,
            instances: &cubes,
        },
        DrawBatch {
            mesh: &state.meshes.vegetation,
            material: state.materials.grass,
            mode: LitMode::Blended,
            instances: &vegetation,
        },
        DrawBatch {
            mesh: &state.meshes.cube,
            material: state.materials.white,
            mode: LitMode::Opaque,
            instances: &panda,
        },
    ];

    let post = state.program.post;
    state.renderer.update_camera(&state.camera);
    state.renderer.upload_lights(&state.program.lights);
    state.renderer.update_post(post);

    let (output, mut encoder) = state.renderer.begin_frame()?;
    let output_view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

    state.renderer.scene_pass(&mut encoder, &batches);
    if post.bloom {
        state.renderer.run_blur_passes(&mut encoder);
    }
    state.renderer.run_composite_pass(&mut encoder, &output_view, post.bloom);

    state.renderer.end_frame(output, encoder);
    Ok(())
}
