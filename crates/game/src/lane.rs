//! The lane stream: obstacle/collectible pairs approaching the player, and the
//! collision / pickup rules that resolve against the player's lane.

use engine_core::Transform;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::session::Session;

/// Every lateral offset the player can occupy, in quarter steps.
pub const LANE_POSITIONS: [f32; 7] = [-0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75];

/// Offsets entities spawn on. Taken from [`LANE_POSITIONS`] so comparisons with the
/// player's position are exact.
pub const LANES: [f32; 5] = [
    LANE_POSITIONS[1],
    LANE_POSITIONS[2],
    LANE_POSITIONS[3],
    LANE_POSITIONS[4],
    LANE_POSITIONS[5],
];

/// Depth new entities appear at.
pub const SPAWN_DEPTH: f32 = -8.0;
/// Default height of an entity's centre.
pub const ENTITY_HEIGHT: f32 = 0.5;
/// A new pair is spawned once the farthest entity is nearer than this.
pub const SPAWN_TRIGGER_DEPTH: f32 = -5.0;
/// Obstacles at or past this depth in the player's lane end the run.
pub const COLLISION_DEPTH: f32 = 0.6;
/// Collectibles at or past this depth in the player's lane are picked up.
pub const PICKUP_DEPTH: f32 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle,
    Collectible,
}

impl EntityKind {
    /// Uniform render scale.
    pub fn scale(self) -> f32 {
        match self {
            EntityKind::Obstacle => 0.3,
            EntityKind::Collectible => 0.1,
        }
    }

    /// Depth past which the entity is behind the camera and retired.
    pub fn pass_depth(self) -> f32 {
        match self {
            EntityKind::Obstacle => 0.9,
            EntityKind::Collectible => 1.0,
        }
    }
}

/// One obstacle or collectible on the lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneEntity {
    pub lateral: f32,
    pub vertical: f32,
    pub depth: f32,
    kind: EntityKind,
}

impl LaneEntity {
    /// A new entity at the spawn depth.
    pub fn new(kind: EntityKind, lateral: f32) -> Self {
        Self::at(kind, lateral, SPAWN_DEPTH)
    }

    pub fn at(kind: EntityKind, lateral: f32, depth: f32) -> Self {
        Self {
            lateral,
            vertical: ENTITY_HEIGHT,
            depth,
            kind,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.lateral, self.vertical, self.depth)
    }

    /// Translate to the entity's position, then scale by its kind.
    pub fn transform(&self) -> Transform {
        Transform::from_position_scale(self.position(), self.kind.scale())
    }

    /// Vegetation card drawn beside an obstacle. Collectibles have none.
    pub fn vegetation_transform(&self) -> Option<Transform> {
        match self.kind {
            EntityKind::Obstacle => Some(Transform::from_position_scale(
                Vec3::new(self.lateral - 0.4, self.vertical, self.depth + 0.2),
                0.6,
            )),
            EntityKind::Collectible => None,
        }
    }
}

/// What happened during one [`LaneStream::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub picked_up: u32,
    pub collided: bool,
    pub spawned: bool,
}

/// Owns the active entities in insertion order.
#[derive(Debug)]
pub struct LaneStream<R = StdRng> {
    entities: Vec<LaneEntity>,
    rng: R,
}

impl LaneStream<StdRng> {
    /// A stream holding one initial pair. `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut stream = Self::empty(rng);
        stream.spawn_pair();
        stream
    }
}

impl<R: Rng> LaneStream<R> {
    /// A stream with no entities.
    pub fn empty(rng: R) -> Self {
        Self {
            entities: Vec::new(),
            rng,
        }
    }

    pub fn entities(&self) -> &[LaneEntity] {
        &self.entities
    }

    /// Append an obstacle on a random lane and a collectible on the same lane.
    pub fn spawn_pair(&mut self) {
        let lateral = LANES[self.rng.gen_range(0..LANES.len())];
        self.entities.push(LaneEntity::new(EntityKind::Obstacle, lateral));
        self.entities.push(LaneEntity::new(EntityKind::Collectible, lateral));
    }

    /// Move every entity `dt * session.speed` toward the player, retire the ones behind
    /// the camera, resolve collisions and pickups against the player's lane, then spawn a
    /// new pair if the farthest entity has come close enough.
    ///
    /// The spawn check uses depths from before this tick's movement, including entities
    /// that were retired or consumed during it.
    pub fn advance(&mut self, dt: f32, session: &mut Session) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let player = session.player_x();
        let step = dt * session.speed;
        let mut farthest = 0.0_f32;

        let mut i = 0;
        while i < self.entities.len() {
            let LaneEntity {
                lateral,
                depth,
                kind,
                ..
            } = self.entities[i];
            farthest = farthest.min(depth);
            let new_depth = depth + step;

            if new_depth >= kind.pass_depth() {
                self.entities.remove(i);
                continue;
            }

            let in_lane = lateral == player;
            match kind {
                EntityKind::Obstacle if in_lane && new_depth >= COLLISION_DEPTH => {
                    self.entities.clear();
                    let final_score = session.score;
                    session.end_run();
                    log::info!(
                        "Game over in lane {lateral}: score {final_score}, high score {}",
                        session.high_score
                    );
                    outcome.collided = true;
                    break;
                }
                EntityKind::Collectible if in_lane && new_depth >= PICKUP_DEPTH => {
                    self.entities.remove(i);
                    session.score += 1;
                    outcome.picked_up += 1;
                    log::debug!("Pickup, score {}", session.score);
                    continue;
                }
                _ => {}
            }

            self.entities[i].depth = new_depth;
            i += 1;
        }

        if farthest > SPAWN_TRIGGER_DEPTH && !session.game_over {
            self.spawn_pair();
            outcome.spawned = true;
        }
        outcome
    }

    /// Empty the stream and start a fresh run. The next `advance` refills it.
    pub fn reset(&mut self, session: &mut Session) {
        self.entities.clear();
        session.reset_run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_with(entities: &[LaneEntity]) -> LaneStream {
        LaneStream {
            entities: entities.to_vec(),
            rng: StdRng::seed_from_u64(1),
        }
    }

    /// Keeps the spawn rule quiet for tests that only look at nearby entities.
    fn far() -> LaneEntity {
        LaneEntity::at(EntityKind::Collectible, -0.5, -7.0)
    }

    fn session_at(lane: f32, speed: f32) -> Session {
        let mut session = Session::default();
        session.speed = speed;
        for _ in 0..LANE_POSITIONS.len() {
            session.step(-1);
        }
        while session.player_x() != lane {
            assert!(session.player_x() < lane, "{lane} is not a player position");
            session.step(1);
        }
        session
    }

    #[test]
    fn starts_with_one_pair_on_a_shared_lane() {
        let stream = LaneStream::new(Some(42));
        let e = stream.entities();
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].kind(), EntityKind::Obstacle);
        assert_eq!(e[1].kind(), EntityKind::Collectible);
        assert_eq!(e[0].lateral, e[1].lateral);
        assert!(LANES.contains(&e[0].lateral));
        assert_eq!(e[0].depth, SPAWN_DEPTH);
        assert_eq!(e[0].vertical, ENTITY_HEIGHT);
    }

    #[test]
    fn same_seed_same_lanes() {
        let mut a = LaneStream::new(Some(9));
        let mut b = LaneStream::new(Some(9));
        for _ in 0..20 {
            a.spawn_pair();
            b.spawn_pair();
        }
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn advance_moves_by_dt_times_speed() {
        let start = [
            LaneEntity::at(EntityKind::Obstacle, 0.5, -7.3),
            LaneEntity::at(EntityKind::Collectible, 0.5, -6.1),
        ];
        let mut stream = stream_with(&start);
        let mut session = session_at(-0.5, 2.5);
        let dt = 0.016;
        stream.advance(dt, &mut session);
        for (before, after) in start.iter().zip(stream.entities()) {
            assert_eq!(after.depth, before.depth + dt * 2.5);
        }
    }

    #[test]
    fn approaching_obstacle_below_threshold_only_moves() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, 0.0, -0.62), far()]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.1, &mut session);
        assert!(!outcome.collided);
        assert!(!outcome.spawned);
        assert!(!session.game_over);
        assert_eq!(stream.entities().len(), 2);
        assert_eq!(stream.entities()[0].depth, -0.62 + 0.1 * 1.0);
        assert!((stream.entities()[0].depth - -0.52).abs() < 1e-6);
    }

    #[test]
    fn obstacle_in_player_lane_ends_the_run() {
        let mut stream = stream_with(&[
            LaneEntity::at(EntityKind::Obstacle, 0.25, 0.55),
            LaneEntity::at(EntityKind::Collectible, 0.25, -3.0),
        ]);
        let mut session = session_at(0.25, 1.0);
        session.score = 4;
        session.high_score = 2;
        let outcome = stream.advance(0.1, &mut session);
        assert!(outcome.collided);
        assert!(!outcome.spawned);
        assert!(stream.entities().is_empty());
        assert!(session.game_over);
        assert_eq!(session.high_score, 4);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn collision_keeps_a_higher_high_score() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, -0.5, 0.7)]);
        let mut session = session_at(-0.5, 1.0);
        session.score = 3;
        session.high_score = 10;
        stream.advance(0.01, &mut session);
        assert!(session.game_over);
        assert_eq!(session.high_score, 10);
    }

    #[test]
    fn collision_abandons_the_rest_of_the_tick() {
        let mut stream = stream_with(&[
            LaneEntity::at(EntityKind::Obstacle, 0.0, 0.65),
            LaneEntity::at(EntityKind::Collectible, 0.0, 0.7),
        ]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.01, &mut session);
        assert!(outcome.collided);
        assert_eq!(outcome.picked_up, 0);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn obstacle_in_other_lane_passes() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, 0.5, 0.7), far()]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.05, &mut session);
        assert!(!outcome.collided);
        assert_eq!(stream.entities().len(), 2);
    }

    #[test]
    fn pickup_scores_once_and_continues() {
        let mut stream = stream_with(&[
            LaneEntity::at(EntityKind::Collectible, -0.25, 0.6),
            LaneEntity::at(EntityKind::Obstacle, 0.5, -2.0),
            far(),
        ]);
        let mut session = session_at(-0.25, 1.0);
        let outcome = stream.advance(0.1, &mut session);
        assert_eq!(outcome.picked_up, 1);
        assert_eq!(session.score, 1);
        assert!(!session.game_over);
        assert_eq!(stream.entities().len(), 2);
        assert_eq!(stream.entities()[0].kind(), EntityKind::Obstacle);
        assert_eq!(stream.entities()[0].depth, -2.0 + 0.1);
    }

    #[test]
    fn collectible_in_other_lane_is_not_picked_up() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Collectible, 0.5, 0.8), far()]);
        let mut session = session_at(0.25, 1.0);
        stream.advance(0.1, &mut session);
        assert_eq!(session.score, 0);
        assert_eq!(stream.entities().len(), 2);
    }

    #[test]
    fn entities_past_the_camera_are_retired_without_scoring() {
        let mut stream = stream_with(&[
            LaneEntity::at(EntityKind::Obstacle, 0.5, 0.85),
            LaneEntity::at(EntityKind::Collectible, 0.5, 0.95),
            LaneEntity::at(EntityKind::Collectible, -0.25, 0.85),
            far(),
        ]);
        let mut session = session_at(0.0, 1.0);
        stream.advance(0.1, &mut session);
        // obstacle reaches 0.95 >= 0.9, first collectible 1.05 >= 1.0, last one 0.95 < 1.0
        assert_eq!(stream.entities().len(), 2);
        assert_eq!(stream.entities()[0].lateral, -0.25);
        assert_eq!(session.score, 0);
        assert!(!session.game_over);
    }

    #[test]
    fn retirement_wins_over_collision_for_passed_obstacles() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, 0.0, 0.5)]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.5, &mut session);
        assert!(!outcome.collided);
        assert!(!session.game_over);
    }

    #[test]
    fn spawns_when_farthest_is_near() {
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, 0.5, -4.9)]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.01, &mut session);
        assert!(outcome.spawned);
        let e = stream.entities();
        assert_eq!(e.len(), 3);
        assert_eq!(e[1].kind(), EntityKind::Obstacle);
        assert_eq!(e[2].kind(), EntityKind::Collectible);
        assert_eq!(e[1].lateral, e[2].lateral);
        assert_eq!(e[1].depth, SPAWN_DEPTH);
    }

    #[test]
    fn no_spawn_while_a_far_entity_remains() {
        let mut stream = stream_with(&[
            LaneEntity::at(EntityKind::Obstacle, 0.5, -1.0),
            LaneEntity::at(EntityKind::Obstacle, 0.5, -6.0),
        ]);
        let mut session = session_at(0.0, 1.0);
        let outcome = stream.advance(0.01, &mut session);
        assert!(!outcome.spawned);
        assert_eq!(stream.entities().len(), 2);
    }

    #[test]
    fn spawn_trigger_uses_depth_before_the_move() {
        // -5.0 moves to -4.99 this tick, but the pre-move depth is not past the trigger
        let mut stream = stream_with(&[LaneEntity::at(EntityKind::Obstacle, 0.5, -5.0)]);
        let mut session = session_at(0.0, 1.0);
        assert!(!stream.advance(0.01, &mut session).spawned);
        assert!(stream.advance(0.01, &mut session).spawned);
    }

    #[test]
    fn empty_stream_spawns_unless_game_over() {
        let mut stream = stream_with(&[]);
        let mut session = session_at(0.0, 1.0);
        session.game_over = true;
        assert!(!stream.advance(0.016, &mut session).spawned);
        assert!(stream.entities().is_empty());

        session.game_over = false;
        assert!(stream.advance(0.016, &mut session).spawned);
        assert_eq!(stream.entities().len(), 2);
    }

    #[test]
    fn exactly_one_pair_per_tick() {
        let mut stream = stream_with(&[]);
        let mut session = session_at(-0.75, 1.5);
        for _ in 0..200 {
            let before = stream.entities().len();
            let outcome = stream.advance(0.016, &mut session);
            if outcome.spawned {
                let tail = &stream.entities()[stream.entities().len() - 2..];
                assert_eq!(tail[0].lateral, tail[1].lateral);
                assert!(stream.entities().len() <= before + 2);
            }
        }
    }

    #[test]
    fn reset_always_yields_a_fresh_run() {
        let mut stream = LaneStream::new(Some(3));
        let mut session = session_at(0.0, 3.0);
        session.score = 12;
        session.game_over = true;
        stream.reset(&mut session);
        assert!(stream.entities().is_empty());
        assert_eq!(session.score, 0);
        assert!(!session.game_over);
        stream.reset(&mut session);
        assert!(stream.entities().is_empty());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn render_transforms_follow_kind() {
        let obstacle = LaneEntity::at(EntityKind::Obstacle, 0.25, -3.0);
        let coin = LaneEntity::at(EntityKind::Collectible, 0.25, -3.0);
        assert_eq!(obstacle.transform().scale, Vec3::splat(0.3));
        assert_eq!(coin.transform().scale, Vec3::splat(0.1));
        assert_eq!(obstacle.transform().position, Vec3::new(0.25, 0.5, -3.0));

        let veg = obstacle.vegetation_transform().map(|t| t.position);
        assert_eq!(veg, Some(Vec3::new(0.25 - 0.4, 0.5, -3.0 + 0.2)));
        assert!(coin.vegetation_transform().is_none());
    }

    #[test]
    fn lanes_are_a_subset_of_player_positions() {
        for lane in LANES {
            assert!(LANE_POSITIONS.iter().any(|p| p.to_bits() == lane.to_bits()));
        }
    }
}
