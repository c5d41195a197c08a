//! Bloom post-process: blur ping-pong schedule and composite settings.

use bytemuck::{Pod, Zeroable};

/// Default number of separable blur passes.
pub const DEFAULT_BLUR_ITERATIONS: u32 = 50;

/// Where a blur pass samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurSource {
    /// The scene target's bright-only output.
    Bright,
    /// One of the two ping-pong buffers.
    PingPong(usize),
}

/// One 1-D blur pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurStep {
    pub horizontal: bool,
    pub source: BlurSource,
    /// Ping-pong buffer written by this pass.
    pub target: usize,
}

impl BlurStep {
    /// Only three source/direction pairings ever occur; this indexes them so bind groups
    /// can be built once.
    pub fn binding_slot(&self) -> usize {
        match (self.source, self.horizontal) {
            (BlurSource::Bright, _) => 0,
            (BlurSource::PingPong(_), false) => 1,
            (BlurSource::PingPong(_), true) => 2,
        }
    }
}

/// The sequence of blur passes for a given iteration count.
///
/// Pass `i` is horizontal when `i` is even and writes buffer 1 when horizontal, buffer 0
/// otherwise. The first pass reads the bright output; every later pass reads the buffer
/// the previous one wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurSchedule {
    iterations: u32,
}

impl BlurSchedule {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn step(&self, i: u32) -> BlurStep {
        let horizontal = i % 2 == 0;
        let target = usize::from(horizontal);
        let source = if i == 0 {
            BlurSource::Bright
        } else {
            BlurSource::PingPong(1 - target)
        };
        BlurStep {
            horizontal,
            source,
            target,
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = BlurStep> + '_ {
        (0..self.iterations).map(|i| self.step(i))
    }

    /// What the composite pass should sample as the blurred term.
    pub fn result(&self) -> BlurSource {
        match self.iterations {
            0 => BlurSource::Bright,
            n => BlurSource::PingPong(self.step(n - 1).target),
        }
    }
}

impl Default for BlurSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_ITERATIONS)
    }
}

/// Direction uniform for the blur shader (must match blur.wgsl BlurUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BlurUniform {
    pub direction: [f32; 4],
}

impl BlurUniform {
    pub fn new(horizontal: bool) -> Self {
        let direction = if horizontal {
            [1.0, 0.0, 0.0, 0.0]
        } else {
            [0.0, 1.0, 0.0, 0.0]
        };
        Self { direction }
    }
}

/// Runtime-tunable composite parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostSettings {
    pub bloom: bool,
    pub exposure: f32,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            bloom: true,
            exposure: 1.0,
        }
    }
}

/// Composite uniform (must match composite.wgsl CompositeUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CompositeUniform {
    pub exposure: f32,
    /// 1.0 adds the blurred bright term, 0.0 leaves the scene alone.
    pub bloom: f32,
    pub _pad: [f32; 2],
}

impl From<PostSettings> for CompositeUniform {
    fn from(s: PostSettings) -> Self {
        Self {
            exposure: s.exposure,
            bloom: if s.bloom { 1.0 } else { 0.0 },
            _pad: [0.0; 2],
        }
    }
}

/// CPU mirror of the composite shader, used to pin down the tone curve.
pub fn tone_map(scene: f32, blur: f32, settings: PostSettings) -> f32 {
    let u = CompositeUniform::from(settings);
    1.0 - (-(scene + u.bloom * blur) * u.exposure).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_passes_end_in_buffer_zero() {
        let schedule = BlurSchedule::default();
        assert_eq!(schedule.iterations(), 50);
        assert_eq!(schedule.result(), BlurSource::PingPong(0));
        let last = schedule.steps().last();
        assert_eq!(last.map(|s| s.target), Some(0));
    }

    #[test]
    fn odd_count_ends_in_buffer_one() {
        assert_eq!(BlurSchedule::new(3).result(), BlurSource::PingPong(1));
    }

    #[test]
    fn zero_passes_fall_back_to_bright_output() {
        let schedule = BlurSchedule::new(0);
        assert_eq!(schedule.steps().count(), 0);
        assert_eq!(schedule.result(), BlurSource::Bright);
    }

    #[test]
    fn each_pass_reads_what_the_previous_wrote() {
        let steps: Vec<BlurStep> = BlurSchedule::default().steps().collect();
        assert_eq!(steps[0].source, BlurSource::Bright);
        assert!(steps[0].horizontal);
        for pair in steps.windows(2) {
            assert_eq!(pair[1].source, BlurSource::PingPong(pair[0].target));
            assert_ne!(pair[0].horizontal, pair[1].horizontal);
            assert_ne!(BlurSource::PingPong(pair[1].target), pair[1].source);
        }
    }

    #[test]
    fn binding_slots_cover_three_pairings() {
        let schedule = BlurSchedule::new(4);
        let slots: Vec<usize> = schedule.steps().map(|s| s.binding_slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 1]);
    }

    #[test]
    fn composite_ignores_blur_when_bloom_is_off() {
        let off = PostSettings {
            bloom: false,
            exposure: 1.0,
        };
        let on = PostSettings { bloom: true, ..off };
        assert_eq!(tone_map(0.5, 10.0, off), tone_map(0.5, 0.0, off));
        assert!(tone_map(0.5, 1.0, on) > tone_map(0.5, 1.0, off));
    }

    #[test]
    fn tone_map_stays_below_one() {
        let s = PostSettings {
            bloom: true,
            exposure: 10.0,
        };
        let v = tone_map(4.0, 4.0, s);
        assert!(v > 0.99 && v <= 1.0);
        assert_eq!(tone_map(0.0, 0.0, s), 0.0);
    }
}
