//! Keyboard-driven settings overlay: a flat list of editable fields over the program
//! state, shown in the window title while enabled.

use glam::Vec3;

use crate::session::{ProgramState, SPEED_RANGE};

const COLOR_STEP: f32 = 0.02;
const VECTOR_STEP: f32 = 0.1;

/// Which light vector a component field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LightVec {
    DirDirection,
    DirAmbient,
    DirDiffuse,
    DirSpecular,
    SpotPosition,
    SpotDirection,
    SpotAmbient,
    SpotDiffuse,
    SpotSpecular,
}

impl LightVec {
    fn get(self, state: &ProgramState) -> Vec3 {
        let l = &state.lights;
        match self {
            LightVec::DirDirection => l.dir.direction,
            LightVec::DirAmbient => l.dir.ambient,
            LightVec::DirDiffuse => l.dir.diffuse,
            LightVec::DirSpecular => l.dir.specular,
            LightVec::SpotPosition => l.spot.position,
            LightVec::SpotDirection => l.spot.direction,
            LightVec::SpotAmbient => l.spot.ambient,
            LightVec::SpotDiffuse => l.spot.diffuse,
            LightVec::SpotSpecular => l.spot.specular,
        }
    }

    fn get_mut(self, state: &mut ProgramState) -> &mut Vec3 {
        let l = &mut state.lights;
        match self {
            LightVec::DirDirection => &mut l.dir.direction,
            LightVec::DirAmbient => &mut l.dir.ambient,
            LightVec::DirDiffuse => &mut l.dir.diffuse,
            LightVec::DirSpecular => &mut l.dir.specular,
            LightVec::SpotPosition => &mut l.spot.position,
            LightVec::SpotDirection => &mut l.spot.direction,
            LightVec::SpotAmbient => &mut l.spot.ambient,
            LightVec::SpotDiffuse => &mut l.spot.diffuse,
            LightVec::SpotSpecular => &mut l.spot.specular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Exposure,
    Bloom,
    Speed,
    Component(LightVec, usize),
    SpotConstant,
    SpotLinear,
    SpotQuadratic,
}

impl Slot {
    fn get(self, state: &ProgramState) -> Reading {
        match self {
            Slot::Exposure => Reading::Scalar(state.post.exposure),
            Slot::Bloom => Reading::Toggle(state.post.bloom),
            Slot::Speed => Reading::Scalar(state.session.speed),
            Slot::Component(v, axis) => Reading::Scalar(v.get(state)[axis]),
            Slot::SpotConstant => Reading::Scalar(state.lights.spot.constant),
            Slot::SpotLinear => Reading::Scalar(state.lights.spot.linear),
            Slot::SpotQuadratic => Reading::Scalar(state.lights.spot.quadratic),
        }
    }

    fn get_mut(self, state: &mut ProgramState) -> Value<'_> {
        match self {
            Slot::Exposure => Value::Scalar(&mut state.post.exposure),
            Slot::Bloom => Value::Toggle(&mut state.post.bloom),
            Slot::Speed => Value::Scalar(&mut state.session.speed),
            Slot::Component(v, axis) => Value::Scalar(&mut v.get_mut(state)[axis]),
            Slot::SpotConstant => Value::Scalar(&mut state.lights.spot.constant),
            Slot::SpotLinear => Value::Scalar(&mut state.lights.spot.linear),
            Slot::SpotQuadratic => Value::Scalar(&mut state.lights.spot.quadratic),
        }
    }
}

enum Value<'a> {
    Toggle(&'a mut bool),
    Scalar(&'a mut f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Reading {
    Toggle(bool),
    Scalar(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    step: f32,
    min: Option<f32>,
    max: Option<f32>,
}

impl Range {
    const fn new(step: f32, min: Option<f32>, max: Option<f32>) -> Self {
        Self { step, min, max }
    }

    fn apply(&self, value: f32, dir: i32) -> f32 {
        let mut v = value + self.step * dir as f32;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

const COLOR: Range = Range::new(COLOR_STEP, Some(0.0), None);
const VECTOR: Range = Range::new(VECTOR_STEP, None, None);

#[derive(Debug, Clone)]
struct PanelField {
    label: String,
    slot: Slot,
    range: Range,
}

/// The editable fields and the current selection.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    fields: Vec<PanelField>,
    selected: usize,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanel {
    pub fn new() -> Self {
        let mut fields = Vec::new();
        let mut push = |label: String, slot: Slot, range: Range| {
            fields.push(PanelField { label, slot, range })
        };

        push("Exposure".into(), Slot::Exposure, Range::new(0.1, Some(0.1), Some(10.0)));
        push("Bloom".into(), Slot::Bloom, Range::new(0.0, None, None));
        push(
            "Game level".into(),
            Slot::Speed,
            Range::new(0.1, Some(SPEED_RANGE.0), Some(SPEED_RANGE.1)),
        );

        let vectors = [
            ("Dir light direction", LightVec::DirDirection, VECTOR),
            ("Dir light ambient", LightVec::DirAmbient, COLOR),
            ("Dir light diffuse", LightVec::DirDiffuse, COLOR),
            ("Dir light specular", LightVec::DirSpecular, COLOR),
            ("Spot light position", LightVec::SpotPosition, VECTOR),
            ("Spot light direction", LightVec::SpotDirection, VECTOR),
            ("Spot light ambient", LightVec::SpotAmbient, COLOR),
            ("Spot light diffuse", LightVec::SpotDiffuse, COLOR),
            ("Spot light specular", LightVec::SpotSpecular, COLOR),
        ];
        for (name, vec, range) in vectors {
            for (axis, c) in ["x", "y", "z"].iter().enumerate() {
                push(format!("{name} {c}"), Slot::Component(vec, axis), range);
            }
        }

        push("Spot light constant".into(), Slot::SpotConstant, COLOR);
        push(
            "Spot light linear".into(),
            Slot::SpotLinear,
            Range::new(COLOR_STEP, Some(0.0), Some(1.0)),
        );
        push(
            "Spot light quadratic".into(),
            Slot::SpotQuadratic,
            Range::new(COLOR_STEP, Some(0.0), Some(1.0)),
        );

        Self { fields, selected: 0 }
    }

    pub fn selected_label(&self) -> &str {
        self.fields
            .get(self.selected)
            .map(|f| f.label.as_str())
            .unwrap_or("")
    }

    /// Move the selection by `step`, wrapping at both ends.
    pub fn select(&mut self, step: i32) {
        let n = self.fields.len() as i64;
        if n == 0 {
            return;
        }
        self.selected = (self.selected as i64 + step as i64).rem_euclid(n) as usize;
    }

    /// Nudge the selected field by `dir` steps, clamped to its range. Toggles flip on any
    /// non-zero `dir`.
    pub fn adjust(&self, state: &mut ProgramState, dir: i32) {
        if dir == 0 {
            return;
        }
        let Some(field) = self.fields.get(self.selected) else {
            return;
        };
        match field.slot.get_mut(state) {
            Value::Toggle(b) => *b = !*b,
            Value::Scalar(v) => *v = field.range.apply(*v, dir),
        }
    }

    /// `"label: value"` for the selected field.
    pub fn describe(&self, state: &ProgramState) -> String {
        let Some(field) = self.fields.get(self.selected) else {
            return String::new();
        };
        let value = match field.slot.get(state) {
            Reading::Toggle(b) => (if b { "on" } else { "off" }).to_string(),
            Reading::Scalar(v) => format!("{v:.2}"),
        };
        format!("{}: {}", self.selected_label(), value)
    }

    /// Window title: score and best, plus the selected field while the overlay is on.
    pub fn title(&self, state: &ProgramState) -> String {
        let session = &state.session;
        let mut title = format!(
            "Panda Run | Score: {} | High score: {}",
            session.score, session.high_score
        );
        if session.game_over {
            title.push_str(" | Game over (R to restart)");
        }
        if state.ui_enabled {
            title.push_str(&format!(
                " | [{}/{}] {}",
                self.selected + 1,
                self.fields.len(),
                self.describe(state)
            ));
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_label(panel: &mut SettingsPanel, label: &str) {
        for _ in 0..panel.fields.len() {
            if panel.selected_label() == label {
                return;
            }
            panel.select(1);
        }
        panic!("no field {label}");
    }

    #[test]
    fn lists_every_editable_setting() {
        let panel = SettingsPanel::new();
        // exposure, bloom, speed, 9 vectors * 3, constant, linear, quadratic
        assert_eq!(panel.fields.len(), 3 + 27 + 3);
        assert_eq!(panel.selected_label(), "Exposure");
    }

    #[test]
    fn selection_wraps() {
        let mut panel = SettingsPanel::new();
        panel.select(-1);
        assert_eq!(panel.selected_label(), "Spot light quadratic");
        panel.select(1);
        assert_eq!(panel.selected, 0);
    }

    #[test]
    fn exposure_steps_and_clamps() {
        let panel = SettingsPanel::new();
        let mut state = ProgramState::default();
        panel.adjust(&mut state, 1);
        assert!((state.post.exposure - 1.1).abs() < 1e-6);
        for _ in 0..200 {
            panel.adjust(&mut state, 1);
        }
        assert_eq!(state.post.exposure, 10.0);
        for _ in 0..200 {
            panel.adjust(&mut state, -1);
        }
        assert_eq!(state.post.exposure, 0.1);
    }

    #[test]
    fn bloom_toggles() {
        let mut panel = SettingsPanel::new();
        select_label(&mut panel, "Bloom");
        let mut state = ProgramState::default();
        panel.adjust(&mut state, -1);
        assert!(!state.post.bloom);
        panel.adjust(&mut state, 1);
        assert!(state.post.bloom);
        panel.adjust(&mut state, 0);
        assert!(state.post.bloom);
    }

    #[test]
    fn game_level_stays_in_range() {
        let mut panel = SettingsPanel::new();
        select_label(&mut panel, "Game level");
        let mut state = ProgramState::default();
        panel.adjust(&mut state, -1);
        assert_eq!(state.session.speed, 1.5);
        for _ in 0..100 {
            panel.adjust(&mut state, 1);
        }
        assert_eq!(state.session.speed, 7.0);
    }

    #[test]
    fn colours_do_not_go_negative() {
        let mut panel = SettingsPanel::new();
        select_label(&mut panel, "Spot light ambient y");
        let mut state = ProgramState::default();
        panel.adjust(&mut state, -1);
        assert!((state.lights.spot.ambient.y - 0.06).abs() < 1e-6);
        for _ in 0..10 {
            panel.adjust(&mut state, -1);
        }
        assert_eq!(state.lights.spot.ambient.y, 0.0);
        assert_eq!(state.lights.spot.ambient.x, 0.08);
    }

    #[test]
    fn directions_may_go_negative() {
        let mut panel = SettingsPanel::new();
        select_label(&mut panel, "Dir light direction x");
        let mut state = ProgramState::default();
        panel.adjust(&mut state, -1);
        assert!((state.lights.dir.direction.x + 0.1).abs() < 1e-6);
    }

    #[test]
    fn attenuation_terms_cap_at_one() {
        let mut panel = SettingsPanel::new();
        select_label(&mut panel, "Spot light linear");
        let mut state = ProgramState::default();
        for _ in 0..100 {
            panel.adjust(&mut state, 1);
        }
        assert_eq!(state.lights.spot.linear, 1.0);

        select_label(&mut panel, "Spot light constant");
        for _ in 0..100 {
            panel.adjust(&mut state, 1);
        }
        assert!(state.lights.spot.constant > 1.0);
    }

    #[test]
    fn title_shows_scores_and_selection() {
        let panel = SettingsPanel::new();
        let mut state = ProgramState::default();
        state.session.score = 3;
        state.session.high_score = 8;
        let title = panel.title(&state);
        assert!(title.contains("Score: 3"));
        assert!(title.contains("High score: 8"));
        assert!(!title.contains("Exposure"));

        state.ui_enabled = true;
        assert!(panel.title(&state).contains("[1/33] Exposure: 1.00"));
    }

    #[test]
    fn every_field_reads_back_what_it_edits() {
        let mut panel = SettingsPanel::new();
        let mut state = ProgramState::default();
        for _ in 0..panel.fields.len() {
            let field = panel.fields[panel.selected].clone();
            panel.adjust(&mut state, 1);
            let written = match field.slot.get_mut(&mut state) {
                Value::Toggle(b) => Reading::Toggle(*b),
                Value::Scalar(v) => Reading::Scalar(*v),
            };
            assert_eq!(field.slot.get(&state), written, "{}", field.label);
            panel.select(1);
        }
    }

    #[test]
    fn describe_formats_component_and_toggle_fields() {
        let mut panel = SettingsPanel::new();
        let mut state = ProgramState::default();
        state.lights.spot.position.z = -2.5;
        select_label(&mut panel, "Spot light position z");
        assert_eq!(panel.describe(&state), "Spot light position z: -2.50");

        state.post.bloom = false;
        select_label(&mut panel, "Bloom");
        assert_eq!(panel.describe(&state), "Bloom: off");
    }
}
