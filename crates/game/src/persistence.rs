//! Flat text record of the tunables and the high score.
//!
//! One value per line in a fixed order. Booleans are `0`/`1`. Reading stops at the
//! first missing or unparsable token and leaves the rest of the state untouched.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use glam::Vec3;

use crate::session::ProgramState;

/// A mutable slot in the record.
enum Field<'a> {
    Bool(&'a mut bool),
    Float(&'a mut f32),
    Int(&'a mut u32),
}

impl Field<'_> {
    fn parse_into(&mut self, token: &str) -> bool {
        match self {
            Field::Bool(b) => match token {
                "0" => **b = false,
                "1" => **b = true,
                _ => return false,
            },
            Field::Float(f) => match token.parse() {
                Ok(v) => **f = v,
                Err(_) => return false,
            },
            Field::Int(i) => match token.parse() {
                Ok(v) => **i = v,
                Err(_) => return false,
            },
        }
        true
    }

    fn render(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            Field::Bool(b) => writeln!(out, "{}", u8::from(**b)),
            Field::Float(f) => writeln!(out, "{}", **f),
            Field::Int(i) => writeln!(out, "{}", **i),
        };
    }
}

fn push_vec3<'a>(fields: &mut Vec<Field<'a>>, v: &'a mut Vec3) {
    let Vec3 { x, y, z } = v;
    fields.extend([Field::Float(x), Field::Float(y), Field::Float(z)]);
}

/// Every persisted slot, in record order.
fn fields(state: &mut ProgramState) -> Vec<Field<'_>> {
    let ProgramState {
        ui_enabled,
        lights,
        post,
        session,
    } = state;
    let mut fields = vec![Field::Bool(ui_enabled)];

    let dir = &mut lights.dir;
    push_vec3(&mut fields, &mut dir.direction);
    push_vec3(&mut fields, &mut dir.diffuse);
    push_vec3(&mut fields, &mut dir.ambient);
    push_vec3(&mut fields, &mut dir.specular);

    let spot = &mut lights.spot;
    push_vec3(&mut fields, &mut spot.position);
    push_vec3(&mut fields, &mut spot.direction);
    push_vec3(&mut fields, &mut spot.diffuse);
    push_vec3(&mut fields, &mut spot.ambient);
    push_vec3(&mut fields, &mut spot.specular);

    for point in lights.points.iter_mut() {
        push_vec3(&mut fields, &mut point.position);
        push_vec3(&mut fields, &mut point.diffuse);
        push_vec3(&mut fields, &mut point.ambient);
        push_vec3(&mut fields, &mut point.specular);
    }

    fields.push(Field::Bool(&mut post.bloom));
    fields.push(Field::Float(&mut post.exposure));
    fields.push(Field::Float(&mut session.speed));
    fields.push(Field::Int(&mut session.high_score));
    fields
}

/// Number of values in a complete record.
pub fn field_count() -> usize {
    fields(&mut ProgramState::default()).len()
}

/// How much of a record was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRead {
    /// No record on disk; state left at its defaults.
    Missing,
    Complete,
    /// Stopped early; only the first `fields_read` values were applied.
    Partial { fields_read: usize },
}

/// Serialize `state` as a record.
pub fn write_record(state: &ProgramState) -> String {
    let mut copy = state.clone();
    let mut out = String::new();
    for field in fields(&mut copy) {
        field.render(&mut out);
    }
    out
}

/// Apply the values in `text` to `state` in record order.
pub fn read_record(text: &str, state: &mut ProgramState) -> RecordRead {
    let mut tokens = text.split_whitespace();
    for (i, mut field) in fields(state).into_iter().enumerate() {
        match tokens.next() {
            Some(token) if field.parse_into(token) => {}
            _ => return RecordRead::Partial { fields_read: i },
        }
    }
    RecordRead::Complete
}

/// Load the record at `path` into `state`. Missing or short records are logged, not errors.
pub fn load(path: &Path, state: &mut ProgramState) -> RecordRead {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::info!("No saved state at {:?} ({}), using defaults", path, e);
            return RecordRead::Missing;
        }
    };
    let result = read_record(&text, state);
    if let RecordRead::Partial { fields_read } = result {
        log::warn!(
            "Saved state at {:?} is incomplete: read {} of {} fields",
            path,
            fields_read,
            field_count()
        );
    }
    result
}

/// Write `state` to `path`, creating parent directories as needed.
pub fn save(path: &Path, state: &ProgramState) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, write_record(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited_state() -> ProgramState {
        let mut s = ProgramState::default();
        s.ui_enabled = true;
        s.lights.dir.direction = Vec3::new(0.1, -0.9, 0.2);
        s.lights.spot.specular = Vec3::new(0.3, 0.4, 0.5);
        s.lights.points[2].ambient = Vec3::splat(0.25);
        s.post.bloom = false;
        s.post.exposure = 2.5;
        s.session.speed = 3.2;
        s.session.high_score = 41;
        s
    }

    #[test]
    fn record_has_the_documented_shape() {
        // flag + dir 12 + spot 15 + 3 points * 12 + bloom, exposure, speed, high score
        assert_eq!(field_count(), 1 + 12 + 15 + 36 + 4);
        let text = write_record(&ProgramState::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), field_count());
        assert_eq!(lines[0], "0");
        assert_eq!(&lines[1..4], &["0", "-1", "0"]);
        // dir diffuse comes before ambient
        assert_eq!(lines[4], "0.6");
        assert_eq!(lines[7], "0.5");
        assert_eq!(lines[lines.len() - 4], "1");
        assert_eq!(lines[lines.len() - 2], "1.5");
        assert_eq!(lines[lines.len() - 1], "0");
    }

    #[test]
    fn written_record_reads_back() {
        let saved = edited_state();
        let mut loaded = ProgramState::default();
        let result = read_record(&write_record(&saved), &mut loaded);
        assert_eq!(result, RecordRead::Complete);
        assert_eq!(loaded, saved);
    }

    #[test]
    fn attenuation_is_not_persisted() {
        let mut saved = ProgramState::default();
        saved.lights.spot.linear = 0.7;
        let mut loaded = ProgramState::default();
        read_record(&write_record(&saved), &mut loaded);
        assert_eq!(loaded.lights.spot.linear, 0.09);
    }

    #[test]
    fn short_record_keeps_remaining_defaults() {
        let text = write_record(&edited_state());
        let head: Vec<&str> = text.lines().take(5).collect();
        let mut loaded = ProgramState::default();
        let result = read_record(&head.join("\n"), &mut loaded);
        assert_eq!(result, RecordRead::Partial { fields_read: 5 });
        assert!(loaded.ui_enabled);
        assert_eq!(loaded.lights.dir.direction, Vec3::new(0.1, -0.9, 0.2));
        assert_eq!(loaded.lights.dir.diffuse.x, 0.6);
        assert_eq!(loaded.lights.dir.diffuse.y, 0.6);
        assert_eq!(loaded.session.high_score, 0);
        assert!(loaded.post.bloom);
    }

    #[test]
    fn bad_token_stops_reading() {
        let mut loaded = ProgramState::default();
        let result = read_record("1\n0.5\nabc\n7\n", &mut loaded);
        assert_eq!(result, RecordRead::Partial { fields_read: 2 });
        assert!(loaded.ui_enabled);
        assert_eq!(loaded.lights.dir.direction, Vec3::new(0.5, -1.0, 0.0));
    }

    #[test]
    fn booleans_are_zero_or_one() {
        let mut loaded = ProgramState::default();
        assert_eq!(read_record("true", &mut loaded), RecordRead::Partial { fields_read: 0 });
        assert!(!loaded.ui_enabled);
    }

    #[test]
    fn empty_record_changes_nothing() {
        let mut loaded = ProgramState::default();
        assert_eq!(read_record("", &mut loaded), RecordRead::Partial { fields_read: 0 });
        assert_eq!(loaded, ProgramState::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let mut state = edited_state();
        let result = load(Path::new("no/such/dir/program_state.txt"), &mut state);
        assert_eq!(result, RecordRead::Missing);
        assert_eq!(state, edited_state());
    }

    #[test]
    fn save_then_load_through_disk() {
        let dir = std::env::temp_dir().join(format!("panda-run-record-{}", std::process::id()));
        let path = dir.join("nested").join("program_state.txt");
        let saved = edited_state();
        save(&path, &saved).unwrap();

        let mut loaded = ProgramState::default();
        assert_eq!(load(&path, &mut loaded), RecordRead::Complete);
        assert_eq!(loaded, saved);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn record_never_stores_the_live_run() {
        let mut saved = edited_state();
        saved.session.score = 5;
        saved.session.game_over = true;
        let mut loaded = ProgramState::default();
        read_record(&write_record(&saved), &mut loaded);
        assert_eq!(loaded.session.score, 0);
        assert!(!loaded.session.game_over);
    }
}
