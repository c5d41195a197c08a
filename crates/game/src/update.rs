//! Per-frame game update: clock, keyboard actions, lane stream.

use crate::GameState;

/// Run one frame of game logic. Called from `GameState::update()`.
pub fn frame(state: &mut GameState) {
    state.time.update();
    let dt = state.time.delta_seconds();

    handle_keys(state);
    if !state.running {
        return;
    }

    let outcome = state.stream.advance(dt, &mut state.program.session);
    if outcome.spawned {
        log::trace!(
            "Spawned pair, {} entities active",
            state.stream.entities().len()
        );
    }
    if outcome.picked_up > 0 || outcome.collided {
        log::trace!("Score {}", state.program.session.score);
    }

    state.refresh_title();
    state.input.begin_frame();
}

fn handle_keys(state: &mut GameState) {
    let input = &state.input;

    if input.is_quit_pressed() {
        state.quit();
        return;
    }

    let lane_step = input.lane_step();
    let reset = input.is_reset_pressed();
    let toggle_bloom = input.is_bloom_toggle_pressed();
    let toggle_overlay = input.is_overlay_toggle_pressed();
    let select = input.selection_step();
    let adjust = input.adjust_step();

    let program = &mut state.program;
    program.session.step(lane_step);

    if reset {
        state.stream.reset(&mut program.session);
        log::info!("Run reset");
    }

    if toggle_bloom {
        program.post.bloom = !program.post.bloom;
        log::debug!("Bloom {}", if program.post.bloom { "on" } else { "off" });
    }

    if toggle_overlay {
        program.ui_enabled = !program.ui_enabled;
        let overlay = program.ui_enabled;
        state.set_cursor_captured(!overlay);
    }

    if state.program.ui_enabled {
        state.panel.select(select);
        state.panel.adjust(&mut state.program, adjust);
    }
}
