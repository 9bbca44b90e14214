use crate::{
    animation::action::{Action, Cue},
    animation::ease::Ease,
    animation::ops::{
        delay, delayed, eased, emit, fade_in, jump_to, move_by, move_to, rotate_by, scale_to,
        sequence, set_z_order, spawn, tint_to,
    },
    director::{Director, dispatch::Completion},
    foundation::core::{Point, Rgb8, Vec2},
    text::display::TextDisplay,
};

/// Tint steps of [`Director::animate_rainbow`], in order.
pub const RAINBOW: [Rgb8; 8] = [
    Rgb8::new(255, 0, 0),
    Rgb8::new(255, 153, 51),
    Rgb8::new(255, 255, 0),
    Rgb8::new(0, 255, 0),
    Rgb8::new(0, 0, 255),
    Rgb8::new(102, 0, 204),
    Rgb8::new(255, 51, 255),
    Rgb8::new(255, 255, 255),
];

const FLY_IN_SECS: f64 = 1.0;
const RAINBOW_STEP_SECS: f64 = 0.2;
const SWELL_STEP_SECS: f64 = 0.2;
const JUMP_SECS: f64 = 0.5;
const REVEAL_Z_BOOST: i32 = 10;

fn swell_pulse() -> Action {
    sequence(vec![
        scale_to(SWELL_STEP_SECS, 1.5),
        scale_to(SWELL_STEP_SECS, 1.0),
    ])
}

impl<D: TextDisplay> Director<'_, D> {
    /// Start one screen to the left and fly in, first character first.
    pub fn animate_in_fly_in_from_left(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_fly_in_from_left") {
            return;
        }
        let w = self.screen_extent().width;
        self.fly_in(Vec2::new(-w, 0.0), duration, false);
    }

    /// Start one screen to the right and fly in, last character first.
    pub fn animate_in_fly_in_from_right(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_fly_in_from_right") {
            return;
        }
        let w = self.screen_extent().width;
        self.fly_in(Vec2::new(w, 0.0), duration, true);
    }

    pub fn animate_in_fly_in_from_top(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_fly_in_from_top") {
            return;
        }
        let h = self.screen_extent().height;
        self.fly_in(Vec2::new(0.0, h), duration, false);
    }

    pub fn animate_in_fly_in_from_bottom(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_fly_in_from_bottom") {
            return;
        }
        let h = self.screen_extent().height;
        self.fly_in(Vec2::new(0.0, -h), duration, false);
    }

    fn fly_in(&mut self, from: Vec2, duration: f64, reverse: bool) {
        self.offset_all_chars_position_by(from);
        let action = eased(Ease::OutExpo, move_by(FLY_IN_SECS, -from));
        if reverse {
            self.run_action_on_all_sequentially_reverse(action, duration, Completion::none());
        } else {
            self.run_action_on_all_sequentially(action, duration, Completion::none());
        }
    }

    /// Pop characters in one after another. `on_each` is emitted as each one
    /// appears, `on_complete` after the last.
    pub fn animate_in_typewriter(
        &mut self,
        duration: f64,
        on_each: Option<Cue>,
        on_complete: Option<Cue>,
    ) {
        if !self.require_two_elements("animate_in_typewriter") {
            return;
        }
        self.set_all_chars_scale(0.0);
        let appear = match on_each {
            Some(cue) => sequence(vec![scale_to(0.0, 1.0), emit(cue)]),
            None => scale_to(0.0, 1.0),
        };
        let completion = Completion {
            cue: on_complete,
            remove_label: false,
        };
        self.run_action_on_all_sequentially(appear, duration, completion);
    }

    /// Drop from one screen above with a bounce.
    pub fn animate_in_drop_from_top(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_drop_from_top") {
            return;
        }
        let h = self.screen_extent().height;
        self.offset_all_chars_position_by(Vec2::new(0.0, h));
        let action = eased(Ease::OutBounce, move_by(FLY_IN_SECS, Vec2::new(0.0, -h)));
        self.run_action_on_all_sequentially(action, duration, Completion::none());
    }

    /// Grow characters from nothing with a swell pulse.
    pub fn animate_in_swell(&mut self, duration: f64) {
        if !self.require_two_elements("animate_in_swell") {
            return;
        }
        self.set_all_chars_scale(0.0);
        self.run_action_on_all_sequentially(swell_pulse(), duration, Completion::none());
    }

    /// Pulse every character to 1.5x and back, one after another.
    pub fn animate_swell(&mut self, duration: f64) {
        self.run_action_on_all_sequentially(swell_pulse(), duration, Completion::none());
    }

    /// Slide characters out from behind the first one while fading them in.
    pub fn animate_in_reveal_from_left(&mut self, duration: f64) {
        let Some(first) = self.element_indices().first().copied() else {
            tracing::debug!("reveal skipped, label has no characters");
            return;
        };
        self.set_all_chars_opacity(0.0);

        let Some(anchor) = self.display.element_mut(first) else {
            return;
        };
        anchor.set_opacity(255);
        let z = anchor.z_order();
        anchor.set_z_order(z + REVEAL_Z_BOOST);
        anchor.run_action(sequence(vec![delay(duration), set_z_order(z)]));
        let start_x = anchor.position().x;

        self.for_each_element(|e| {
            let target = e.position();
            e.set_position(Point::new(start_x, target.y));
            e.run_action(spawn(vec![
                eased(Ease::OutExpo, move_to(duration, target)),
                eased(Ease::OutExpo, fade_in(duration)),
            ]));
        });
    }

    /// Hop every character once in place, left to right over `duration`.
    pub fn animate_jump(&mut self, duration: f64, height: f64) {
        let n = self.display.char_count();
        let step = if n >= 2 {
            duration / (n - 1) as f64
        } else {
            0.0
        };
        for i in 0..n {
            if let Some(e) = self.display.element_mut(i) {
                let home = e.position();
                e.run_action(delayed(step * i as f64, jump_to(JUMP_SECS, home, height, 1)));
            }
        }
    }

    /// Pull characters away from the label's horizontal center by `amount`,
    /// then snap back with an elastic release.
    pub fn animate_stretch_elastic(
        &mut self,
        stretch_duration: f64,
        release_duration: f64,
        amount: f64,
    ) {
        let cx = self.display.content_size().width / 2.0;
        self.for_each_element(|e| {
            let home = e.position();
            let stretched = Point::new(cx + (home.x - cx) * amount, home.y);
            e.run_action(sequence(vec![
                move_to(stretch_duration, stretched),
                eased(Ease::OutElastic, move_to(release_duration, home)),
            ]));
        });
    }

    /// Spin the label while each character counter-rotates, so letters stay
    /// upright as they spread out from the center and fade in.
    pub fn animate_in_spin(&mut self, duration: f64, spins: i32) {
        self.set_all_chars_opacity(0.0);
        let cx = self.display.content_size().width / 2.0;
        let turn = 360.0 * f64::from(spins);

        self.for_each_element(|e| {
            let home = e.position();
            e.set_position(Point::new(cx, home.y));
            e.run_action(spawn(vec![
                eased(Ease::OutExpo, move_to(duration, home)),
                eased(Ease::OutSine, rotate_by(duration, -turn)),
                fade_in(duration),
            ]));
        });
        self.display
            .run_node_action(eased(Ease::OutSine, rotate_by(duration, turn)));
    }

    /// Cycle each character through [`RAINBOW`], one after another.
    pub fn animate_rainbow(&mut self, duration: f64) {
        let tints = RAINBOW
            .iter()
            .map(|c| tint_to(RAINBOW_STEP_SECS, *c))
            .collect();
        self.run_action_on_all_sequentially(sequence(tints), duration, Completion::none());
    }

    /// Fly in from the left, drift through the center with a swell, fly out
    /// to the right, then remove the label.
    pub fn fly_past_and_remove(&mut self) {
        const CENTER_SECS: f64 = 0.9;
        const LEG_SECS: f64 = 0.5;
        const STAGGER_SECS: f64 = 0.7;

        if !self.require_two_elements("fly_past_and_remove") {
            return;
        }
        let rescale = self.rescale_factor();
        let screen = self.ctx.visible_size.width * rescale;
        let center_portion = self.ctx.visible_size.width * 0.05 * rescale;

        self.offset_all_chars_position_by(Vec2::new(-screen, 0.0));

        let leg = || {
            eased(
                Ease::InOutExpo,
                move_by(LEG_SECS, Vec2::new(screen - center_portion / 2.0, 0.0)),
            )
        };
        let drift = spawn(vec![
            move_by(CENTER_SECS, Vec2::new(center_portion, 0.0)),
            sequence(vec![
                scale_to(CENTER_SECS / 2.0, 1.5),
                scale_to(CENTER_SECS / 2.0, 1.0),
            ]),
        ]);
        let fly_past = sequence(vec![leg(), drift, leg()]);
        self.run_action_on_all_sequentially_reverse(fly_past, STAGGER_SECS, Completion::remove());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/library.rs"]
mod tests;
