use crate::{
    animation::action::Action,
    animation::ease::Ease,
    animation::ops::{delay, eased, fade_to, move_by, remove_node, sequence, spawn},
    director::Director,
    foundation::core::{Vec2, opacity_u8},
    foundation::diagnostic::Diagnostic,
    text::display::TextDisplay,
};

const GHOSTS: usize = 3;
const GHOST_MAX_OPACITY: f64 = 100.0;
/// Largest accepted spin count; each turn is four action trees per character.
pub(crate) const MAX_SPINS: i32 = 64;

/// One quarter of a circle: a straight diagonal move plus a bulge that goes
/// out with a sine-out half and comes back with a sine-in half.
fn quadrant(duration: f64, straight: Vec2, bulge: Vec2) -> Action {
    spawn(vec![
        move_by(duration, straight),
        sequence(vec![
            eased(Ease::OutSine, move_by(duration / 2.0, bulge)),
            eased(Ease::InSine, move_by(duration / 2.0, -bulge)),
        ]),
    ])
}

/// Spin count for the character at `index`: even indices one fewer, odd
/// multiples of three one more.
pub(crate) fn char_spins(index: usize, spins: i32) -> i32 {
    if index % 2 == 0 {
        spins.saturating_sub(1)
    } else if index % 3 == 0 {
        spins.saturating_add(1)
    } else {
        spins
    }
}

/// Circular path of `spins` full turns around a point `radius` away on the
/// horizontal axis. `right_of_center` picks the quadrant order so every
/// character turns the same way.
pub(crate) fn orbit(radius: f64, spins: i32, duration: f64, right_of_center: bool) -> Action {
    let square = (radius * radius / 2.0).sqrt();
    let arc = radius - square;
    let segment = duration / f64::from(spins) * 0.25;

    let nw = quadrant(segment, Vec2::new(radius, radius), Vec2::new(-arc, arc));
    let ne = quadrant(segment, Vec2::new(radius, -radius), Vec2::new(arc, arc));
    let sw = quadrant(segment, Vec2::new(-radius, radius), Vec2::new(-arc, -arc));
    let se = quadrant(segment, Vec2::new(-radius, -radius), Vec2::new(arc, -arc));
    let turn = if right_of_center {
        sequence(vec![se, sw, nw, ne])
    } else {
        sequence(vec![nw, ne, se, sw])
    };

    let turns = (0..spins).map(|_| turn.clone()).collect();
    eased(Ease::OutSine, sequence(turns))
}

impl<D: TextDisplay> Director<'_, D> {
    /// Swirl every character around the label's horizontal center.
    ///
    /// Each character gets its own spin count and a random stagger of up to
    /// 0.9 s. With `create_ghosts`, three fainter copies of the label run the
    /// same vortex and remove themselves when done; ghosts never spawn ghosts.
    /// `remove_on_completion` removes the label after `duration * 3`.
    ///
    /// The label starts transparent and fades back to the opacity it had when
    /// called, not to full opacity. Spin counts above 64 are rejected with a
    /// diagnostic and leave the label untouched.
    pub fn animate_in_vortex(
        &mut self,
        duration: f64,
        spins: i32,
        remove_on_completion: bool,
        create_ghosts: bool,
    ) {
        if spins > MAX_SPINS {
            self.ctx.diagnostics.record(Diagnostic::Skipped {
                op: "animate_in_vortex",
                reason: format!("{spins} spins exceeds the limit of {MAX_SPINS}"),
            });
            return;
        }
        let target = self.display.node().opacity;
        self.display.node_mut().opacity = 0;
        self.display
            .run_node_action(fade_to(duration * 0.25, target));

        if create_ghosts {
            self.spawn_vortex_ghosts(duration, spins);
        }

        let cx = self.display.content_size().width / 2.0;
        for i in 0..self.display.char_count() {
            if self.display.element(i).is_none() {
                continue;
            }
            let stagger = self.ctx.rng.next_below(10) as f64 / 10.0;
            let spins_i = char_spins(i, spins);
            if spins_i <= 0 {
                continue;
            }
            let Some(e) = self.display.element_mut(i) else {
                continue;
            };
            let x = e.position().x;
            e.run_action(orbit((cx - x).abs(), spins_i, duration + stagger, cx < x));
        }

        if remove_on_completion {
            self.display
                .run_node_action(sequence(vec![delay(duration * 3.0), remove_node()]));
        }
    }

    fn spawn_vortex_ghosts(&mut self, duration: f64, spins: i32) {
        let node = *self.display.node();
        for k in 0..GHOSTS {
            let mut ghost = match self.display.duplicate() {
                Ok(ghost) => ghost,
                Err(e) => {
                    self.ctx.diagnostics.record(Diagnostic::Skipped {
                        op: "animate_in_vortex",
                        reason: format!("ghost label: {e}"),
                    });
                    continue;
                }
            };
            let props = ghost.node_mut();
            props.position = node.position;
            props.scale = node.scale;
            props.opacity = opacity_u8(GHOST_MAX_OPACITY / (k + 1) as f64);

            Director::new(&mut ghost, &mut *self.ctx).animate_in_vortex(
                duration, spins, true, false,
            );
            self.ctx.spawned.push(ghost);
        }
        tracing::debug!(ghosts = GHOSTS, "vortex ghosts spawned");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/vortex.rs"]
mod tests;
