//! Scripted player that drives a session through pointer events.
//!
//! The autoplayer sees the same surface a human host does: it reads the
//! board, sends [`PointerEvent`]s and advances the clock with `tick`.

use crate::games::jigsaw::{DragOutcome, PointerEvent, Point, PuzzleSession, SessionStatus};
use derive_getters::Getters;
use derive_new::new;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunables of the scripted player.
#[derive(Debug, Clone, Copy, PartialEq, Getters, new, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// RNG seed for piece choice and jitter.
    seed: u64,
    /// Largest per-axis miss from the target pixel.
    jitter_px: f32,
    /// Upper bound on drag attempts.
    max_steps: u32,
    /// Pointer moves per drag.
    drag_steps: u32,
    /// Clock advance after every event.
    frame: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self::new(0, 30.0, 10_000, 4, Duration::from_secs(1) / 60)
    }
}

/// What a run achieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoplaySummary {
    /// Drag attempts made.
    pub steps: u32,
    /// Drops that snapped.
    pub snaps: u32,
    /// Drops that missed.
    pub misses: u32,
    /// Moves counted by the session.
    pub move_count: u32,
    /// Seconds on the session clock.
    pub elapsed_secs: f64,
    /// Percentage placed.
    pub completion_percentage: f32,
    /// Final status.
    pub status: SessionStatus,
}

/// Seeded scripted player.
#[derive(Debug)]
pub struct Autoplayer {
    config: AutoplayConfig,
    rng: StdRng,
}

impl Autoplayer {
    /// Creates a player from its config.
    pub fn new(config: AutoplayConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Plays until the session ends or the step cap is reached.
    #[instrument(skip(self, session), fields(seed = self.config.seed))]
    pub fn play(&mut self, session: &mut PuzzleSession) -> AutoplaySummary {
        let mut summary = AutoplaySummary {
            steps: 0,
            snaps: 0,
            misses: 0,
            move_count: 0,
            elapsed_secs: 0.0,
            completion_percentage: 0.0,
            status: session.status(),
        };

        while !session.status().is_terminal() && summary.steps < self.config.max_steps {
            summary.steps += 1;
            match self.step(session) {
                Some(true) => summary.snaps += 1,
                Some(false) => summary.misses += 1,
                None => {}
            }
        }

        summary.move_count = session.move_count();
        summary.elapsed_secs = session.elapsed().as_secs_f64();
        summary.completion_percentage = session.board().completion_percentage();
        summary.status = session.status();
        info!(
            steps = summary.steps,
            snaps = summary.snaps,
            misses = summary.misses,
            status = %summary.status,
            "Autoplay finished"
        );
        summary
    }

    /// Makes one drag attempt. Returns whether the drop snapped, or `None`
    /// when nothing was dropped.
    #[instrument(level = "debug", skip(self, session))]
    pub fn step(&mut self, session: &mut PuzzleSession) -> Option<bool> {
        let board = session.board();
        let half_width = *board.layout().cell_width() as f32 / 2.0;
        let half_height = *board.layout().cell_height() as f32 / 2.0;
        let center = |position: Point| Point::new(position.x + half_width, position.y + half_height);

        let unplaced = board
            .pieces()
            .iter()
            .filter(|piece| !piece.is_placed())
            .collect::<Vec<_>>();
        // Prefer pieces whose center is not buried under a placed piece.
        let grabbable = unplaced
            .iter()
            .copied()
            .filter(|piece| {
                board
                    .piece_at_point(center(piece.position()))
                    .and_then(|top| board.piece(top))
                    .is_some_and(|top| !top.is_placed())
            })
            .collect::<Vec<_>>();
        let pool = if grabbable.is_empty() { &unplaced } else { &grabbable };
        let chosen = pool.choose(&mut self.rng)?;
        let grab = center(chosen.position());
        let chosen = chosen.id();

        let picked = match session.handle_event(PointerEvent::Down(grab)) {
            DragOutcome::Picked(id) => id,
            other => {
                debug!(piece = %chosen, ?other, "Pickup missed");
                session.tick(self.config.frame);
                return None;
            }
        };
        session.tick(self.config.frame);

        let board = session.board();
        let origin = board.piece(picked)?.position();
        let target = board.target_pixel(picked)?;
        let aim = Point::new(
            target.x + self.jitter() + (grab.x - origin.x),
            target.y + self.jitter() + (grab.y - origin.y),
        );

        let steps = self.config.drag_steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let pointer = Point::new(grab.x + (aim.x - grab.x) * t, grab.y + (aim.y - grab.y) * t);
            session.handle_event(PointerEvent::Move(pointer));
            session.tick(self.config.frame);
            if session.status().is_terminal() {
                return None;
            }
        }

        let outcome = session.handle_event(PointerEvent::Up);
        session.tick(self.config.frame);
        outcome.as_drop().map(|drop| drop.snapped)
    }

    fn jitter(&mut self) -> f32 {
        let range = self.config.jitter_px.abs();
        if range == 0.0 {
            return 0.0;
        }
        self.rng.random_range(-range..=range)
    }
}
