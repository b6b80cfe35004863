//! Score, countdown and drag rules, independent of rendering and input.
//!
//! Everything here is in screen space: origin at the top-left corner, y
//! pointing down, object positions being the top-left corner of their box.

use core::time::Duration;

use bevy::prelude::*;

use crate::config::{ConfigError, GameConfig, Swatch, validate_screen};
use crate::countdown::{Countdown, CountdownPhase, CountdownTick};
use crate::spawn::{Spawn, SpawnRng, random_spawn};

/// Axis-aligned box overlap. Touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Square box of side `size` with its top-left corner at `corner`.
pub fn square_at(corner: Vec2, size: f32) -> Rect {
    Rect {
        min: corner,
        max: corner + Vec2::splat(size),
    }
}

/// Position of a dragged object: where the drag started plus how far the
/// pointer moved since.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragPosition {
    base: Vec2,
    delta: Vec2,
}

impl DragPosition {
    pub const fn new(at: Vec2) -> Self {
        Self {
            base: at,
            delta: Vec2::ZERO,
        }
    }

    pub fn absolute(&self) -> Vec2 {
        self.base + self.delta
    }

    /// Snapshots the current position as the new base.
    pub fn begin(&mut self) {
        self.flatten();
    }

    /// `delta` is cumulative since [`Self::begin`], not per event.
    pub const fn set_delta(&mut self, delta: Vec2) {
        self.delta = delta;
    }

    /// Folds the delta into the base and returns the absolute position.
    pub fn flatten(&mut self) -> Vec2 {
        self.base += self.delta;
        self.delta = Vec2::ZERO;
        self.base
    }

    pub const fn place(&mut self, at: Vec2) {
        self.base = at;
        self.delta = Vec2::ZERO;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored {
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub spawn: Spawn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropOutcome {
    Scored(Scored),
    Missed { position: Vec2 },
}

#[derive(Resource, Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    screen: Vec2,
    score: u32,
    high_score: u32,
    countdown: Countdown,
    object: DragPosition,
    swatch: Swatch,
}

impl GameState {
    /// New session with the object already placed on a random edge.
    pub fn new(
        config: GameConfig,
        screen: Vec2,
        rng: &mut impl SpawnRng,
    ) -> Result<Self, ConfigError> {
        let screen = validate_screen(screen)?;
        let spawn = random_spawn(rng, screen, config.size.size_for(0), config.palette);
        Ok(Self {
            countdown: Countdown::new(config.countdown_secs),
            config,
            screen,
            score: 0,
            high_score: 0,
            object: DragPosition::new(spawn.position),
            swatch: spawn.swatch,
        })
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn screen(&self) -> Vec2 {
        self.screen
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    pub const fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    pub const fn countdown_phase(&self) -> CountdownPhase {
        self.countdown.phase()
    }

    pub const fn swatch(&self) -> Swatch {
        self.swatch
    }

    pub fn object_position(&self) -> Vec2 {
        self.object.absolute()
    }

    /// Derived from the current score on every call.
    pub fn object_size(&self) -> f32 {
        self.config.size.size_for(self.score)
    }

    pub fn object_bounds(&self) -> Rect {
        square_at(self.object_position(), self.object_size())
    }

    /// Centered on the screen.
    pub fn target_bounds(&self) -> Rect {
        let size = self.config.target_size;
        square_at((self.screen - Vec2::splat(size)) / 2.0, size)
    }

    pub fn object_color(&self) -> Color {
        self.swatch.shade(self.object_size(), self.config.size.floor)
    }

    /// The play area changed size. The object is pulled back inside it.
    /// A screen without area is rejected and the previous one kept.
    pub fn set_screen(&mut self, screen: Vec2) -> Result<(), ConfigError> {
        self.screen = validate_screen(screen)?;
        let free = (self.screen - Vec2::splat(self.object_size())).max(Vec2::ZERO);
        let position = self.object.flatten().clamp(Vec2::ZERO, free);
        self.object.place(position);
        Ok(())
    }

    /// Returns `true` when this drag started the countdown.
    pub fn on_drag_start(&mut self) -> bool {
        self.object.begin();
        let started = self.countdown.start();
        if started {
            info!("Countdown started: {} seconds", self.countdown.duration());
        }
        started
    }

    pub const fn on_drag_move(&mut self, delta: Vec2) {
        self.object.set_delta(delta);
    }

    pub fn on_drag_end(&mut self, rng: &mut impl SpawnRng) -> DropOutcome {
        let position = self.object.flatten();
        if !overlaps(self.object_bounds(), self.target_bounds()) {
            debug!("Missed the target at {position}");
            return DropOutcome::Missed { position };
        }

        self.score += 1;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            info!("New high score: {}", self.high_score);
        }

        let spawn = random_spawn(rng, self.screen, self.object_size(), self.config.palette);
        self.object.place(spawn.position);
        self.swatch = spawn.swatch;
        debug!(
            "Scored {}, respawning {} on the {} edge at {}",
            self.score, spawn.swatch.name, spawn.edge, spawn.position
        );

        DropOutcome::Scored(Scored {
            score: self.score,
            high_score: self.high_score,
            new_high_score,
            spawn,
        })
    }

    /// Frame time for the countdown clock.
    pub fn advance(&mut self, delta: Duration) -> Option<CountdownTick> {
        let tick = self.countdown.advance(delta);
        if tick == Some(CountdownTick::Expired) {
            info!("Time is up, score {} reset", self.score);
            self.score = 0;
        }
        tick
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use super::*;
    use crate::config::SQUARE_PALETTE;
    use crate::spawn::Edge;

    /// Replays fixed draws, wrapping around when exhausted.
    struct Script {
        indices: Vec<usize>,
        units: Vec<f32>,
        next_index: usize,
        next_unit: usize,
    }

    impl Script {
        fn new(indices: &[usize], units: &[f32]) -> Self {
            Self {
                indices: indices.to_vec(),
                units: units.to_vec(),
                next_index: 0,
                next_unit: 0,
            }
        }
    }

    impl SpawnRng for Script {
        fn index(&mut self, len: usize) -> usize {
            let value = self
                .indices
                .get(self.next_index % self.indices.len())
                .copied()
                .unwrap_or_default();
            self.next_index += 1;
            value % len
        }

        fn unit(&mut self) -> f32 {
            let value = self
                .units
                .get(self.next_unit % self.units.len())
                .copied()
                .unwrap_or_default();
            self.next_unit += 1;
            value
        }
    }

    const SCREEN: Vec2 = Vec2::new(360.0, 640.0);

    fn game() -> GameState {
        // Starts on the top edge, left corner, red.
        GameState::new(GameConfig::default(), SCREEN, &mut Script::new(&[0], &[0.0]))
            .expect("valid screen")
    }

    fn drag(game: &mut GameState, to: Vec2, rng: &mut impl SpawnRng) -> DropOutcome {
        game.on_drag_start();
        game.on_drag_move(to - game.object_position());
        game.on_drag_end(rng)
    }

    #[test]
    fn overlap_is_symmetric_and_strict() {
        let target = square_at(Vec2::new(130.0, 270.0), 100.0);
        let cases = [
            (square_at(Vec2::new(130.0, 270.0), 60.0), true),
            (square_at(Vec2::new(70.0, 270.0), 60.0), false),
            (square_at(Vec2::new(71.0, 271.0), 60.0), true),
            (square_at(Vec2::new(230.0, 300.0), 60.0), false),
            (square_at(Vec2::new(150.0, 0.0), 60.0), false),
            (square_at(Vec2::new(100.0, 250.0), 200.0), true),
        ];
        for (object, expected) in cases {
            assert_eq!(overlaps(object, target), expected, "{object:?}");
            assert_eq!(overlaps(target, object), expected, "{object:?}");
        }
    }

    #[test]
    fn drag_position_collapses_on_release() {
        let mut position = DragPosition::new(Vec2::new(10.0, 20.0));
        position.begin();
        position.set_delta(Vec2::new(5.0, 5.0));
        position.set_delta(Vec2::new(30.0, -10.0));
        assert_eq!(position.absolute(), Vec2::new(40.0, 10.0));
        assert_eq!(position.base, Vec2::new(10.0, 20.0));

        assert_eq!(position.flatten(), Vec2::new(40.0, 10.0));
        assert_eq!(position.delta, Vec2::ZERO);
    }

    #[test]
    fn target_is_centered() {
        let game = game();
        assert_eq!(
            game.target_bounds(),
            Rect {
                min: Vec2::new(130.0, 270.0),
                max: Vec2::new(230.0, 370.0)
            }
        );
        assert_eq!(game.object_position(), Vec2::ZERO);
        assert_eq!(game.swatch().name, "red");
    }

    #[test]
    fn drop_on_target_scores_and_respawns() {
        let mut game = game();
        // Right edge, halfway down, blue.
        let mut rng = Script::new(&[1, 1], &[0.5]);

        let outcome = drag(&mut game, Vec2::new(130.0, 270.0), &mut rng);

        let size = 55.0;
        let expected = Spawn {
            edge: Edge::Right,
            position: Vec2::new(360.0 - size, (640.0 - size) / 2.0),
            swatch: SQUARE_PALETTE[1],
        };
        assert_eq!(
            outcome,
            DropOutcome::Scored(Scored {
                score: 1,
                high_score: 1,
                new_high_score: true,
                spawn: expected,
            })
        );
        assert_eq!(game.score(), 1);
        assert_eq!(game.high_score(), 1);
        assert_eq!(game.object_size(), size);
        assert_eq!(game.object_position(), expected.position);
        assert_eq!(game.swatch(), SQUARE_PALETTE[1]);
    }

    #[test]
    fn miss_only_moves_the_object() {
        let mut game = game();
        let mut rng = Script::new(&[0], &[0.0]);
        drag(&mut game, Vec2::new(130.0, 270.0), &mut rng);

        let size = game.object_size();
        let swatch = game.swatch();
        let outcome = drag(&mut game, Vec2::new(10.0, 300.0), &mut rng);

        assert_eq!(
            outcome,
            DropOutcome::Missed {
                position: Vec2::new(10.0, 300.0)
            }
        );
        assert_eq!(game.score(), 1);
        assert_eq!(game.high_score(), 1);
        assert_eq!(game.object_size(), size);
        assert_eq!(game.swatch(), swatch);
        assert_eq!(game.object_position(), Vec2::new(10.0, 300.0));
    }

    #[test]
    fn high_score_only_moves_on_strictly_greater() {
        let mut game = game();
        let mut rng = Script::new(&[0], &[0.0]);
        for _ in 0..3 {
            drag(&mut game, Vec2::new(150.0, 290.0), &mut rng);
        }
        game.countdown.stop();
        game.score = 0;

        let mut flags = Vec::new();
        for _ in 0..4 {
            if let DropOutcome::Scored(scored) = drag(&mut game, Vec2::new(150.0, 290.0), &mut rng)
            {
                assert!(scored.high_score >= scored.score);
                flags.push(scored.new_high_score);
            }
        }
        // Nothing beats the old record of 3 until the fourth drop.
        assert_eq!(flags, [false, false, false, true]);
        assert_eq!(game.high_score(), 4);
    }

    #[test]
    fn first_drag_starts_the_countdown() {
        let mut game = game();
        assert_eq!(game.countdown_phase(), CountdownPhase::Idle);
        assert_eq!(game.advance(Duration::from_secs(1)), None);

        assert!(game.on_drag_start());
        assert!(!game.on_drag_start());
        assert_eq!(game.countdown_phase(), CountdownPhase::Running);
    }

    #[test]
    fn expiry_resets_score_but_not_high_score() {
        let mut game = game();
        let mut rng = Script::new(&[0], &[0.0]);
        for _ in 0..5 {
            drag(&mut game, Vec2::new(150.0, 290.0), &mut rng);
        }
        assert_eq!(game.score(), 5);

        for _ in 0..9 {
            assert!(matches!(
                game.advance(Duration::from_secs(1)),
                Some(CountdownTick::Running { .. })
            ));
        }
        assert_eq!(game.remaining_secs(), 1);
        assert_eq!(game.advance(Duration::from_secs(1)), Some(CountdownTick::Expired));
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 5);
        assert_eq!(game.remaining_secs(), 10);
        assert_eq!(game.countdown_phase(), CountdownPhase::Idle);

        // The next drag restarts it.
        assert!(game.on_drag_start());
    }

    #[test]
    fn resize_pulls_the_object_back_on_screen() {
        let mut game = game();
        game.on_drag_start();
        game.on_drag_move(Vec2::new(340.0, 620.0));
        game.on_drag_end(&mut Script::new(&[0], &[0.0]));

        game.set_screen(Vec2::new(200.0, 300.0)).expect("valid screen");
        assert_eq!(game.object_position(), Vec2::new(140.0, 240.0));
        assert_eq!(game.target_bounds().min, Vec2::new(50.0, 100.0));

        // A minimized window reports no area; keep playing on the last one.
        assert!(game.set_screen(Vec2::ZERO).is_err());
        assert_eq!(game.screen(), Vec2::new(200.0, 300.0));
        assert_eq!(game.object_position(), Vec2::new(140.0, 240.0));
    }

    #[test]
    fn sessions_need_a_screen_with_area() {
        let err = GameState::new(
            GameConfig::default(),
            Vec2::new(360.0, 0.0),
            &mut Script::new(&[0], &[0.0]),
        )
        .expect_err("no area");
        assert_eq!(
            err,
            ConfigError::NonPositiveScreen {
                width: 360.0,
                height: 0.0
            }
        );
    }
}
