use core::str::FromStr;

use bevy::prelude::*;
use bits_helpers::floating_score::animate_floating_scores;
use bits_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

pub mod config;
pub mod countdown;
pub mod engine;
pub mod gameplay;
pub mod spawn;
pub mod ui;

use config::{BACKGROUND_COLOR, GameConfig, Variant};
use engine::GameState;
use gameplay::{
    DragState, SpawnRandom, handle_drag_input, setup, sync_scene, tick_countdown,
    track_window_size,
};

/// Wires a prepared session into an app: input, countdown clock, scene and HUD.
pub struct DragTargetPlugin {
    pub game: GameState,
    pub rng: SpawnRandom,
}

impl Plugin for DragTargetPlugin {
    fn build(&self, app: &mut App) {
        let config = self.game.config();

        app.add_plugins(ui::UIPlugin {
            instructions: config.instructions(),
            countdown_secs: config.countdown_secs,
        })
        .insert_resource(self.game.clone())
        .insert_resource(self.rng.clone())
        .init_resource::<DragState>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                track_window_size,
                handle_drag_input,
                tick_countdown,
                sync_scene,
            )
                .chain(),
        )
        .add_systems(Update, animate_floating_scores);
    }
}

/// Resolves a variant name, falling back to the default one.
pub fn parse_variant(name: Option<&str>) -> Variant {
    match name.map(Variant::from_str) {
        None => Variant::default(),
        Some(Ok(variant)) => variant,
        Some(Err(err)) => {
            warn!(
                "Unknown variant {:?} ({err}), using {}",
                name.unwrap_or_default(),
                Variant::default()
            );
            Variant::default()
        }
    }
}

/// Entry point for the game
pub fn run(variant_name: Option<&str>) {
    let mut app = bits_helpers::get_default_app(env!("CARGO_PKG_NAME"), BACKGROUND_COLOR);

    let variant = parse_variant(variant_name);
    let config = GameConfig::for_variant(variant).unwrap_or_else(|err| {
        error!("Invalid {variant} config: {err}");
        GameConfig::default()
    });
    let mut rng = SpawnRandom::default();
    let game = match GameState::new(config, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT), &mut rng.0) {
        Ok(game) => game,
        Err(err) => {
            error!("Cannot start {variant}: {err}");
            return;
        }
    };
    info!("Starting {variant}");

    app.add_plugins(DragTargetPlugin { game, rng });
    app.run();
}
