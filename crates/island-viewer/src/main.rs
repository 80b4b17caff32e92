//! Escape the Secret Island - Bevy front end
//!
//! Owns the window, keyboard and mouse, drawing and sound. All game rules
//! live in `island-core`; this crate only feeds it input and shows the result.
//!
//! Usage: `island-viewer [--seed N] [--config settings.json] [--mute]`
//!
//! Optional files under `assets/` (`sfx/*.wav`, `music/*.ogg`, `tree.png`)
//! replace the generated sounds and drawn trees.

mod assets;
mod audio;
mod input;
mod rendering;
mod state;
mod ui;

use bevy::prelude::*;
use island_core::engine::{Command, GameEngine, Phase};
use island_logic::constants::arena;

use crate::assets::load_sprites;
use crate::audio::{drive_music, handle_game_events, setup_audio};
use crate::input::{advance_game, keyboard_commands, mouse_fire};
use crate::rendering::{
    background_color, render_actors, render_hud_bars, render_items, render_menu,
    render_zone_details, spawn_overlays, sync_scenery, update_overlays, SceneryCache,
};
use crate::state::{GameWrapper, ViewerConfig};
use crate::ui::{render_banners, render_hud, render_menu_text, setup_ui, sync_item_markers};

fn main() {
    let config = match ViewerConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("island-viewer: {}", e);
            std::process::exit(2);
        }
    };

    let mut engine = GameEngine::new(config.seed);
    while engine.phase()
        != (Phase::Menu {
            selected: config.start_difficulty,
        })
    {
        engine.handle(Command::MenuDown);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Escape the Secret Island".to_string(),
                resolution: (arena::WIDTH, arena::HEIGHT).into(),
                resizable: false,
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(background_color(None)))
        .insert_resource(GameWrapper { engine })
        .insert_resource(SceneryCache::default())
        .insert_resource(config)
        .add_systems(Startup, (setup, setup_ui, setup_audio, load_sprites))
        .add_systems(
            Update,
            (keyboard_commands, mouse_fire, advance_game, handle_game_events, drive_music).chain(),
        )
        .add_systems(
            Update,
            (
                sync_scenery,
                render_zone_details,
                render_items,
                render_actors,
                render_menu,
                render_hud_bars,
                update_overlays,
                render_hud,
                render_banners,
                render_menu_text,
                sync_item_markers,
            )
                .after(drive_music),
        )
        .run();
}

fn setup(mut commands: Commands, config: Res<ViewerConfig>) {
    commands.spawn(Camera2d);
    spawn_overlays(&mut commands);
    info!(
        "Escape the Secret Island ready (seed {}, {})",
        config.seed,
        if config.muted { "muted" } else { "sound on" }
    );
}
