//! Player input handling for the island viewer.
//!
//! Held keys become a [`PlayerInput`] each frame; presses become engine
//! [`Command`]s. Also owns quick save/load and quitting.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use island_core::engine::{Command, Phase};
use island_core::systems::PlayerInput;

use crate::rendering::to_screen;
use crate::state::{GameWrapper, ViewerConfig};

fn any_pressed(keyboard: &ButtonInput<KeyCode>, keys: [KeyCode; 2]) -> bool {
    keys.iter().any(|k| keyboard.pressed(*k))
}

fn any_just_pressed(keyboard: &ButtonInput<KeyCode>, keys: [KeyCode; 2]) -> bool {
    keys.iter().any(|k| keyboard.just_pressed(*k))
}

/// Turn key presses into engine commands.
pub fn keyboard_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<ViewerConfig>,
    mut game: ResMut<GameWrapper>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
        return;
    }

    let engine = &mut game.engine;
    match engine.phase() {
        Phase::Menu { .. } => {
            if any_just_pressed(&keyboard, [KeyCode::KeyW, KeyCode::ArrowUp]) {
                engine.handle(Command::MenuUp);
            }
            if any_just_pressed(&keyboard, [KeyCode::KeyS, KeyCode::ArrowDown]) {
                engine.handle(Command::MenuDown);
            }
            if any_just_pressed(&keyboard, [KeyCode::Enter, KeyCode::Space]) {
                engine.handle(Command::Start);
            }
        }
        Phase::Playing => {
            if keyboard.just_pressed(KeyCode::KeyE) {
                engine.handle(Command::Interact);
            }
            if keyboard.just_pressed(KeyCode::Tab) {
                engine.handle(Command::ToggleHud);
            }
            if keyboard.just_pressed(KeyCode::F5) {
                match File::create(&config.save_path) {
                    Ok(file) => match engine.save(BufWriter::new(file)) {
                        Ok(()) => info!("Game saved to {}", config.save_path.display()),
                        Err(e) => warn!("Save failed: {}", e),
                    },
                    Err(e) => warn!("Could not create {}: {}", config.save_path.display(), e),
                }
            }
        }
        Phase::Victory | Phase::Defeated => {
            if keyboard.just_pressed(KeyCode::Enter) {
                engine.handle(Command::ReturnToMenu);
            }
        }
    }

    if keyboard.just_pressed(KeyCode::F9) {
        match File::open(&config.save_path) {
            Ok(file) => match engine.load(BufReader::new(file)) {
                Ok(()) => info!("Game loaded from {}", config.save_path.display()),
                Err(e) => warn!("Load failed: {}", e),
            },
            Err(e) => warn!("Could not open {}: {}", config.save_path.display(), e),
        }
    }
}

/// Left click fires toward the cursor.
pub fn mouse_fire(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut game: ResMut<GameWrapper>,
) {
    if !mouse.just_pressed(MouseButton::Left) || game.engine.phase() != Phase::Playing {
        return;
    }

    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor) {
        game.engine.handle(Command::Fire {
            target: to_screen(world_pos),
        });
    }
}

/// Feed held keys and frame time to the engine.
pub fn advance_game(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut game: ResMut<GameWrapper>,
) {
    let input = PlayerInput::from_keys(
        any_pressed(&keyboard, [KeyCode::KeyW, KeyCode::ArrowUp]),
        any_pressed(&keyboard, [KeyCode::KeyS, KeyCode::ArrowDown]),
        any_pressed(&keyboard, [KeyCode::KeyA, KeyCode::ArrowLeft]),
        any_pressed(&keyboard, [KeyCode::KeyD, KeyCode::ArrowRight]),
        any_pressed(&keyboard, [KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    );
    game.engine.update(time.delta_secs(), &input);
}
