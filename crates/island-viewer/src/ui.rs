//! UI text for the island viewer.
//!
//! HUD panel, task list, difficulty menu, message banner, end screens and
//! the glyphs floating over pickups.

use bevy::prelude::*;
use island_core::components::KeyRing;
use island_core::engine::{GameEngine, Phase};
use island_logic::constants::{arena, objectives};
use island_logic::difficulty::Difficulty;
use island_logic::zones::KeyKind;

use crate::rendering::{card_rect, marker_anchor};
use crate::state::{EndBanner, GameWrapper, HudText, ItemMarker, MenuText, MessageBanner, TaskPanel};

/// Height of one HUD text row.
const ROW: f32 = 18.0;
/// Longest task list any region has.
const TASK_LINES: usize = 3;

#[derive(Component)]
pub struct AmmoText;

#[derive(Component)]
pub struct TaskLine(pub usize);

#[derive(Component)]
pub struct CardText(pub usize);

fn absolute(left: f32, top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(left),
        top: Val::Px(top),
        ..default()
    }
}

/// Full-width row with its text centered.
fn centered_row(top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        width: Val::Percent(100.0),
        top: Val::Px(top),
        justify_content: JustifyContent::Center,
        ..default()
    }
}

fn font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..default()
    }
}

pub fn setup_ui(mut commands: Commands) {
    // HUD panel (top-left)
    commands.spawn((
        Text::new(""),
        font(14.0),
        TextColor(Color::WHITE),
        absolute(20.0, 14.0),
        HudText,
    ));
    commands.spawn((
        Text::new(""),
        font(14.0),
        TextColor(Color::srgb_u8(255, 230, 80)),
        absolute(20.0, 14.0 + ROW * 5.0),
        AmmoText,
    ));

    // Task list (top-right)
    commands.spawn((
        Text::new("Current Tasks"),
        font(15.0),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(20.0),
            top: Val::Px(14.0),
            ..default()
        },
        TaskPanel,
    ));
    for i in 0..TASK_LINES {
        commands.spawn((
            Text::new(""),
            font(13.0),
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(14.0 + ROW * (i + 1) as f32),
                ..default()
            },
            TaskLine(i),
        ));
    }

    // Message banner (bottom)
    commands.spawn((
        Text::new(""),
        font(18.0),
        TextColor(Color::srgb_u8(255, 245, 170)),
        TextLayout::new_with_justify(JustifyText::Center),
        centered_row(arena::HEIGHT - 58.0),
        MessageBanner,
    ));

    // Victory / game over
    commands.spawn((
        Text::new(""),
        font(44.0),
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        centered_row(arena::HEIGHT / 2.0 - 60.0),
        EndBanner,
    ));

    // Menu title and hint
    commands.spawn((
        Text::new("Escape the Secret Island"),
        font(42.0),
        TextColor(Color::srgb_u8(235, 240, 255)),
        TextLayout::new_with_justify(JustifyText::Center),
        centered_row(90.0),
        MenuText,
    ));
    commands.spawn((
        Text::new("W/S or \u{2191}/\u{2193} to choose \u{b7} Enter to start"),
        font(16.0),
        TextColor(Color::srgb_u8(160, 170, 190)),
        TextLayout::new_with_justify(JustifyText::Center),
        centered_row(arena::HEIGHT - 70.0),
        MenuText,
    ));
    for (i, difficulty) in Difficulty::all().iter().enumerate() {
        let card = card_rect(i);
        commands.spawn((
            Text::new(card_caption(i, *difficulty)),
            font(17.0),
            TextColor(Color::WHITE),
            absolute(card.x + 24.0, card.y + 18.0),
            CardText(i),
        ));
    }
}

/// Two-line caption for a difficulty card.
pub fn card_caption(index: usize, difficulty: Difficulty) -> String {
    let p = difficulty.profile();
    format!(
        "{}. {}\nHP {} | Guard Speed {:.2} | Extra Guards {}",
        index + 1,
        p.name,
        p.player_health,
        p.guard_speed,
        p.extra_guards
    )
}

/// One mark per key in gate order, filled when held.
pub fn key_marks(keys: &KeyRing) -> String {
    KeyKind::all()
        .iter()
        .map(|k| if keys.has(*k) { '\u{2713}' } else { '\u{25cb}' })
        .collect()
}

/// Text of the full or collapsed HUD panel.
pub fn hud_text(engine: &GameEngine) -> String {
    let Some(player) = engine.player() else {
        return String::new();
    };
    let state = &player.state;
    if engine.hud_collapsed() {
        return format!("HP: {} | {}", state.health.max(0), engine.zone());
    }
    format!(
        "Zone: {} ({})\nHealth: {}\nStamina: {:.0}\nKeys: {}\nClues: {}/{} | Rescued: {}/{}",
        engine.zone(),
        engine.difficulty().name(),
        state.health.max(0),
        state.stamina,
        key_marks(&state.keys),
        state.clues,
        objectives::CLUES_REQUIRED,
        state.rescued,
        objectives::SURVIVORS_REQUIRED,
    )
}

#[allow(clippy::type_complexity)]
pub fn render_hud(
    game: Res<GameWrapper>,
    mut hud: Query<
        (&mut Text, &mut Visibility),
        (With<HudText>, Without<AmmoText>, Without<TaskPanel>, Without<TaskLine>),
    >,
    mut ammo: Query<
        (&mut Text, &mut TextColor, &mut Visibility),
        (With<AmmoText>, Without<HudText>, Without<TaskPanel>, Without<TaskLine>),
    >,
    mut panel: Query<
        (&mut Text, &mut Visibility),
        (With<TaskPanel>, Without<HudText>, Without<AmmoText>, Without<TaskLine>),
    >,
    mut lines: Query<
        (&TaskLine, &mut Text, &mut TextColor, &mut Visibility),
        (Without<HudText>, Without<AmmoText>, Without<TaskPanel>),
    >,
) {
    let engine = &game.engine;
    let playing = engine.phase() == Phase::Playing;
    let expanded = playing && !engine.hud_collapsed();
    let show = |on: bool| {
        if on {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    };

    if let Ok((mut text, mut vis)) = hud.get_single_mut() {
        *vis = show(playing);
        **text = hud_text(engine);
    }

    if let Ok((mut text, mut color, mut vis)) = ammo.get_single_mut() {
        *vis = show(expanded);
        let rounds = engine.player().map(|p| p.state.ammo).unwrap_or(0);
        **text = format!("Ammo: {}", rounds);
        color.0 = if rounds > 0 {
            Color::srgb_u8(255, 230, 80)
        } else {
            Color::srgb_u8(140, 140, 140)
        };
    }

    if let Ok((mut text, mut vis)) = panel.get_single_mut() {
        *vis = show(expanded);
        **text = "Current Tasks  (TAB to collapse)".to_string();
    }

    let tasks = if expanded {
        engine.current_tasks()
    } else {
        Vec::new()
    };
    for (line, mut text, mut color, mut vis) in lines.iter_mut() {
        match tasks.get(line.0) {
            Some(task) => {
                *vis = Visibility::Visible;
                let mark = if task.done { "[x]" } else { "[ ]" };
                **text = format!("{} {}", mark, task.label);
                color.0 = if task.done {
                    Color::srgb_u8(120, 230, 130)
                } else {
                    Color::WHITE
                };
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

pub fn render_banners(
    game: Res<GameWrapper>,
    mut message: Query<(&mut Text, &mut Visibility), (With<MessageBanner>, Without<EndBanner>)>,
    mut end: Query<
        (&mut Text, &mut TextColor, &mut Visibility),
        (With<EndBanner>, Without<MessageBanner>),
    >,
) {
    let engine = &game.engine;

    if let Ok((mut text, mut vis)) = message.get_single_mut() {
        match engine.message() {
            Some(msg) if !matches!(engine.phase(), Phase::Menu { .. }) => {
                *vis = Visibility::Visible;
                **text = msg.to_string();
            }
            _ => *vis = Visibility::Hidden,
        }
    }

    if let Ok((mut text, mut color, mut vis)) = end.get_single_mut() {
        let banner = match engine.phase() {
            Phase::Victory => Some(("VICTORY! You escaped!", Color::srgb_u8(255, 230, 110))),
            Phase::Defeated => Some(("GAME OVER", Color::srgb_u8(255, 90, 90))),
            _ => None,
        };
        match banner {
            Some((headline, tint)) => {
                *vis = Visibility::Visible;
                **text = format!("{}\nPress Enter to return to the menu", headline);
                color.0 = tint;
            }
            None => *vis = Visibility::Hidden,
        }
    }
}

pub fn render_menu_text(
    game: Res<GameWrapper>,
    mut titles: Query<&mut Visibility, (With<MenuText>, Without<CardText>)>,
    mut cards: Query<(&CardText, &mut TextColor, &mut Visibility), Without<MenuText>>,
) {
    let selected = match game.engine.phase() {
        Phase::Menu { selected } => Some(selected),
        _ => None,
    };
    let vis = if selected.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    for mut v in titles.iter_mut() {
        *v = vis;
    }
    for (card, mut color, mut v) in cards.iter_mut() {
        *v = vis;
        let chosen = selected.is_some_and(|d| d.index() == card.0);
        color.0 = if chosen {
            Color::WHITE
        } else {
            Color::srgb_u8(150, 160, 180)
        };
    }
}

/// Respawn the pickup glyphs for the current zone.
pub fn sync_item_markers(
    mut commands: Commands,
    game: Res<GameWrapper>,
    markers: Query<Entity, With<ItemMarker>>,
) {
    for entity in markers.iter() {
        commands.entity(entity).despawn();
    }
    if game.engine.phase() != Phase::Playing {
        return;
    }
    for item in game.engine.visible_items() {
        commands.spawn((
            Text2d::new(item.id.kind.marker()),
            font(11.0),
            TextColor(Color::WHITE),
            Transform::from_translation(marker_anchor(&item.rect).extend(5.0)),
            ItemMarker,
        ));
    }
}
