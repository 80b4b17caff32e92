//! Drawing the island.
//!
//! The engine works in screen space (origin top-left, y down). Bevy's 2D
//! camera sits at the window center with y up, so everything goes through
//! [`to_world`] on the way out and [`to_screen`] on the way back in.
//!
//! Static scenery (ground bands, walls, hedges, warehouses, and the Ground
//! trees when `tree.png` is available) is spawned as sprites whenever the
//! zone changes. Everything that moves or animates is
//! drawn with gizmos each frame.

use bevy::prelude::*;
use island_core::components::Faction;
use island_core::engine::{GameEngine, Phase};
use island_logic::constants::{arena, harbor, player};
use island_logic::difficulty::Difficulty;
use island_logic::geometry as geo;
use island_logic::items::ItemKind;
use island_logic::zones::{KeyKind, Zone};

use crate::assets::{SpriteAssets, TREE_SCALE};
use crate::state::{DamageOverlay, GameWrapper, GloomOverlay};

// ============================================================================
// COORDINATES
// ============================================================================

/// Screen-space point to Bevy world space.
pub fn to_world(p: geo::Vec2) -> Vec2 {
    Vec2::new(p.x - arena::WIDTH / 2.0, arena::HEIGHT / 2.0 - p.y)
}

/// Bevy world-space point to screen space.
pub fn to_screen(p: Vec2) -> geo::Vec2 {
    geo::Vec2::new(p.x + arena::WIDTH / 2.0, arena::HEIGHT / 2.0 - p.y)
}

fn rect_center(r: &geo::Rect) -> Vec2 {
    to_world(r.center())
}

fn rect_size(r: &geo::Rect) -> Vec2 {
    Vec2::new(r.w, r.h)
}

/// Oscillates between 0 and `max`.
pub fn pulsing(time: f32, speed: f32, max: f32) -> f32 {
    ((time * speed).sin() + 1.0) / 2.0 * max
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::srgb_u8(r, g, b)
}

// ============================================================================
// SCENERY
// ============================================================================

/// Which zone the scenery sprites were built for
#[derive(Resource, Default)]
pub struct SceneryCache {
    pub built_for: Option<Zone>,
}

#[derive(Component)]
pub struct SceneryTile;

const GROUND_TREES: [(f32, f32); 5] = [
    (140.0, 140.0),
    (210.0, 550.0),
    (610.0, 250.0),
    (810.0, 610.0),
    (980.0, 520.0),
];

/// Trees fall back to gizmos without `tree.png`.
pub fn draws_trees(sprites: &SpriteAssets) -> bool {
    sprites.tree.is_none()
}

pub fn background_color(zone: Option<Zone>) -> Color {
    match zone {
        None => rgb(8, 12, 20),
        Some(Zone::Ground) => rgb(35, 112, 62),
        Some(Zone::Estate) => rgb(62, 88, 72),
        Some(Zone::Tunnels) => rgb(54, 52, 68),
        Some(Zone::Harbor) => rgb(160, 140, 100),
    }
}

fn wall_color(zone: Zone, wall: &geo::Rect) -> Color {
    match zone {
        Zone::Ground => rgb(40, 35, 30),
        Zone::Estate => rgb(70, 60, 50),
        Zone::Tunnels => rgb(30, 30, 40),
        Zone::Harbor => match (wall.w as u32, wall.h as u32) {
            (15, _) => rgb(139, 90, 43),
            (30, 30) => rgb(110, 70, 40),
            (40, 40) => rgb(160, 120, 80),
            (100..=160, _) => rgb(120, 95, 70),
            _ => rgb(70, 60, 50),
        },
    }
}

/// Zone shown on screen, `None` on the menu.
fn shown_zone(engine: &GameEngine) -> Option<Zone> {
    match engine.phase() {
        Phase::Menu { .. } => None,
        _ => Some(engine.zone()),
    }
}

fn spawn_tile(commands: &mut Commands, r: &geo::Rect, color: Color, z: f32) {
    commands.spawn((
        Sprite::from_color(color, rect_size(r)),
        Transform::from_translation(rect_center(r).extend(z)),
        SceneryTile,
    ));
}

/// Rebuild the static sprites when the zone changes.
pub fn sync_scenery(
    mut commands: Commands,
    game: Res<GameWrapper>,
    sprites: Res<SpriteAssets>,
    mut cache: ResMut<SceneryCache>,
    mut clear: ResMut<ClearColor>,
    tiles: Query<Entity, With<SceneryTile>>,
) {
    let zone = shown_zone(&game.engine);
    if cache.built_for == zone {
        return;
    }
    cache.built_for = zone;
    clear.0 = background_color(zone);

    for entity in tiles.iter() {
        commands.entity(entity).despawn();
    }
    let Some(zone) = zone else {
        return;
    };

    match zone {
        Zone::Estate => {
            for hedge in [
                geo::Rect::new(150.0, 110.0, 280.0, 26.0),
                geo::Rect::new(520.0, 110.0, 300.0, 26.0),
                geo::Rect::new(890.0, 110.0, 170.0, 26.0),
            ] {
                spawn_tile(&mut commands, &hedge, rgb(38, 118, 64), 0.5);
            }
        }
        Zone::Harbor => {
            spawn_tile(
                &mut commands,
                &geo::Rect::new(0.0, 0.0, arena::WIDTH, 250.0),
                rgb(0, 100, 180),
                0.1,
            );
            spawn_tile(
                &mut commands,
                &geo::Rect::new(0.0, 230.0, arena::WIDTH, 70.0),
                rgb(214, 190, 140),
                0.2,
            );
            spawn_tile(&mut commands, &harbor::PIER, rgb(139, 90, 43), 0.3);
        }
        Zone::Ground => {
            if let Some(tree) = &sprites.tree {
                for (x, y) in GROUND_TREES {
                    let c = to_world(geo::Vec2::new(x, y));
                    commands.spawn((
                        Sprite::from_image(tree.clone()),
                        Transform::from_translation(c.extend(0.6))
                            .with_scale(Vec3::splat(TREE_SCALE)),
                        SceneryTile,
                    ));
                }
            }
        }
        Zone::Tunnels => {}
    }

    for wall in game.engine.layout().obstacles.iter() {
        spawn_tile(&mut commands, wall, wall_color(zone, wall), 1.0);
    }
}

/// Animated zone decor drawn over the scenery.
pub fn render_zone_details(
    game: Res<GameWrapper>,
    sprites: Res<SpriteAssets>,
    mut gizmos: Gizmos,
) {
    let engine = &game.engine;
    let Some(zone) = shown_zone(engine) else {
        return;
    };
    let anim = engine.timers().anim;

    match zone {
        Zone::Ground => {
            if draws_trees(&sprites) {
                for (x, y) in GROUND_TREES {
                    let c = to_world(geo::Vec2::new(x, y));
                    gizmos.line_2d(c, c - Vec2::new(0.0, 40.0), rgb(92, 62, 40));
                    gizmos.circle_2d(Isometry2d::from_translation(c), 30.0, rgb(48, 138, 76));
                }
            }
            for (x, y) in [(300.0, 520.0), (740.0, 160.0), (520.0, 640.0), (1040.0, 300.0)] {
                let c = to_world(geo::Vec2::new(x, y));
                gizmos.circle_2d(Isometry2d::from_translation(c), 17.0, rgb(40, 132, 62));
            }
        }
        Zone::Estate => {
            let fountain = rect_center(&geo::Rect::new(620.0, 470.0, 90.0, 90.0));
            gizmos.ellipse_2d(
                Isometry2d::from_translation(fountain),
                Vec2::new(45.0, 45.0),
                rgb(70, 110, 130),
            );
            gizmos.ellipse_2d(
                Isometry2d::from_translation(fountain),
                Vec2::new(35.0, 35.0),
                rgb(120, 180, 210),
            );
        }
        Zone::Tunnels => {
            for r in [
                geo::Rect::new(130.0, 130.0, 22.0, 36.0),
                geo::Rect::new(900.0, 250.0, 22.0, 36.0),
                geo::Rect::new(260.0, 610.0, 22.0, 36.0),
            ] {
                let tip = to_world(geo::Vec2::new(r.x + r.w / 2.0, r.y));
                let left = to_world(geo::Vec2::new(r.x, r.bottom()));
                let right = to_world(geo::Vec2::new(r.right(), r.bottom()));
                gizmos.linestrip_2d([tip, left, right, tip], rgb(120, 220, 255));
            }
            let wave = (1.0 + (anim * 2.7).sin()) * 12.0;
            let pool = Color::srgb_u8(34, (82.0 + wave) as u8, (130.0 + wave / 2.0) as u8);
            for r in [
                geo::Rect::new(720.0, 110.0, 180.0, 70.0),
                geo::Rect::new(840.0, 530.0, 160.0, 55.0),
            ] {
                gizmos.ellipse_2d(
                    Isometry2d::from_translation(rect_center(&r)),
                    rect_size(&r) / 2.0,
                    pool,
                );
            }
            for (x, y) in [(170.0, 470.0), (580.0, 640.0), (1010.0, 510.0)] {
                for dx in [0.0, 11.0] {
                    let c = to_world(geo::Vec2::new(x + dx, y));
                    gizmos.circle_2d(Isometry2d::from_translation(c), 3.0, rgb(220, 40, 40));
                }
            }
        }
        Zone::Harbor => render_harbor(&mut gizmos, anim),
    }

    render_gates(engine, &mut gizmos, anim);
}

fn render_harbor(gizmos: &mut Gizmos, anim: f32) {
    let wave = (1.0 + (anim * 3.0).sin()) * 15.0;
    for i in 0..8 {
        let y = 30.0 + i as f32 * 28.0 + wave / 3.0;
        let offset = (anim * 40.0 + i as f32 * 57.0) % 80.0;
        let mut x = -offset;
        while x < arena::WIDTH {
            let a = to_world(geo::Vec2::new(x, y));
            let b = to_world(geo::Vec2::new(x + 30.0, y));
            gizmos.line_2d(a, b, rgb(200, 240, 255));
            x += 80.0;
        }
    }
    gizmos.line_2d(
        to_world(geo::Vec2::new(0.0, harbor::GROUND.y)),
        to_world(geo::Vec2::new(arena::WIDTH, harbor::GROUND.y)),
        rgb(139, 69, 19),
    );

    let pier = harbor::PIER;
    let mut x = pier.x;
    while x < pier.right() {
        gizmos.line_2d(
            to_world(geo::Vec2::new(x, pier.y)),
            to_world(geo::Vec2::new(x, pier.bottom())),
            rgb(101, 67, 33),
        );
        x += 30.0;
    }

    let boat = harbor::BOAT;
    gizmos.ellipse_2d(
        Isometry2d::from_translation(rect_center(&boat)),
        rect_size(&boat) / 2.0,
        rgb(101, 67, 33),
    );
    gizmos.ellipse_2d(
        Isometry2d::from_translation(rect_center(&boat)),
        rect_size(&boat) / 2.0 + Vec2::splat(2.0),
        rgb(70, 40, 20),
    );
    let cabin = geo::Rect::new(1035.0, 190.0, 50.0, 25.0);
    gizmos.rect_2d(
        Isometry2d::from_translation(rect_center(&cabin)),
        rect_size(&cabin),
        rgb(80, 80, 120),
    );
}

fn render_gates(engine: &GameEngine, gizmos: &mut Gizmos, anim: f32) {
    let progress = engine.progress();
    for gate in engine.layout().gates.iter() {
        let locked = gate.required_key.is_some_and(|k| !progress.has_key(k));
        let (fill, border) = if locked {
            let glow = if gate.required_key == Some(KeyKind::Boat) {
                pulsing(anim, 3.0, 30.0) as u8
            } else {
                0
            };
            (rgb(204u8.saturating_add(glow), 120, 82), rgb(220, 40, 40))
        } else {
            (rgb(80, 210, 100), rgb(40, 200, 60))
        };
        let center = rect_center(&gate.rect);
        let size = rect_size(&gate.rect);
        gizmos.rect_2d(Isometry2d::from_translation(center), size, fill);
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            size + Vec2::splat(4.0),
            border,
        );
    }
}

// ============================================================================
// ACTORS
// ============================================================================

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Gun => rgb(40, 40, 40),
        ItemKind::Ammo(_) => rgb(240, 220, 70),
        ItemKind::Clue => rgb(230, 230, 245),
        ItemKind::Key(_) => rgb(245, 200, 70),
    }
}

/// Point above a pickup where its marker sits.
pub fn marker_anchor(rect: &geo::Rect) -> Vec2 {
    to_world(geo::Vec2::new(rect.center().x, rect.y - 12.0))
}

pub fn render_items(game: Res<GameWrapper>, mut gizmos: Gizmos) {
    if game.engine.phase() != Phase::Playing {
        return;
    }
    for item in game.engine.visible_items() {
        gizmos.rect_2d(
            Isometry2d::from_translation(rect_center(&item.rect)),
            rect_size(&item.rect),
            item_color(item.id.kind),
        );
        gizmos.circle_2d(
            Isometry2d::from_translation(marker_anchor(&item.rect)),
            9.0,
            rgb(20, 20, 20),
        );
    }
}

pub fn render_actors(game: Res<GameWrapper>, mut gizmos: Gizmos) {
    let engine = &game.engine;
    if shown_zone(engine).is_none() {
        return;
    }

    for survivor in engine.survivors_in_zone() {
        let color = if survivor.following {
            rgb(165, 242, 187)
        } else {
            rgb(92, 188, 108)
        };
        draw_body(&mut gizmos, &survivor.rect, color);
    }

    let guard_health = engine.profile().guard_health.max(1) as f32;
    for guard in engine.guards_in_zone() {
        let color = if guard.alerted {
            rgb(230, 90, 60)
        } else {
            rgb(175, 72, 72)
        };
        draw_body(&mut gizmos, &guard.rect, color);
        draw_gun(&mut gizmos, &guard.rect, guard.facing.look, guard.facing.muzzle_timer > 0.0);
        let bar = to_world(geo::Vec2::new(guard.rect.center().x, guard.rect.y - 8.0));
        draw_resource_bar(
            &mut gizmos,
            bar,
            guard.rect.w + 6.0,
            4.0,
            guard.health as f32 / guard_health,
            rgb(220, 60, 60),
        );
    }

    if let Some(player) = engine.player() {
        draw_body(&mut gizmos, &player.rect, rgb(55, 145, 232));
        if player.state.has_gun {
            draw_gun(
                &mut gizmos,
                &player.rect,
                player.facing.look,
                player.facing.muzzle_timer > 0.0,
            );
        }
    }

    for bullet in engine.bullets() {
        let color = match bullet.owner {
            Faction::Player => rgb(255, 220, 95),
            Faction::Guard => rgb(255, 90, 90),
        };
        gizmos.circle_2d(
            Isometry2d::from_translation(to_world(bullet.pos)),
            bullet.radius,
            color,
        );
    }
}

/// Torso, head and legs.
fn draw_body(gizmos: &mut Gizmos, rect: &geo::Rect, color: Color) {
    let torso = geo::Rect::new(rect.x, rect.y + 6.0, rect.w, rect.h - 14.0);
    gizmos.rect_2d(
        Isometry2d::from_translation(rect_center(&torso)),
        rect_size(&torso),
        color,
    );
    let head = to_world(geo::Vec2::new(rect.center().x, rect.y));
    gizmos.circle_2d(Isometry2d::from_translation(head), 7.0, rgb(241, 208, 170));
    for dx in [rect.w * 0.3, rect.w * 0.7] {
        gizmos.line_2d(
            to_world(geo::Vec2::new(rect.x + dx, rect.bottom() - 8.0)),
            to_world(geo::Vec2::new(rect.x + dx, rect.bottom())),
            color,
        );
    }
}

fn draw_gun(gizmos: &mut Gizmos, rect: &geo::Rect, look: geo::Vec2, firing: bool) {
    let from = rect.center();
    let tip = from + look * 16.0;
    gizmos.line_2d(to_world(from), to_world(tip), rgb(40, 40, 40));
    if firing {
        let side = look.perp() * 4.0;
        let flash = [tip + side, tip + look * 10.0, tip - side, tip + side].map(to_world);
        gizmos.linestrip_2d(flash, rgb(255, 240, 130));
    }
}

pub fn draw_resource_bar(
    gizmos: &mut Gizmos,
    pos: Vec2,
    width: f32,
    height: f32,
    level: f32,
    color: Color,
) {
    // Background
    gizmos.rect_2d(
        Isometry2d::from_translation(pos),
        Vec2::new(width, height),
        Color::srgba(0.2, 0.2, 0.25, 0.8),
    );

    let fill_width = width * level.clamp(0.0, 1.0);
    if fill_width > 0.1 {
        gizmos.rect_2d(
            Isometry2d::from_translation(pos - Vec2::new((width - fill_width) / 2.0, 0.0)),
            Vec2::new(fill_width, height - 1.0),
            color,
        );
    }
}

// ============================================================================
// OVERLAYS AND SCREENS
// ============================================================================

pub fn spawn_overlays(commands: &mut Commands) {
    let size = Vec2::new(arena::WIDTH, arena::HEIGHT);
    commands.spawn((
        Sprite::from_color(Color::NONE, size),
        Transform::from_xyz(0.0, 0.0, 10.0),
        GloomOverlay,
    ));
    commands.spawn((
        Sprite::from_color(Color::NONE, size),
        Transform::from_xyz(0.0, 0.0, 11.0),
        DamageOverlay,
    ));
}

/// Darkness per zone, red flicker and the hit flash.
pub fn update_overlays(
    game: Res<GameWrapper>,
    mut gloom: Query<&mut Sprite, (With<GloomOverlay>, Without<DamageOverlay>)>,
    mut damage: Query<&mut Sprite, (With<DamageOverlay>, Without<GloomOverlay>)>,
) {
    let engine = &game.engine;
    let timers = engine.timers();
    let zone = shown_zone(engine);

    if let Ok(mut sprite) = gloom.get_single_mut() {
        sprite.color = match zone {
            None => Color::NONE,
            Some(_) if timers.flicker > 0.0 => Color::srgba_u8(120, 0, 0, 60),
            Some(Zone::Tunnels) => Color::srgba_u8(0, 0, 0, 78),
            Some(_) => Color::srgba_u8(0, 0, 0, 48),
        };
    }
    if let Ok(mut sprite) = damage.get_single_mut() {
        let alpha = (150.0 * timers.damage_flash * 5.0).min(200.0) as u8;
        sprite.color = if zone.is_some() && alpha > 0 {
            Color::srgba_u8(255, 0, 0, alpha)
        } else {
            Color::NONE
        };
    }
}

/// Top-left corner of a difficulty card in screen space.
pub fn card_rect(index: usize) -> geo::Rect {
    geo::Rect::new(
        arena::WIDTH / 2.0 - 260.0,
        190.0 + index as f32 * 120.0,
        520.0,
        98.0,
    )
}

pub fn render_menu(game: Res<GameWrapper>, mut gizmos: Gizmos) {
    let Phase::Menu { selected } = game.engine.phase() else {
        return;
    };
    // Gradient bands from the top of the screen down.
    for i in 0..24 {
        let t = i as f32 / 23.0;
        let y = t * arena::HEIGHT;
        let color = Color::srgb_u8(
            (8.0 + 16.0 * t) as u8,
            (12.0 + 28.0 * t) as u8,
            (20.0 + 40.0 * t) as u8,
        );
        gizmos.line_2d(
            to_world(geo::Vec2::new(0.0, y)),
            to_world(geo::Vec2::new(arena::WIDTH, y)),
            color,
        );
    }

    for (i, difficulty) in Difficulty::all().iter().enumerate() {
        let card = card_rect(i);
        let chosen = *difficulty == selected;
        let border = if chosen {
            rgb(120, 150, 220)
        } else {
            rgb(50, 60, 80)
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(rect_center(&card)),
            rect_size(&card),
            border,
        );
        if chosen {
            gizmos.rect_2d(
                Isometry2d::from_translation(rect_center(&card)),
                rect_size(&card) - Vec2::splat(6.0),
                rgb(34, 44, 66),
            );
        }
    }
}

/// HUD bars beside the health and stamina text.
pub fn render_hud_bars(game: Res<GameWrapper>, mut gizmos: Gizmos) {
    let engine = &game.engine;
    if engine.phase() != Phase::Playing || engine.hud_collapsed() {
        return;
    }
    let Some(view) = engine.player() else {
        return;
    };

    let max_health = engine.profile().player_health.max(1) as f32;
    let health = geo::Rect::new(130.0, 34.0, 200.0, 12.0);
    draw_resource_bar(
        &mut gizmos,
        rect_center(&health),
        health.w,
        health.h,
        view.state.health as f32 / max_health,
        rgb(220, 50, 50),
    );
    let stamina = geo::Rect::new(130.0, 53.0, 200.0, 10.0);
    draw_resource_bar(
        &mut gizmos,
        rect_center(&stamina),
        stamina.w,
        stamina.h,
        view.state.stamina / player::MAX_STAMINA,
        rgb(60, 200, 230),
    );
}
