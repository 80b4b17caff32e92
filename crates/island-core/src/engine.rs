//! Game engine - main entry point for running a round
//!
//! The front end feeds discrete [`Command`]s and held [`PlayerInput`]; the
//! engine advances the world in fixed 60 Hz ticks and queues [`GameEvent`]s
//! for sound and banners.

use std::collections::HashSet;

use hecs::World;
use island_logic::constants::{arena, player, timers};
use island_logic::difficulty::{Difficulty, DifficultyProfile};
use island_logic::geometry::{Rect, Vec2};
use island_logic::items::{ItemId, ItemKind, ItemSpawn, ItemTable};
use island_logic::tasks::{ready_to_escape, region_complete, region_tasks, Progress, Task};
use island_logic::zones::{layout, Zone, ZoneLayout};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::events::{GameEvent, MessageBoard, SoundCue};
use crate::generation::{randomize_items, spawn_guards, spawn_player, spawn_survivors};
use crate::persistence::SaveError;
use crate::systems::*;

/// Longest frame the accumulator will catch up on.
const MAX_FRAME: f32 = 0.25;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu { selected: Difficulty },
    Playing,
    Victory,
    Defeated,
}

/// Discrete player intents, one per key press or click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MenuUp,
    MenuDown,
    Start,
    Interact,
    ToggleHud,
    Fire { target: Vec2 },
    ReturnToMenu,
}

/// Countdown and effect timers, all in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    /// Blocks gates right after a transfer
    pub gate_cooldown: f32,
    /// Throttles repeated hint banners
    pub hint_cooldown: f32,
    pub damage_flash: f32,
    pub flicker: f32,
    /// Free-running clock for water and gate animation
    pub anim: f32,
    /// Time until the next footstep cue
    pub footstep: f32,
}

impl Timers {
    fn tick(&mut self, dt: f32) {
        self.gate_cooldown = (self.gate_cooldown - dt).max(0.0);
        self.hint_cooldown = (self.hint_cooldown - dt).max(0.0);
        self.damage_flash = (self.damage_flash - dt).max(0.0);
        self.flicker = (self.flicker - dt).max(0.0);
        self.anim += dt;
    }
}

/// Snapshot of the player for the front end
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub state: PlayerState,
    pub rect: Rect,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardView {
    pub rect: Rect,
    pub health: i32,
    pub alerted: bool,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurvivorView {
    pub rect: Rect,
    pub home: Zone,
    pub following: bool,
}

/// Main game engine
pub struct GameEngine {
    /// ECS world containing the player, guards, survivors and bullets
    pub world: World,
    seed: u64,
    /// Rounds started since the seed was set
    rounds: u64,
    phase: Phase,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    zone: Zone,
    layout: ZoneLayout,
    walls: Vec<Rect>,
    items: ItemTable,
    collected: HashSet<ItemId>,
    messages: MessageBoard,
    hud_collapsed: bool,
    timers: Timers,
    alerted: bool,
    accumulator: f32,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine sitting on the difficulty menu
    pub fn new(seed: u64) -> Self {
        let layout = layout(Zone::Ground);
        let walls = layout.collision_walls();
        Self {
            world: World::new(),
            seed,
            rounds: 0,
            phase: Phase::Menu {
                selected: Difficulty::Survivor,
            },
            difficulty: Difficulty::Survivor,
            profile: Difficulty::Survivor.profile(),
            zone: Zone::Ground,
            layout,
            walls,
            items: ItemTable::default(),
            collected: HashSet::new(),
            messages: MessageBoard::default(),
            hud_collapsed: false,
            timers: Timers::default(),
            alerted: false,
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    /// Start a fresh round at `difficulty`
    pub fn reset_round(&mut self, difficulty: Difficulty) {
        self.world.clear();
        self.difficulty = difficulty;
        self.profile = difficulty.profile();

        spawn_player(&mut self.world, &self.profile);
        spawn_survivors(&mut self.world);
        let mut rng = round_rng(self.seed, self.rounds);
        self.rounds += 1;
        let guards = spawn_guards(&mut self.world, &self.profile, &mut rng);
        self.items = randomize_items(&mut rng);

        self.collected.clear();
        self.timers = Timers::default();
        self.alerted = false;
        self.accumulator = 0.0;
        self.hud_collapsed = false;
        self.set_zone(Zone::Ground);
        self.phase = Phase::Playing;

        self.messages.clear();
        self.post(
            format!("Difficulty: {}. Escape the island!", self.profile.name),
            timers::MESSAGE_LONG,
        );
        log::info!(
            "Round started on {} with {} guards and {} pickups",
            self.profile.name,
            guards.len(),
            self.items.len()
        );
    }

    /// Apply one discrete command
    pub fn handle(&mut self, command: Command) {
        match (self.phase, command) {
            (Phase::Menu { selected }, Command::MenuUp) => {
                self.phase = Phase::Menu {
                    selected: selected.previous(),
                };
            }
            (Phase::Menu { selected }, Command::MenuDown) => {
                self.phase = Phase::Menu {
                    selected: selected.next(),
                };
            }
            (Phase::Menu { selected }, Command::Start) => self.reset_round(selected),
            (Phase::Playing, Command::Interact) => {
                if let Some(text) =
                    interact_system(&mut self.world, self.zone, &self.items, &mut self.collected)
                {
                    self.post(text, timers::MESSAGE_SHORT);
                    self.sound(SoundCue::Pickup, false);
                }
            }
            (Phase::Playing, Command::ToggleHud) => self.hud_collapsed = !self.hud_collapsed,
            (Phase::Playing, Command::Fire { target }) => {
                if try_fire(&mut self.world, target) {
                    self.sound(SoundCue::Gunshot, false);
                }
            }
            (Phase::Victory | Phase::Defeated, Command::ReturnToMenu) => {
                self.world.clear();
                self.messages.clear();
                self.phase = Phase::Menu {
                    selected: self.difficulty,
                };
            }
            _ => {}
        }
    }

    /// Advance by `dt` real seconds, running as many fixed ticks as fit
    pub fn update(&mut self, dt: f32, input: &PlayerInput) {
        if self.phase != Phase::Playing {
            return;
        }
        self.accumulator = (self.accumulator + dt).min(MAX_FRAME);
        while self.accumulator >= arena::TICK_SECONDS {
            self.accumulator -= arena::TICK_SECONDS;
            self.tick(input);
            if self.phase != Phase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
    }

    /// One fixed simulation step
    fn tick(&mut self, input: &PlayerInput) {
        let dt = arena::TICK_SECONDS;
        self.timers.tick(dt);

        if validate_player_position(&mut self.world, self.zone) {
            self.post("You can't swim! Get back on land.", timers::MESSAGE_SHORT);
            self.sound(SoundCue::Hurt, false);
        }

        let travelled =
            player_movement_system(&mut self.world, input, &self.profile, &self.walls, dt);
        self.footsteps(travelled, dt);

        let alerted = guard_system(&mut self.world, self.zone, &self.profile, &self.walls, dt);
        if alerted && !self.alerted {
            self.sound(SoundCue::GuardAlert, false);
        }
        self.alerted = alerted;

        let rescued = survivor_system(&mut self.world, self.zone, &self.walls);
        for _ in 0..rescued {
            self.sound(SoundCue::Pickup, false);
            log::info!("Survivor rescued at the pier");
        }

        let report = bullet_system(&mut self.world, self.zone, &self.walls, &self.profile);
        if report.guards_killed > 0 {
            log::debug!("{} guard(s) down in {}", report.guards_killed, self.zone);
        }
        for _ in 0..report.player_hits {
            self.take_damage(self.profile.guard_damage);
            if self.phase != Phase::Playing {
                return;
            }
        }

        self.gate_system();
        if self.phase == Phase::Playing {
            self.extraction_system();
        }

        self.messages.tick(dt);
    }

    fn footsteps(&mut self, travelled: f32, dt: f32) {
        if travelled <= 0.0 {
            self.timers.footstep = 0.0;
            return;
        }
        self.timers.footstep -= dt;
        if self.timers.footstep <= 0.0 {
            self.sound(SoundCue::Footstep, false);
            self.timers.footstep = if travelled > player::SPEED * 1.2 {
                timers::FOOTSTEP_SPRINT
            } else {
                timers::FOOTSTEP_WALK
            };
        }
    }

    fn take_damage(&mut self, amount: i32) {
        let mut dead = false;
        for (_, state) in self.world.query_mut::<&mut PlayerState>() {
            state.health -= amount;
            dead = state.is_dead();
        }
        self.timers.damage_flash = timers::DAMAGE_FLASH;
        self.timers.flicker = timers::FLICKER;
        self.sound(SoundCue::Hurt, true);

        if dead {
            self.phase = Phase::Defeated;
            self.post("You were defeated.", timers::MESSAGE_LONG);
            self.events.push(GameEvent::Defeat);
            log::info!("Player defeated in {}", self.zone);
        }
    }

    /// Locked gates and unfinished regions give hints; open gates move the player on.
    fn gate_system(&mut self) {
        if self.timers.gate_cooldown > 0.0 {
            return;
        }
        let Some(rect) = player_rect(&self.world) else {
            return;
        };
        let Some(keys) = self.player().map(|p| p.state.keys) else {
            return;
        };
        let region_done = region_complete(self.zone, &self.progress());

        match check_gates(&rect, self.zone, &self.layout.gates, &keys, region_done) {
            GateCheck::Clear => {}
            GateCheck::Locked(key) => {
                self.hint(format!("Pathway locked: requires {}", key.label()));
            }
            GateCheck::Unfinished => self.hint("Complete this region's tasks first.".to_string()),
            GateCheck::Open(gate) => {
                let from = self.zone;
                let followers = transfer_through_gate(&mut self.world, from, &gate);
                clear_bullets(&mut self.world);
                self.set_zone(gate.target);
                self.timers.gate_cooldown = timers::GATE_COOLDOWN;
                self.sound(SoundCue::Door, false);
                self.post(format!("Entered {}", gate.target), timers::MESSAGE_SHORT);
                self.events.push(GameEvent::ZoneEntered(gate.target));
                log::info!(
                    "Entered {} from {} with {} follower(s)",
                    gate.target,
                    from,
                    followers
                );
            }
        }
    }

    /// Boarding the boat wins once everything is gathered.
    fn extraction_system(&mut self) {
        let Some(boat) = self.layout.extraction else {
            return;
        };
        let Some(rect) = player_rect(&self.world) else {
            return;
        };
        if !rect.intersects(&boat) {
            return;
        }

        if ready_to_escape(&self.progress()) {
            self.phase = Phase::Victory;
            self.sound(SoundCue::Victory, true);
            self.events.push(GameEvent::Victory);
            log::info!("Escaped the island on {}", self.profile.name);
        } else {
            self.hint("Not ready: need all clues, keys, and rescued survivors.".to_string());
        }
    }

    fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
        self.layout = layout(zone);
        self.walls = self.layout.collision_walls();
    }

    fn post(&mut self, text: impl Into<String>, seconds: f32) {
        let text = text.into();
        self.messages.post(text.clone(), seconds);
        self.events.push(GameEvent::Message(text));
    }

    fn hint(&mut self, text: String) {
        if self.timers.hint_cooldown > 0.0 {
            return;
        }
        self.timers.hint_cooldown = timers::HINT_COOLDOWN;
        self.post(text, timers::MESSAGE_SHORT);
    }

    fn sound(&mut self, cue: SoundCue, priority: bool) {
        self.events.push(GameEvent::Sound { cue, priority });
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rounds started so far; the next round draws its layout from this
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    /// Walls that currently block movement, sight and bullets
    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn messages(&self) -> &MessageBoard {
        &self.messages
    }

    /// Banner text, if one is showing
    pub fn message(&self) -> Option<&str> {
        self.messages.current()
    }

    pub fn hud_collapsed(&self) -> bool {
        self.hud_collapsed
    }

    /// Whether any guard in the current zone has seen the player this tick
    pub fn any_alerted(&self) -> bool {
        self.alerted
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn collected(&self) -> &HashSet<ItemId> {
        &self.collected
    }

    pub fn player(&self) -> Option<PlayerView> {
        self.world
            .query::<(&PlayerState, &Body, &Facing)>()
            .iter()
            .next()
            .map(|(_, (state, body, facing))| PlayerView {
                state: state.clone(),
                rect: body.rect,
                facing: *facing,
            })
    }

    pub fn guards_in_zone(&self) -> Vec<GuardView> {
        self.world
            .query::<(&Guard, &Body, &Facing, &Located)>()
            .iter()
            .filter(|(_, (_, _, _, located))| located.0 == self.zone)
            .map(|(_, (guard, body, facing, _))| GuardView {
                rect: body.rect,
                health: guard.health,
                alerted: guard.alerted,
                facing: *facing,
            })
            .collect()
    }

    /// Survivors in the current zone that still need escorting
    pub fn survivors_in_zone(&self) -> Vec<SurvivorView> {
        self.world
            .query::<(&Survivor, &Body, &Located)>()
            .iter()
            .filter(|(_, (s, _, located))| located.0 == self.zone && !s.rescued)
            .map(|(_, (s, body, _))| SurvivorView {
                rect: body.rect,
                home: s.home,
                following: s.following,
            })
            .collect()
    }

    pub fn bullets(&self) -> Vec<Bullet> {
        self.world
            .query::<&Bullet>()
            .iter()
            .map(|(_, bullet)| *bullet)
            .collect()
    }

    /// Uncollected pickups lying in the current zone
    pub fn visible_items(&self) -> Vec<&ItemSpawn> {
        self.items
            .in_zone(self.zone)
            .filter(|item| !self.collected.contains(&item.id))
            .collect()
    }

    /// Everything the objectives look at
    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        if let Some(p) = self.player() {
            progress.keys = p.state.keys.held();
            progress.has_gun = p.state.has_gun;
            progress.clues = p.state.clues;
            progress.rescued = p.state.rescued;
        }

        let mut clues: Vec<Zone> = self
            .collected
            .iter()
            .filter(|id| id.kind == ItemKind::Clue)
            .map(|id| id.zone)
            .collect();
        clues.sort();
        progress.clues_found = clues;

        for (_, (s, located)) in self.world.query::<(&Survivor, &Located)>().iter() {
            if s.is_helped() && !progress.survivors_helped.contains(&located.0) {
                progress.survivors_helped.push(located.0);
            }
        }
        progress
    }

    /// Task list for the current zone's HUD panel
    pub fn current_tasks(&self) -> Vec<Task> {
        region_tasks(self.zone, &self.progress())
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Save the game to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        crate::persistence::save_game(
            writer,
            &self.world,
            self.seed,
            self.rounds,
            self.phase,
            self.difficulty,
            self.zone,
            &self.items,
            &self.collected,
            &self.messages,
            self.hud_collapsed,
            &self.timers,
        )
    }

    /// Load a game from a reader, replacing the current round
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = crate::persistence::load_game(reader)?;

        self.world = loaded.world;
        self.seed = loaded.seed;
        self.rounds = loaded.rounds;
        self.phase = loaded.phase;
        self.difficulty = loaded.difficulty;
        self.profile = loaded.difficulty.profile();
        self.items = loaded.items;
        self.collected = loaded.collected;
        self.messages = loaded.messages;
        self.hud_collapsed = loaded.hud_collapsed;
        self.timers = loaded.timers;
        self.set_zone(loaded.zone);

        self.alerted = false;
        self.accumulator = 0.0;
        self.events.clear();
        Ok(())
    }
}

/// RNG for the `round`-th round of `seed`. Round 0 uses the seed as is.
fn round_rng(seed: u64, round: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(round.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
