//! Sound for the island viewer.
//!
//! Clips found under `assets/sfx` and `assets/music` are loaded through the
//! asset server. Anything missing is synthesized at startup, wrapped in a WAV
//! header and handed to Bevy as an [`AudioSource`]. Music loops on a single
//! entity that is swapped whenever the [`MusicDirector`] picks a new track.

use std::collections::HashMap;
use std::path::Path;

use bevy::audio::Volume;
use bevy::prelude::*;
use island_core::engine::{GameEngine, Phase};
use island_core::events::GameEvent;
use island_logic::audio::{
    encode_wav, synthesize_effect, synthesize_music, MusicDirector, MusicTrack, SoundEffect,
    SAMPLE_RATE,
};

use crate::assets::{asset_root, effect_asset, music_asset};
use crate::state::{GameWrapper, ViewerConfig};

/// Takes per effect, cycled so repeats do not sound identical.
const VARIANTS: u64 = 3;

#[derive(Resource)]
pub struct AudioLibrary {
    music: HashMap<MusicTrack, Handle<AudioSource>>,
    effects: HashMap<SoundEffect, Vec<Handle<AudioSource>>>,
    next_variant: usize,
}

impl AudioLibrary {
    fn effect(&mut self, effect: SoundEffect) -> Option<Handle<AudioSource>> {
        let takes = self.effects.get(&effect)?;
        let handle = takes.get(self.next_variant % takes.len())?.clone();
        self.next_variant = self.next_variant.wrapping_add(1);
        Some(handle)
    }
}

#[derive(Resource, Default)]
pub struct MusicState {
    pub director: MusicDirector,
    loop_entity: Option<Entity>,
}

/// What the music loop should do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicChange {
    Keep,
    Start(MusicTrack),
    Stop,
}

/// Menu, zone or combat music while playing, the fanfare on victory,
/// silence after defeat.
pub fn next_music(director: &mut MusicDirector, engine: &GameEngine) -> MusicChange {
    let started = match engine.phase() {
        Phase::Menu { .. } => director.select(None, false),
        Phase::Playing => director.select(Some(engine.zone()), engine.any_alerted()),
        Phase::Victory => director.request(MusicTrack::Victory),
        Phase::Defeated => {
            if director.current().is_none() {
                return MusicChange::Keep;
            }
            director.stop();
            return MusicChange::Stop;
        }
    };
    started.map_or(MusicChange::Keep, MusicChange::Start)
}

fn wav_source(samples: &[i16]) -> AudioSource {
    AudioSource {
        bytes: encode_wav(samples, SAMPLE_RATE).into(),
    }
}

/// Where a clip comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSource {
    File(String),
    Synthesized,
}

pub fn music_source(root: &Path, track: MusicTrack) -> ClipSource {
    music_asset(root, track).map_or(ClipSource::Synthesized, ClipSource::File)
}

pub fn effect_source(root: &Path, effect: SoundEffect) -> ClipSource {
    effect_asset(root, effect).map_or(ClipSource::Synthesized, ClipSource::File)
}

pub fn setup_audio(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut sources: ResMut<Assets<AudioSource>>,
    config: Res<ViewerConfig>,
) {
    let root = asset_root();
    let mut from_files = 0;

    let mut music = HashMap::new();
    for track in MusicTrack::all() {
        let handle: Handle<AudioSource> = match music_source(&root, *track) {
            ClipSource::File(path) => {
                from_files += 1;
                asset_server.load(path)
            }
            ClipSource::Synthesized => sources.add(wav_source(&synthesize_music(*track))),
        };
        music.insert(*track, handle);
    }

    let mut effects = HashMap::new();
    for effect in SoundEffect::all() {
        let takes: Vec<Handle<AudioSource>> = match effect_source(&root, *effect) {
            ClipSource::File(path) => {
                from_files += 1;
                vec![asset_server.load(path)]
            }
            ClipSource::Synthesized => (0..VARIANTS)
                .map(|n| {
                    let samples = synthesize_effect(*effect, config.seed.wrapping_add(n));
                    sources.add(wav_source(&samples))
                })
                .collect(),
        };
        effects.insert(*effect, takes);
    }

    let mut director = MusicDirector::new();
    director.set_music_volume(config.music_volume);
    director.set_sfx_volume(config.sfx_volume);

    info!(
        "Audio ready: {} of {} clips loaded from {}",
        from_files,
        MusicTrack::all().len() + SoundEffect::all().len(),
        root.display()
    );
    commands.insert_resource(AudioLibrary {
        music,
        effects,
        next_variant: 0,
    });
    commands.insert_resource(MusicState {
        director,
        loop_entity: None,
    });
}

/// Swap the music loop when the situation changes and apply ducking.
pub fn drive_music(
    mut commands: Commands,
    time: Res<Time>,
    game: Res<GameWrapper>,
    library: Res<AudioLibrary>,
    config: Res<ViewerConfig>,
    mut music: ResMut<MusicState>,
    sinks: Query<&AudioSink>,
) {
    let change = next_music(&mut music.director, &game.engine);
    match change {
        MusicChange::Keep => {}
        MusicChange::Stop => {
            if let Some(entity) = music.loop_entity.take() {
                commands.entity(entity).despawn();
            }
        }
        MusicChange::Start(track) => {
            if let Some(entity) = music.loop_entity.take() {
                commands.entity(entity).despawn();
            }
            if let (false, Some(handle)) = (config.muted, library.music.get(&track)) {
                let volume = music.director.music_volume();
                let entity = commands
                    .spawn((
                        AudioPlayer::new(handle.clone()),
                        PlaybackSettings::LOOP.with_volume(Volume::new(volume)),
                    ))
                    .id();
                music.loop_entity = Some(entity);
            }
            info!("Music: {:?}", track);
        }
    }

    music.director.tick(time.delta_secs());
    if let Some(sink) = music.loop_entity.and_then(|e| sinks.get(e).ok()) {
        sink.set_volume(music.director.music_volume());
    }
}

/// Play queued sound cues and log banner text.
pub fn handle_game_events(
    mut commands: Commands,
    mut game: ResMut<GameWrapper>,
    mut library: ResMut<AudioLibrary>,
    mut music: ResMut<MusicState>,
    config: Res<ViewerConfig>,
) {
    for event in game.engine.drain_events() {
        match event {
            GameEvent::Sound { cue, priority } => {
                let Some(effect) = cue.effect() else {
                    continue;
                };
                let volume = music.director.trigger(effect, priority);
                if config.muted {
                    continue;
                }
                if let Some(handle) = library.effect(effect) {
                    commands.spawn((
                        AudioPlayer::new(handle),
                        PlaybackSettings::DESPAWN.with_volume(Volume::new(volume)),
                    ));
                }
            }
            GameEvent::Message(text) => info!("{}", text),
            GameEvent::ZoneEntered(zone) => info!("Entered {}", zone),
            GameEvent::Victory => info!("Round won"),
            GameEvent::Defeat => info!("Round lost"),
        }
    }
}
