//! Procedural sound - music loops, effects and the music director.
//!
//! Everything is synthesised from formulas so the game ships without audio
//! assets. Samples are 16-bit mono at [`SAMPLE_RATE`].

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::zones::Zone;

pub const SAMPLE_RATE: u32 = 44_100;
/// Length of every music loop in seconds.
pub const LOOP_SECONDS: f32 = 3.0;

pub const MUSIC_VOLUME: f32 = 0.4;
pub const SFX_VOLUME: f32 = 0.5;
/// Volume for priority cues such as taking damage.
pub const PRIORITY_VOLUME: f32 = 0.8;
/// Music volume while ducked under a gunshot.
pub const DUCKED_VOLUME: f32 = 0.15;
pub const DUCK_SECONDS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    Menu,
    Ground,
    Estate,
    Tunnels,
    Harbor,
    Combat,
    Victory,
}

impl MusicTrack {
    pub fn all() -> &'static [MusicTrack] {
        &[
            MusicTrack::Menu,
            MusicTrack::Ground,
            MusicTrack::Estate,
            MusicTrack::Tunnels,
            MusicTrack::Harbor,
            MusicTrack::Combat,
            MusicTrack::Victory,
        ]
    }

    pub fn for_zone(zone: Zone) -> Self {
        match zone {
            Zone::Ground => MusicTrack::Ground,
            Zone::Estate => MusicTrack::Estate,
            Zone::Tunnels => MusicTrack::Tunnels,
            Zone::Harbor => MusicTrack::Harbor,
        }
    }

    /// Four-note motif (Hz) and how many notes play per second.
    fn motif(&self) -> ([f32; 4], f32) {
        match self {
            MusicTrack::Menu => ([220.0, 262.0, 330.0, 262.0], 1.0),
            MusicTrack::Ground => ([196.0, 220.0, 262.0, 294.0], 1.2),
            MusicTrack::Estate => ([110.0, 147.0, 185.0, 147.0], 0.8),
            MusicTrack::Tunnels => ([98.0, 123.0, 147.0, 185.0], 0.6),
            MusicTrack::Harbor => ([262.0, 330.0, 392.0, 523.0], 1.5),
            MusicTrack::Combat => ([196.0, 233.0, 277.0, 311.0], 1.8),
            MusicTrack::Victory => ([330.0, 392.0, 494.0, 587.0], 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Gunshot,
    Footstep,
    Pickup,
    Door,
    Hurt,
    GuardAlert,
}

impl SoundEffect {
    pub fn all() -> &'static [SoundEffect] {
        &[
            SoundEffect::Gunshot,
            SoundEffect::Footstep,
            SoundEffect::Pickup,
            SoundEffect::Door,
            SoundEffect::Hurt,
            SoundEffect::GuardAlert,
        ]
    }

    pub fn duration(&self) -> f32 {
        match self {
            SoundEffect::Gunshot => 0.3,
            SoundEffect::Footstep => 0.1,
            SoundEffect::Pickup => 0.15,
            SoundEffect::Door => 0.3,
            SoundEffect::Hurt => 0.4,
            SoundEffect::GuardAlert => 0.25,
        }
    }
}

fn clamp_sample(value: f32) -> i16 {
    value.clamp(-32767.0, 32767.0) as i16
}

fn sample_count(seconds: f32) -> usize {
    (SAMPLE_RATE as f32 * seconds) as usize
}

/// Deterministic noise in [-1, 1).
fn noise(seed: u64, index: usize) -> f32 {
    let mut h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(index as u64);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    (h % 20_000) as f32 / 10_000.0 - 1.0
}

/// A seamless-ish loop for one music track.
pub fn synthesize_music(track: MusicTrack) -> Vec<i16> {
    let (notes, tempo) = track.motif();
    (0..sample_count(LOOP_SECONDS))
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let idx = ((t * tempo) % notes.len() as f32) as usize;
            let note = notes[idx.min(notes.len() - 1)];
            let wave = (TAU * note * t).sin() * 0.4
                + (TAU * note * 2.0 * t).sin() * 0.2
                + (TAU * note * 0.5 * t).sin() * 0.1;
            let envelope = 0.5 + 0.2 * (TAU * 0.3 * t).sin();
            let tremolo = 0.8 + 0.1 * (TAU * 4.0 * t).sin();
            clamp_sample(wave * envelope * tremolo * 8000.0)
        })
        .collect()
}

/// One-shot effect. `seed` only affects the noise-based effects.
pub fn synthesize_effect(effect: SoundEffect, seed: u64) -> Vec<i16> {
    (0..sample_count(effect.duration()))
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let value = match effect {
                SoundEffect::Gunshot => noise(seed, i) * (-t * 20.0).exp() * 20_000.0,
                SoundEffect::Footstep => noise(seed, i) * (-t * 30.0).exp() * 10_000.0,
                SoundEffect::Door => noise(seed, i) * (-t * 8.0).exp() * 15_000.0,
                SoundEffect::Hurt => {
                    let freq = 200.0 * (-t * 5.0).exp();
                    let wave = (TAU * freq * t).sin() * 0.5 + (TAU * freq * 1.5 * t).sin() * 0.3;
                    wave * (-t * 8.0).exp() * 25_000.0
                }
                SoundEffect::Pickup => {
                    let freq = 440.0 * (1.0 + t * 10.0);
                    (TAU * freq * t).sin() * (-t * 10.0).exp() * 12_000.0
                }
                SoundEffect::GuardAlert => {
                    let freq = 440.0 * (1.0 + t * 15.0);
                    (TAU * freq * t).sin() * 0.5 * (-t * 5.0).exp() * 15_000.0
                }
            };
            clamp_sample(value)
        })
        .collect()
}

/// Wrap samples in a 16-bit mono PCM RIFF container.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Picks the music for the current situation and tracks mixer volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicDirector {
    current: Option<MusicTrack>,
    music_volume: f32,
    sfx_volume: f32,
    duck_timer: f32,
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self {
            current: None,
            music_volume: MUSIC_VOLUME,
            sfx_volume: SFX_VOLUME,
            duck_timer: 0.0,
        }
    }
}

impl MusicDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<MusicTrack> {
        self.current
    }

    /// Combat overrides the zone; no zone means the menu.
    ///
    /// Returns the track to start, or `None` if it is already playing.
    pub fn select(&mut self, zone: Option<Zone>, combat: bool) -> Option<MusicTrack> {
        let track = if combat {
            MusicTrack::Combat
        } else {
            zone.map(MusicTrack::for_zone).unwrap_or(MusicTrack::Menu)
        };
        self.request(track)
    }

    /// Switch to `track` unless it is already playing.
    pub fn request(&mut self, track: MusicTrack) -> Option<MusicTrack> {
        if self.current == Some(track) {
            return None;
        }
        self.current = Some(track);
        Some(track)
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    /// Effective music volume, lowered while a gunshot is ringing.
    pub fn music_volume(&self) -> f32 {
        if self.duck_timer > 0.0 {
            DUCKED_VOLUME.min(self.music_volume)
        } else {
            self.music_volume
        }
    }

    pub fn effect_volume(&self, effect: SoundEffect, priority: bool) -> f32 {
        if priority || effect == SoundEffect::Hurt {
            PRIORITY_VOLUME
        } else {
            self.sfx_volume
        }
    }

    /// Volume for an effect about to play; gunshots start the duck.
    pub fn trigger(&mut self, effect: SoundEffect, priority: bool) -> f32 {
        if effect == SoundEffect::Gunshot {
            self.duck_timer = DUCK_SECONDS;
        }
        self.effect_volume(effect, priority)
    }

    pub fn tick(&mut self, dt: f32) {
        if self.duck_timer > 0.0 {
            self.duck_timer = (self.duck_timer - dt).max(0.0);
        }
    }

    pub fn is_ducked(&self) -> bool {
        self.duck_timer > 0.0
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }
}
