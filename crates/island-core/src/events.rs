//! Outgoing notifications for the front end: sounds, banner text, phase changes.

use island_logic::audio::SoundEffect;
use island_logic::zones::Zone;
use serde::{Deserialize, Serialize};

/// A sound the front end should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Gunshot,
    Footstep,
    Pickup,
    Door,
    Hurt,
    GuardAlert,
    /// Switches to the victory fanfare rather than a one-shot
    Victory,
}

impl SoundCue {
    pub fn effect(&self) -> Option<SoundEffect> {
        match self {
            SoundCue::Gunshot => Some(SoundEffect::Gunshot),
            SoundCue::Footstep => Some(SoundEffect::Footstep),
            SoundCue::Pickup => Some(SoundEffect::Pickup),
            SoundCue::Door => Some(SoundEffect::Door),
            SoundCue::Hurt => Some(SoundEffect::Hurt),
            SoundCue::GuardAlert => Some(SoundEffect::GuardAlert),
            SoundCue::Victory => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound { cue: SoundCue, priority: bool },
    Message(String),
    ZoneEntered(Zone),
    Victory,
    Defeat,
}

/// Banner text with a countdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBoard {
    text: String,
    remaining: f32,
}

impl MessageBoard {
    pub fn post(&mut self, text: impl Into<String>, seconds: f32) {
        self.text = text.into();
        self.remaining = seconds;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Text to show, if the countdown is still running.
    pub fn current(&self) -> Option<&str> {
        if self.remaining > 0.0 {
            Some(&self.text)
        } else {
            None
        }
    }

    /// Most recent text regardless of expiry.
    pub fn last(&self) -> &str {
        &self.text
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let mut board = MessageBoard::default();
        assert_eq!(board.current(), None);
        board.post("Entered Estate", 2.0);
        board.tick(1.5);
        assert_eq!(board.current(), Some("Entered Estate"));
        board.tick(1.0);
        assert_eq!(board.current(), None);
        assert_eq!(board.last(), "Entered Estate");
    }

    #[test]
    fn test_victory_has_no_effect_clip() {
        assert_eq!(SoundCue::Victory.effect(), None);
        assert_eq!(SoundCue::Hurt.effect(), Some(SoundEffect::Hurt));
    }
}
