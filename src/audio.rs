//! Sound cues
//!
//! The round only records `GameEvent`s; this module turns them into cues for
//! whatever playback backend sits behind an `AudioSink`.

use crate::sim::{GameEvent, Outcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bomb dropped, fuse lit
    FuseLit,
    /// Bomb detonates (once per bomb)
    Explosion,
    /// Enemy caught in a blast
    EnemyDown,
    /// Round won
    Victory,
    /// Round lost
    GameOver,
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Menu,
    InGame,
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Start a looping track, replacing whatever is playing
    fn play_music(&mut self, music: Music);
    fn stop_music(&mut self);
}

/// Cue for a round event, if it has one
pub fn sound_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::BombPlaced { .. } => Some(SoundEffect::FuseLit),
        GameEvent::BombDetonated { .. } => Some(SoundEffect::Explosion),
        GameEvent::WallsDestroyed { .. } => None,
        GameEvent::EnemyEliminated { .. } => Some(SoundEffect::EnemyDown),
        GameEvent::RoundOver {
            outcome: Outcome::Victory,
            ..
        } => Some(SoundEffect::Victory),
        GameEvent::RoundOver { .. } => Some(SoundEffect::GameOver),
    }
}

/// Sink that only logs cues; used by the headless binary
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    current: Option<Music>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_music(&self) -> Option<Music> {
        self.current
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            log::debug!("sfx {effect:?}");
        }
    }

    fn play_music(&mut self, music: Music) {
        if self.current == Some(music) {
            return;
        }
        self.current = Some(music);
        if !self.muted {
            log::debug!("music {music:?}");
        }
    }

    fn stop_music(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cues() {
        assert_eq!(
            sound_for_event(&GameEvent::BombDetonated { bomb_id: 1 }),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            sound_for_event(&GameEvent::WallsDestroyed { count: 2, points: 100 }),
            None
        );
        assert_eq!(
            sound_for_event(&GameEvent::RoundOver {
                outcome: Outcome::Victory,
                final_score: 10
            }),
            Some(SoundEffect::Victory)
        );
        assert_eq!(
            sound_for_event(&GameEvent::RoundOver {
                outcome: Outcome::CaughtInBlast,
                final_score: 10
            }),
            Some(SoundEffect::GameOver)
        );
    }

    #[test]
    fn test_log_audio_tracks_music() {
        let mut audio = LogAudio::new();
        audio.play_music(Music::Menu);
        assert_eq!(audio.current_music(), Some(Music::Menu));
        audio.play_music(Music::InGame);
        assert_eq!(audio.current_music(), Some(Music::InGame));
        audio.stop_music();
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn test_muted_sink_still_tracks_music() {
        let mut audio = LogAudio::new();
        audio.set_muted(true);
        assert!(audio.is_muted());
        audio.play(SoundEffect::Explosion);
        audio.play_music(Music::InGame);
        assert_eq!(audio.current_music(), Some(Music::InGame));
    }
}
