//! Audio vocabulary and the music rotation.
//!
//! The core never touches an audio device.  It enqueues
//! [`AudioRequest`] values; the frontend drains them into whatever sink
//! it has and reports track-end back by polling once per frame.

use rand::Rng;
use tracing::warn;

/// A music track the frontend can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackId {
    Gameplay1,
    Gameplay2,
    Gameplay3,
    GameOver,
}

impl TrackId {
    /// File the frontend should load for this track.
    pub fn file_name(self) -> &'static str {
        match self {
            TrackId::Gameplay1 => "music1.mp3",
            TrackId::Gameplay2 => "music2.mp3",
            TrackId::Gameplay3 => "music3.mp3",
            TrackId::GameOver => "gameover.mp3",
        }
    }
}

/// The rotation pool.  The game-over track sits outside it.
pub const GAMEPLAY_TRACKS: [TrackId; 3] =
    [TrackId::Gameplay1, TrackId::Gameplay2, TrackId::Gameplay3];

/// One-shot effects tied to game events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    MenuBlip,
    SelectLetter,
    StartGame,
    EatFruit,
    PowerUp,
    Die,
    OutOfLives,
    LevelUp,
}

/// Outbound request to the frontend's audio sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRequest {
    PlayTrack(TrackId),
    PlayEffect(SoundEffect),
}

/// Picks gameplay tracks at random without immediate repeats.
#[derive(Debug)]
pub struct MusicSequencer {
    pool: Vec<TrackId>,
    last: Option<TrackId>,
    /// While suspended (game-over music is playing) track-end polls do
    /// not restart the rotation.
    suspended: bool,
}

impl MusicSequencer {
    pub fn new() -> Self {
        Self {
            pool: GAMEPLAY_TRACKS.to_vec(),
            last: None,
            suspended: false,
        }
    }

    pub fn last_played(&self) -> Option<TrackId> {
        self.last
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Choose the next track uniformly from the pool, never repeating
    /// the previous pick while more than one track remains.  `None`
    /// once every track has been dropped as unavailable.
    pub fn pick_next(&mut self, rng: &mut impl Rng) -> Option<TrackId> {
        if self.pool.is_empty() {
            return None;
        }
        let candidates: Vec<TrackId> = if self.pool.len() > 1 {
            self.pool
                .iter()
                .copied()
                .filter(|t| Some(*t) != self.last)
                .collect()
        } else {
            self.pool.clone()
        };
        let choice = candidates[rng.gen_range(0..candidates.len())];
        self.last = Some(choice);
        Some(choice)
    }

    /// Track-end poll: advance the rotation unless suspended.
    pub fn on_track_finished(&mut self, rng: &mut impl Rng) -> Option<TrackId> {
        if self.suspended {
            return None;
        }
        self.pick_next(rng)
    }

    /// The frontend could not play `track`.  Drop it from the pool and
    /// pick a replacement; music dies quietly when nothing is left.
    pub fn on_track_unavailable(
        &mut self,
        track: TrackId,
        rng: &mut impl Rng,
    ) -> Option<TrackId> {
        warn!(track = track.file_name(), "music track unavailable, skipping");
        self.pool.retain(|t| *t != track);
        if self.last == Some(track) {
            self.last = None;
        }
        self.pick_next(rng)
    }

    /// Hold the rotation while a track outside it (game over) plays.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }
}

impl Default for MusicSequencer {
    fn default() -> Self {
        Self::new()
    }
}
