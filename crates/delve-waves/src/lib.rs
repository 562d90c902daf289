//! Challenge-room wave encounters.
//!
//! A challenge room runs a fixed number of enemy waves. Each wave is
//! released only after the previous one has been cleared, and the room's
//! reward is released exactly once, when the last wave falls.
//!
//! The crate is split in two halves:
//!
//! - [`WavePlan::roll`] decides *what* spawns: one list of enemy prefabs
//!   and spawn offsets per wave. This is pure and seeded by the caller's RNG.
//! - [`ChallengeController`] is the state machine that plays a plan out:
//!   `Idle → Running { wave } → Completed`. It never touches the world; it
//!   returns [`WaveEvent`]s and the caller spawns and rewards accordingly.
//!
//! ```ignore
//! let plan = WavePlan::roll(&WaveConfig::default(), &pool, dims, &mut rng)?;
//! let mut challenge = ChallengeController::new(plan, Some(reward));
//! for event in challenge.start()? {
//!     world.apply(event);
//! }
//! // ...every time an enemy from the current wave dies:
//! for event in challenge.enemy_defeated()? {
//!     world.apply(event);
//! }
//! ```

use std::fmt;

use delve_grid::{PrefabId, WorldPos};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How many waves a challenge room runs and how large they grow.
///
/// Wave `i` (0-based) spawns `base_enemies + i * enemies_per_wave`
/// enemies, so the defaults give 3, 5, 7.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Number of waves. 0 completes the challenge as soon as it starts.
    pub waves: u32,
    /// Enemies in the first wave.
    pub base_enemies: u32,
    /// Extra enemies added by each subsequent wave.
    pub enemies_per_wave: u32,
    /// Spawn offsets stay within `±spawn_extent` of the room's width and
    /// height around its centre. Default: 0.4, which keeps spawns off the
    /// walls.
    pub spawn_extent: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            waves: 3,
            base_enemies: 3,
            enemies_per_wave: 2,
            spawn_extent: 0.4,
        }
    }
}

impl WaveConfig {
    /// Cap on waves per challenge.
    pub const MAX_WAVES: u32 = 32;

    /// Clamp any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`WavePlan::roll`]. Rules:
    /// - `waves` capped to [`Self::MAX_WAVES`].
    /// - `spawn_extent` clamped to `0.0..=0.5` (NaN becomes 0).
    pub fn validated(mut self) -> Self {
        if self.waves > Self::MAX_WAVES {
            warn!(
                waves = self.waves,
                max = Self::MAX_WAVES,
                "wave count exceeds maximum, clamping"
            );
            self.waves = Self::MAX_WAVES;
        }
        self.spawn_extent = if self.spawn_extent.is_nan() {
            0.0
        } else {
            self.spawn_extent.clamp(0.0, 0.5)
        };
        self
    }

    /// Enemy count of wave `index` (0-based).
    pub fn enemies_in_wave(&self, index: u32) -> u32 {
        self.base_enemies
            .saturating_add(index.saturating_mul(self.enemies_per_wave))
    }
}

/// Interior size of a room in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f32,
    pub height: f32,
}

impl RoomDimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self::new(16.0, 9.0)
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One enemy to spawn, relative to the room centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpawn {
    pub prefab: PrefabId,
    pub offset: WorldPos,
}

/// Every spawn of every wave, decided up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WavePlan {
    waves: Vec<Vec<WaveSpawn>>,
}

impl WavePlan {
    /// Rolls a plan: for each wave, `enemies_in_wave(i)` prefabs drawn
    /// uniformly (with replacement) from `pool`, each at a random offset
    /// inside the room.
    ///
    /// # Errors
    /// [`WaveError::EmptyPool`] if a wave needs enemies and `pool` is empty.
    pub fn roll<R: Rng + ?Sized>(
        config: &WaveConfig,
        pool: &[PrefabId],
        room: RoomDimensions,
        rng: &mut R,
    ) -> Result<Self, WaveError> {
        let config = config.validated();
        let half_w = (room.width.abs() * config.spawn_extent).max(0.0);
        let half_h = (room.height.abs() * config.spawn_extent).max(0.0);

        let mut waves = Vec::with_capacity(config.waves as usize);
        for index in 0..config.waves {
            let count = config.enemies_in_wave(index);
            let mut spawns = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let prefab = pool.choose(rng).ok_or(WaveError::EmptyPool)?;
                let offset = WorldPos {
                    x: rng.random_range(-half_w..=half_w),
                    y: rng.random_range(-half_h..=half_h),
                };
                spawns.push(WaveSpawn {
                    prefab: prefab.clone(),
                    offset,
                });
            }
            waves.push(spawns);
        }
        debug!(waves = waves.len(), "wave plan rolled");
        Ok(Self { waves })
    }

    /// Builds a plan from explicit waves (tests, hand-authored encounters).
    pub fn from_waves(waves: Vec<Vec<WaveSpawn>>) -> Self {
        Self { waves }
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Spawns of wave `index` (0-based).
    pub fn wave(&self, index: usize) -> Option<&[WaveSpawn]> {
        self.waves.get(index).map(Vec::as_slice)
    }

    /// Enemies across all waves.
    pub fn total_enemies(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveError {
    #[error("no enemy prefabs to draw waves from")]
    EmptyPool,

    #[error("challenge already started (state: {0})")]
    AlreadyStarted(ChallengeState),

    #[error("no wave is running (state: {0})")]
    NotRunning(ChallengeState),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Lifecycle of a challenge room.
///
/// ```text
/// Idle ──start──▶ Running { wave: 1 } ──clear──▶ Running { wave: 2 } ── … ──▶ Completed
/// ```
///
/// `wave` is 1-based, matching what a player is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeState {
    Idle,
    Running { wave: usize },
    Completed,
}

impl fmt::Display for ChallengeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running { wave } => write!(f, "Running(wave {wave})"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// What the caller should do in the world after a controller call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaveEvent {
    /// Spawn these enemies. `wave` is 1-based.
    WaveStarted {
        wave: usize,
        total: usize,
        spawns: Vec<WaveSpawn>,
    },
    /// Every wave is cleared; hand out the reward.
    ChallengeCompleted { reward: Option<PrefabId> },
}

/// Plays a [`WavePlan`] out one defeated enemy at a time.
#[derive(Debug, Clone)]
pub struct ChallengeController {
    plan: WavePlan,
    reward: Option<PrefabId>,
    state: ChallengeState,
    remaining: usize,
}

impl ChallengeController {
    pub fn new(plan: WavePlan, reward: Option<PrefabId>) -> Self {
        Self {
            plan,
            reward,
            state: ChallengeState::Idle,
            remaining: 0,
        }
    }

    /// Releases the first wave.
    ///
    /// A plan with no waves completes immediately.
    ///
    /// # Errors
    /// [`WaveError::AlreadyStarted`] unless the challenge is `Idle`.
    pub fn start(&mut self) -> Result<Vec<WaveEvent>, WaveError> {
        if self.state != ChallengeState::Idle {
            return Err(WaveError::AlreadyStarted(self.state));
        }
        info!(waves = self.plan.wave_count(), "challenge started");
        let mut events = Vec::new();
        self.open_wave(0, &mut events);
        Ok(events)
    }

    /// Records one defeated enemy of the current wave. Clearing a wave
    /// releases the next one; clearing the last releases the reward.
    ///
    /// # Errors
    /// [`WaveError::NotRunning`] unless a wave is in progress.
    pub fn enemy_defeated(&mut self) -> Result<Vec<WaveEvent>, WaveError> {
        let ChallengeState::Running { wave } = self.state else {
            return Err(WaveError::NotRunning(self.state));
        };
        self.remaining = self.remaining.saturating_sub(1);
        let mut events = Vec::new();
        if self.remaining == 0 {
            debug!(wave, "wave cleared");
            // `wave` is 1-based, so it is also the index of the next wave.
            self.open_wave(wave, &mut events);
        }
        Ok(events)
    }

    /// Starts wave `index`, skipping straight past empty waves, or
    /// completes the challenge when `index` is past the last wave.
    fn open_wave(&mut self, mut index: usize, events: &mut Vec<WaveEvent>) {
        let total = self.plan.wave_count();
        while let Some(spawns) = self.plan.wave(index) {
            let wave = index + 1;
            debug!(wave, total, enemies = spawns.len(), "wave started");
            events.push(WaveEvent::WaveStarted {
                wave,
                total,
                spawns: spawns.to_vec(),
            });
            if !spawns.is_empty() {
                self.state = ChallengeState::Running { wave };
                self.remaining = spawns.len();
                return;
            }
            index += 1;
        }

        self.state = ChallengeState::Completed;
        self.remaining = 0;
        let reward = self.reward.take();
        info!(reward = ?reward, "challenge completed");
        events.push(WaveEvent::ChallengeCompleted { reward });
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == ChallengeState::Completed
    }

    /// Current wave (1-based) while running.
    pub fn current_wave(&self) -> Option<usize> {
        match self.state {
            ChallengeState::Running { wave } => Some(wave),
            _ => None,
        }
    }

    /// Enemies of the current wave still alive.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn total_waves(&self) -> usize {
        self.plan.wave_count()
    }

    pub fn plan(&self) -> &WavePlan {
        &self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemies_grow_per_wave() {
        let cfg = WaveConfig::default();
        assert_eq!(cfg.enemies_in_wave(0), 3);
        assert_eq!(cfg.enemies_in_wave(1), 5);
        assert_eq!(cfg.enemies_in_wave(2), 7);
    }

    #[test]
    fn test_validated_clamps() {
        let cfg = WaveConfig {
            waves: 1_000,
            spawn_extent: 3.0,
            ..WaveConfig::default()
        }
        .validated();
        assert_eq!(cfg.waves, WaveConfig::MAX_WAVES);
        assert_eq!(cfg.spawn_extent, 0.5);

        let cfg = WaveConfig {
            spawn_extent: f32::NAN,
            ..WaveConfig::default()
        }
        .validated();
        assert_eq!(cfg.spawn_extent, 0.0);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ChallengeState::Idle.to_string(), "Idle");
        assert_eq!(ChallengeState::Running { wave: 2 }.to_string(), "Running(wave 2)");
        assert_eq!(ChallengeState::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_error_display() {
        let err = WaveError::NotRunning(ChallengeState::Idle);
        assert_eq!(err.to_string(), "no wave is running (state: Idle)");
    }
}
