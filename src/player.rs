//! Simulated audio player.
//!
//! There is no real audio: [`PlayerState`] advances one second per tick while
//! playing and resets itself when the track runs out. [`ProgressTicker`] is
//! the cancellable periodic task that produces those ticks. Neither knows
//! anything about the episode filter.

use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 45:23, the length of the featured episode.
pub const DEFAULT_TRACK_SECS: u32 = 2723;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused; nothing changed.
    Idle,
    /// Moved forward one second.
    Advanced,
    /// Reached the end: position back to zero and playback stopped.
    Finished,
}

/// Play/pause flag and position of the simulated track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    is_playing: bool,
    current_secs: u32,
    total_secs: u32,
    /// Episode most recently requested via [`PlayerState::play_episode`].
    episode_id: Option<u32>,
}

impl PlayerState {
    pub fn new(total_secs: u32) -> Self {
        Self {
            is_playing: false,
            current_secs: 0,
            total_secs,
            episode_id: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_secs(&self) -> u32 {
        self.current_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn episode_id(&self) -> Option<u32> {
        self.episode_id
    }

    /// Flip between playing and paused. Returns the new playing flag.
    pub fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        debug!(
            "player {} at {}",
            if self.is_playing { "playing" } else { "paused" },
            self.clock()
        );
        self.is_playing
    }

    /// Remember which episode was asked for, then toggle playback.
    pub fn play_episode(&mut self, id: u32) -> bool {
        info!("Playing episode {}", id);
        self.episode_id = Some(id);
        self.toggle()
    }

    /// Advance the simulation by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.current_secs >= self.total_secs {
            self.current_secs = 0;
            self.is_playing = false;
            debug!("track finished, reset to 0:00");
            TickOutcome::Finished
        } else if self.is_playing {
            self.current_secs += 1;
            TickOutcome::Advanced
        } else {
            TickOutcome::Idle
        }
    }

    /// Position as a percentage of the track, 0.0 for an empty track.
    pub fn progress_percent(&self) -> f64 {
        if self.total_secs == 0 {
            0.0
        } else {
            f64::from(self.current_secs) / f64::from(self.total_secs) * 100.0
        }
    }

    /// Current position as `m:ss`.
    pub fn clock(&self) -> String {
        format_clock(self.current_secs)
    }

    /// Track length as `m:ss`.
    pub fn total_clock(&self) -> String {
        format_clock(self.total_secs)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_SECS)
    }
}

/// Format seconds as `m:ss`.
///
/// # Examples
///
/// ```
/// use beyond_consent::player::format_clock;
///
/// assert_eq!(format_clock(0), "0:00");
/// assert_eq!(format_clock(2723), "45:23");
/// ```
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Periodic tick source running on the tokio runtime.
///
/// Each period one `()` is sent on the channel returned by
/// [`ProgressTicker::start`]. The task ends when stopped, dropped, or when
/// the receiver goes away.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawn the ticker. The first tick arrives one full period after start.
    pub fn start(period: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        debug!("progress ticker started ({:?})", period);
        (Self { handle }, rx)
    }

    /// Cancel the task.
    pub fn stop(self) {
        self.handle.abort();
        debug!("progress ticker stopped");
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Player state plus the ticker that drives it while playing.
pub struct ProgressSimulator {
    state: PlayerState,
    period: Duration,
    ticker: Option<(ProgressTicker, mpsc::UnboundedReceiver<()>)>,
}

impl ProgressSimulator {
    pub fn new(total_secs: u32, period: Duration) -> Self {
        Self {
            state: PlayerState::new(total_secs),
            period,
            ticker: None,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Toggle playback, starting or cancelling the ticker to match.
    /// Must be called from within a tokio runtime.
    pub fn toggle(&mut self) -> bool {
        let playing = self.state.toggle();
        self.sync_ticker();
        playing
    }

    /// Select an episode and toggle playback.
    pub fn play_episode(&mut self, id: u32) -> bool {
        let playing = self.state.play_episode(id);
        self.sync_ticker();
        playing
    }

    /// Apply every tick that has arrived since the last call.
    /// Returns the last outcome, or `Idle` if no tick was pending.
    pub fn drain_ticks(&mut self) -> TickOutcome {
        let mut pending = 0usize;
        if let Some((_, rx)) = self.ticker.as_mut() {
            while rx.try_recv().is_ok() {
                pending += 1;
            }
        }

        let mut last = TickOutcome::Idle;
        for _ in 0..pending {
            last = self.state.tick();
            if last == TickOutcome::Finished {
                break;
            }
        }
        if last == TickOutcome::Finished {
            self.sync_ticker();
        }
        last
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn sync_ticker(&mut self) {
        if self.state.is_playing() {
            if self.ticker.is_none() {
                self.ticker = Some(ProgressTicker::start(self.period));
            }
        } else if let Some((ticker, _)) = self.ticker.take() {
            ticker.stop();
        }
    }
}
