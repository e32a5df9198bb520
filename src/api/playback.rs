use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Bar, BarAggregator, Timeframe, aggregate_timeframe};
use crate::error::{ChartError, ChartResult};

use super::Viewport;

/// Replay pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Native bars revealed per step.
    #[serde(default = "default_tick_increment")]
    pub tick_increment: usize,
    /// Seconds between automatic steps while playing.
    #[serde(default = "default_tick_delay_secs")]
    pub tick_delay_secs: f64,
    /// Keeps the newest bar on screen and refits price to the visible bars
    /// after every step.
    #[serde(default = "default_true")]
    pub follow_latest: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_increment: default_tick_increment(),
            tick_delay_secs: default_tick_delay_secs(),
            follow_latest: true,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if self.tick_increment == 0 {
            return Err(ChartError::InvalidData(
                "playback tick increment must be > 0".to_owned(),
            ));
        }
        if !self.tick_delay_secs.is_finite() || self.tick_delay_secs <= 0.0 {
            return Err(ChartError::InvalidData(
                "playback tick delay must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Paused,
    Playing,
    /// Every source bar has been revealed.
    Finished,
}

/// Bar-by-bar replay of a native series into a [`Viewport`].
///
/// History before the start index is loaded in one go; later bars are fed
/// through a streaming aggregator so the open bucket grows in place.
#[derive(Debug, Clone)]
pub struct Playback {
    source: Vec<Bar>,
    timeframe: Timeframe,
    config: PlaybackConfig,
    aggregator: BarAggregator,
    start_index: usize,
    position: usize,
    state: PlaybackState,
    elapsed_secs: f64,
}

impl Playback {
    pub fn new(source: Vec<Bar>, timeframe: Timeframe, config: PlaybackConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            timeframe,
            config,
            aggregator: BarAggregator::new(timeframe),
            start_index: 0,
            position: 0,
            state: PlaybackState::Paused,
            elapsed_secs: 0.0,
        })
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of source bars revealed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Loads `source[..start_index]` into `viewport` and pauses there.
    pub fn start_at(&mut self, start_index: usize, viewport: &mut Viewport) -> ChartResult<()> {
        let start_index = start_index.min(self.source.len());
        let history = &self.source[..start_index];

        self.aggregator.reset();
        for bar in history {
            self.aggregator.push(*bar);
        }
        viewport.load_bars_with_interval(
            aggregate_timeframe(history, self.timeframe),
            self.timeframe.bucket_seconds(),
        )?;
        viewport.scroll_to_latest()?;

        self.start_index = start_index;
        self.position = start_index;
        self.elapsed_secs = 0.0;
        self.state = if self.remaining() == 0 {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        debug!(start_index, total = self.source.len(), "playback positioned");
        Ok(())
    }

    /// Rewinds to the last start index.
    pub fn reset(&mut self, viewport: &mut Viewport) -> ChartResult<()> {
        self.start_at(self.start_index, viewport)
    }

    pub fn play(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Reveals up to `tick_increment` bars and returns how many were revealed.
    pub fn step(&mut self, viewport: &mut Viewport) -> ChartResult<usize> {
        let end = (self.position + self.config.tick_increment).min(self.source.len());
        let revealed = end - self.position;

        for bar in &self.source[self.position..end] {
            let update = self.aggregator.push(*bar);
            viewport.push_bar(update.bar())?;
        }
        self.position = end;

        if revealed > 0 && self.config.follow_latest {
            self.follow(viewport)?;
        }
        if self.remaining() == 0 {
            self.state = PlaybackState::Finished;
            debug!(position = self.position, "playback finished");
        }
        Ok(revealed)
    }

    /// Advances the playback clock by `elapsed_secs`, stepping once per
    /// elapsed tick delay while playing.
    pub fn advance(&mut self, elapsed_secs: f64, viewport: &mut Viewport) -> ChartResult<usize> {
        if self.state != PlaybackState::Playing {
            return Ok(0);
        }
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            return Err(ChartError::InvalidData(
                "playback elapsed time must be finite and >= 0".to_owned(),
            ));
        }

        self.elapsed_secs += elapsed_secs;
        let mut revealed = 0;
        while self.state == PlaybackState::Playing && self.elapsed_secs >= self.config.tick_delay_secs
        {
            self.elapsed_secs -= self.config.tick_delay_secs;
            revealed += self.step(viewport)?;
        }
        Ok(revealed)
    }

    fn follow(&self, viewport: &mut Viewport) -> ChartResult<()> {
        let Some(last) = viewport.last_bar() else {
            return Ok(());
        };
        let end = (last.timestamp + viewport.bar_interval_secs()) as f64;
        let time_axis = viewport.time_axis();
        if time_axis.to_pixel(end) > f64::from(time_axis.pixel_length()) {
            viewport.scroll_to_latest()?;
        }
        viewport.fit_price_to_visible()
    }
}

fn default_tick_increment() -> usize {
    1
}

fn default_tick_delay_secs() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}
