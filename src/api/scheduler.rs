use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{SharedViewport, Viewport};

/// Result of one display-refresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// Nothing changed since the last repaint.
    Idle,
    Rendered,
    /// The backend reported an error; the loop keeps running.
    BackendFailed,
    /// The scheduler was torn down; no work was done.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub ticks: u64,
    pub rendered: u64,
    pub idle: u64,
    pub failed: u64,
}

/// Repaint loop driver.
///
/// The host calls [`Self::on_frame`] once per display refresh. A frame is
/// drawn only when the viewport's dirty flag was set, and the flag is
/// consumed exactly once per repaint. Backend errors are recorded and never
/// propagated, so a failing draw cannot stop the loop.
#[derive(Debug)]
pub struct RenderScheduler<R: Renderer> {
    renderer: R,
    running: bool,
    stats: FrameStats,
}

impl<R: Renderer> RenderScheduler<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            running: true,
            stats: FrameStats::default(),
        }
    }

    pub fn on_frame(&mut self, viewport: &mut Viewport) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        self.stats.ticks += 1;
        if !viewport.consume_dirty() {
            self.stats.idle += 1;
            trace!("frame idle");
            return FrameOutcome::Idle;
        }
        self.draw(viewport)
    }

    /// Same as [`Self::on_frame`] for a viewport shared with input handlers.
    pub fn on_shared_frame(&mut self, shared: &SharedViewport) -> ChartResult<FrameOutcome> {
        shared.with_mut(|viewport| self.on_frame(viewport))
    }

    /// Stops the loop; later ticks return [`FrameOutcome::Stopped`].
    pub fn teardown(&mut self) {
        if self.running {
            debug!(
                rendered = self.stats.rendered,
                failed = self.stats.failed,
                "render scheduler torn down"
            );
        }
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn draw(&mut self, viewport: &Viewport) -> FrameOutcome {
        let frame = viewport.frame();
        match self.renderer.render(&frame) {
            Ok(()) => {
                self.stats.rendered += 1;
                FrameOutcome::Rendered
            }
            Err(err) => {
                self.stats.failed += 1;
                warn!(error = %err, "render backend failed; keeping loop alive");
                FrameOutcome::BackendFailed
            }
        }
    }
}
