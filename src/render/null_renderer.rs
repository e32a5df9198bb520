use crate::core::{Bar, VisibleRange};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content and projects candles so tests can catch
/// invalid geometry before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_visible: Option<VisibleRange>,
    pub last_candle_count: usize,
    pub last_hovered: Option<Bar>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.last_candle_count = frame.candles()?.len();
        self.last_visible = frame.visible;
        self.last_hovered = frame.hovered;
        self.frames_rendered += 1;
        Ok(())
    }
}
