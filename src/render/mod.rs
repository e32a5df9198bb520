mod frame;
mod null_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a read-only `RenderFrame` so drawing code stays isolated
/// from viewport state and interaction logic. Errors are reported back to the
/// scheduler, which records them without tearing the loop down.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()>;
}
