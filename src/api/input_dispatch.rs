use tracing::trace;

use crate::error::ChartResult;
use crate::interaction::{ChartRegion, DragTarget, InputEvent};

use super::{InteractionBehavior, Viewport};

/// Routes normalized host input to viewport mutators.
///
/// - wheel over the plot or time strip zooms time at the pointer
/// - wheel over the price strip zooms price at the pointer
/// - drags start on the region they were pressed in and stay routed there
/// - pointer moves over the plot drive the crosshair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn dispatch(
        viewport: &mut Viewport,
        region: ChartRegion,
        event: InputEvent,
    ) -> ChartResult<()> {
        let behavior = viewport.config().interaction;
        trace!(?region, ?event, "dispatch input");
        match event {
            InputEvent::Wheel { x, y, delta_y } => {
                if delta_y == 0.0 || !delta_y.is_finite() {
                    return Ok(());
                }
                match region {
                    ChartRegion::Plot | ChartRegion::TimeAxis => viewport.zoom_time_at(
                        x,
                        InteractionBehavior::wheel_zoom_factor(behavior.time_wheel_zoom_step, delta_y),
                    ),
                    ChartRegion::PriceAxis => viewport.zoom_price_at(
                        y,
                        InteractionBehavior::wheel_zoom_factor(
                            behavior.price_wheel_zoom_step,
                            delta_y,
                        ),
                    ),
                }
            }
            InputEvent::DragStart { x, y } => {
                let target = match region {
                    ChartRegion::Plot => DragTarget::Plot,
                    ChartRegion::PriceAxis => DragTarget::PriceAxis(behavior.price_axis_drag),
                    ChartRegion::TimeAxis => DragTarget::TimeAxis(behavior.time_axis_drag),
                };
                viewport.begin_drag_on(target, x, y)
            }
            InputEvent::DragMove { x, y } => viewport.continue_drag(x, y),
            InputEvent::DragEnd => {
                viewport.end_drag();
                Ok(())
            }
            InputEvent::PointerMove { x, y } => match region {
                ChartRegion::Plot => viewport.set_cursor(x, y),
                ChartRegion::PriceAxis | ChartRegion::TimeAxis => {
                    viewport.clear_cursor();
                    Ok(())
                }
            },
            InputEvent::PointerLeave => {
                viewport.end_drag();
                viewport.clear_cursor();
                Ok(())
            }
        }
    }
}
