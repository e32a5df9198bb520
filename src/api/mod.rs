mod axis_labels;
mod behavior;
mod config;
mod data_controller;
mod hit_test;
mod input_dispatch;
mod interaction_controller;
mod playback;
mod scheduler;
mod session;
mod shared;
mod snapshot;
mod viewport;

pub use axis_labels::AxisTick;
pub use behavior::InteractionBehavior;
pub use config::ViewportConfig;
pub use hit_test::CrosshairReadout;
pub use input_dispatch::InputDispatcher;
pub use playback::{Playback, PlaybackConfig, PlaybackState};
pub use scheduler::{FrameOutcome, FrameStats, RenderScheduler};
pub use session::ChartSession;
pub use shared::SharedViewport;
pub use snapshot::ViewportSnapshot;
pub use viewport::Viewport;
