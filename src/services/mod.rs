//! Service layer: the search request lifecycle and its building blocks.

pub mod history;
pub mod progress;
pub mod recommendations;
pub mod scheduled_task;
pub mod search_controller;

pub use history::History;
pub use progress::{LoadingState, ProgressModel};
pub use recommendations::{recommend, CELEBRITY_POOL, RECOMMENDATION_COUNT};
pub use scheduled_task::ScheduledTask;
pub use search_controller::{ControllerSnapshot, RequestToken, SearchController};
