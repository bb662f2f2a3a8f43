pub mod progress;

pub use progress::{
    GoalColor, credit_progress_pct, goal_color, module_progress_pct, time_progress_pct,
};
