pub mod awards;
pub mod base_state;
pub mod diag;
pub mod game_state;
pub mod line_score;
pub mod pitch_count;
pub mod script;
pub mod session;
pub mod traits;
