pub mod conditions;
pub mod state;

pub use conditions::{find_condition, remove_condition, upsert_condition};
pub use state::{compute_actual_state, set_condition};
