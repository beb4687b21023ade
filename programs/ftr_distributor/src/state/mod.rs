pub mod distributor_state;
pub mod param_update;

pub use distributor_state::*;
pub use param_update::*;
