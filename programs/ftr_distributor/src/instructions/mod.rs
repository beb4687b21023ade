pub mod initialize_distributor;
pub mod update_distributor;
pub mod distribute;
pub mod redeem;
pub mod withdraw;

pub use initialize_distributor::*;
pub use update_distributor::*;
pub use distribute::*;
pub use redeem::*;
pub use withdraw::*;
