pub mod pda;
pub mod token;

pub use pda::*;
pub use token::*;
