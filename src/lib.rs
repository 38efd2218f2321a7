pub mod index;
pub mod reference;
pub mod utils;
