pub mod cursor;
pub mod token;

pub use cursor::*;
pub use token::*;
