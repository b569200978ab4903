pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod judge;
pub use judge::*;
