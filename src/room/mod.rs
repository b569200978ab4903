pub mod candidate;
pub use candidate::*;
pub mod dealer;
pub use dealer::*;
pub mod gate;
pub use gate::*;
pub mod generator;
pub use generator::*;
pub mod inbox;
pub use inbox::*;
pub mod player;
pub use player::*;
pub mod room;
pub use room::*;
pub mod ruling;
pub use ruling::*;
pub mod seat;
pub use seat::*;
