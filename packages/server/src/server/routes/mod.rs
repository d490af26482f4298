// HTTP routes
pub mod health;
pub mod linkedin;
pub mod notes;
pub mod people;

pub use health::*;
pub use linkedin::*;
pub use notes::*;
pub use people::*;
