pub mod card;
pub mod page;
pub mod set;
pub mod trivia;

pub use card::*;
pub use page::*;
pub use set::*;
pub use trivia::*;
