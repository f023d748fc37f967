pub mod platform;
pub mod game;
pub mod ticket_inventory;
pub mod card_breaks;
pub mod special_prizes;
pub mod prize_pools;
pub mod vip_backup;
pub mod spins;

pub use platform::*;
pub use game::*;
pub use ticket_inventory::*;
pub use card_breaks::*;
pub use special_prizes::*;
pub use prize_pools::*;
pub use vip_backup::*;
pub use spins::*;
