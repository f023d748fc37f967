pub mod card_break;
pub mod game;
pub mod platform_config;
pub mod prize_pool;
pub mod special_prize;
pub mod ticket_group;
pub mod ticket_level;
pub mod tiers;

pub use card_break::*;
pub use game::*;
pub use platform_config::*;
pub use prize_pool::*;
pub use special_prize::*;
pub use ticket_group::*;
pub use ticket_level::*;
pub use tiers::*;
