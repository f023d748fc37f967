use anchor_lang::prelude::*;

use crate::constants::BUNDLE_SIZE_COUNT;
use crate::state::tiers::GameStatus;

#[account]
pub struct Game {
    /// Game ID (max 32 chars)
    pub game_id: String,

    /// Event name (max 64 chars)
    pub name: String,

    /// Venue name (max 64 chars)
    pub venue: String,

    /// Venue city (max 32 chars)
    pub city: String,

    /// Venue state code (max 8 chars)
    pub state_code: String,

    /// Sport label (max 16 chars)
    pub sport: String,

    /// Event date (Unix timestamp)
    pub event_date: i64,

    /// Lifecycle status
    pub status: GameStatus,

    /// Maximum spin entries sellable for this game
    pub max_entries: u32,

    /// Spin entries committed so far
    pub current_entries: u32,

    /// Margin applied at the last pricing run, in basis points
    pub margin_bps: u16,

    /// Mean per-seat price across available ticket-side inventory, cents
    pub avg_ticket_price: u64,

    /// Mean value across available memorabilia-side inventory, cents
    pub avg_break_value: u64,

    /// Blended spin price (ticket avg + break avg, marked up), cents
    pub spin_price_per_bundle: u64,

    /// Per-bundle-size spin prices (1x..4x), cents
    pub spin_prices: [u64; BUNDLE_SIZE_COUNT],

    /// Bumped by every inventory mutation for this game
    pub inventory_version: u64,

    /// Inventory version the pricing fields were computed at
    pub priced_version: u64,

    /// PDA bump
    pub bump: u8,
}

impl Game {
    pub const SEED_PREFIX: &'static [u8] = b"game";

    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_NAME_LEN: usize = 64;
    pub const MAX_VENUE_LEN: usize = 64;
    pub const MAX_CITY_LEN: usize = 32;
    pub const MAX_STATE_LEN: usize = 8;
    pub const MAX_SPORT_LEN: usize = 16;

    // 4+32 + 4+64 + 4+64 + 4+32 + 4+8 + 4+16 + 8 + 1 + 4 + 4 + 2
    //   + 8 + 8 + 8 + 32 + 8 + 8 + 1 = 332 bytes
    pub const SIZE: usize = 8 + 332;

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn can_accept_entries(&self) -> bool {
        self.is_active() && self.current_entries < self.max_entries
    }

    /// Lifecycle is forward-only; a draft may be closed without ever
    /// going active.
    pub fn can_transition_to(&self, new_status: GameStatus) -> bool {
        matches!(
            (self.status, new_status),
            (GameStatus::Draft, GameStatus::Active)
                | (GameStatus::Draft, GameStatus::Closed)
                | (GameStatus::Active, GameStatus::Closed)
        )
    }

    /// Records an inventory mutation. Every prize pool generated at an
    /// older version, and any pricing computed at one, becomes stale.
    /// Infallible so mutation paths can never be failed by it.
    pub fn touch_inventory(&mut self) {
        self.inventory_version = self.inventory_version.wrapping_add(1);
    }

    pub fn pricing_is_stale(&self) -> bool {
        self.priced_version != self.inventory_version
    }
}
