use anchor_lang::prelude::*;

use crate::constants::MAX_BUNDLES_PER_POOL;
use crate::state::game::Game;
use crate::state::tiers::{PackTier, TicketSide};

/// One sellable combination: a ticket-side item plus optional memorabilia.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Bundle {
    /// Kind of item on the ticket side
    pub ticket_side: TicketSide,

    /// Ticket-side account
    pub ticket_item: Pubkey,

    /// Seats consumed from a level/group; 0 when a special prize occupies
    /// the ticket side (one prize unit replaces the seats)
    pub seats: u8,

    /// Ticket-side value, cents
    pub ticket_value: u64,

    /// Paired card break, if any
    pub memorabilia_item: Option<Pubkey>,

    /// Memorabilia value, cents
    pub memorabilia_value: u64,

    /// Pack tier this bundle awards
    pub pack_tier: PackTier,

    /// Total bundle value, cents
    pub bundle_value: u64,
}

impl Bundle {
    // 1 + 32 + 1 + 8 + 1+32 + 8 + 1 + 8 = 92 bytes
    pub const SIZE: usize = 92;
}

/// Materialized candidate bundles for one (game, bundle size). Regenerated
/// wholesale; a spin draws one bundle by index.
#[account]
pub struct PrizePool {
    /// Owning game
    pub game: Pubkey,

    /// Bundle size this pool serves (1..4)
    pub bundle_size: u8,

    /// Game inventory version this pool was generated against
    pub inventory_version: u64,

    /// Spin price for this size at generation time, cents
    pub spin_price: u64,

    /// Sum of all bundle values, cents
    pub total_value: u64,

    /// Generation time (Unix timestamp)
    pub generated_at: i64,

    /// Candidate bundles, drawn from by index
    pub bundles: Vec<Bundle>,

    /// PDA bump
    pub bump: u8,
}

impl PrizePool {
    pub const SEED_PREFIX: &'static [u8] = b"prize_pool";

    // 32 + 1 + 8 + 8 + 8 + 8 + (4 + 92 * MAX_BUNDLES_PER_POOL) + 1
    pub const SIZE: usize = 8 + 65 + 4 + Bundle::SIZE * MAX_BUNDLES_PER_POOL + 1;

    /// A pool generated before the game's latest inventory mutation must
    /// not be trusted for checkout.
    pub fn is_stale(&self, game: &Game) -> bool {
        self.inventory_version != game.inventory_version
    }
}
