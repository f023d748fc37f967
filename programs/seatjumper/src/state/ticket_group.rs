use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::tiers::{available_units_for_quantity, ItemStatus, TierLevel};

/// A concrete block of physical seats (one section/row) for a game.
#[account]
pub struct TicketGroup {
    /// Owning game
    pub game: Pubkey,

    /// Group ID (max 32 chars)
    pub group_id: String,

    /// Section label (max 16 chars)
    pub section: String,

    /// Row label (max 8 chars)
    pub row: String,

    /// Seats remaining in the block
    pub quantity: u32,

    /// Price per seat, cents
    pub price_per_seat: u64,

    /// Sale status
    pub status: ItemStatus,

    /// Bundle sizes this block may currently be sold at (bitmask)
    pub available_units: u8,

    /// Price-derived tier
    pub tier_level: TierLevel,

    /// Rank within the tier (1 = primary, higher = backup order)
    pub tier_priority: u8,

    /// PDA bump
    pub bump: u8,
}

impl TicketGroup {
    pub const SEED_PREFIX: &'static [u8] = b"ticket_group";

    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_SECTION_LEN: usize = 16;
    pub const MAX_ROW_LEN: usize = 8;

    // 32 + 4+32 + 4+16 + 4+8 + 4 + 8 + 1 + 1 + 1 + 1 + 1 = 117 bytes
    pub const SIZE: usize = 8 + 117;

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available && self.quantity > 0
    }

    pub fn recompute_available_units(&mut self) {
        self.available_units = available_units_for_quantity(self.quantity);
    }

    pub fn consume(&mut self, seats: u32) -> Result<()> {
        self.quantity = self
            .quantity
            .checked_sub(seats)
            .ok_or(ErrorCode::InsufficientQuantity)?;
        if self.quantity == 0 {
            self.status = ItemStatus::Sold;
        }
        self.recompute_available_units();
        Ok(())
    }
}
