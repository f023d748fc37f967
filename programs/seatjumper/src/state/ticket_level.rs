use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::tiers::{available_units_for_quantity, ItemStatus, TierLevel};

/// A fungible ticket pool for one seating tier of a game, e.g. "Upper
/// Deck". Seats are interchangeable; only the remaining quantity matters.
#[account]
pub struct TicketLevel {
    /// Owning game
    pub game: Pubkey,

    /// Level ID (max 32 chars)
    pub level_id: String,

    /// Display name (max 64 chars)
    pub name: String,

    /// Seats remaining
    pub quantity: u32,

    /// Price per seat, cents
    pub price_per_seat: u64,

    /// Sale status
    pub status: ItemStatus,

    /// Bundle sizes this level may currently be sold at (bitmask)
    pub available_units: u8,

    /// Price-derived tier
    pub tier_level: TierLevel,

    /// Rank within the tier (1 = primary, higher = backup order)
    pub tier_priority: u8,

    /// PDA bump
    pub bump: u8,
}

impl TicketLevel {
    pub const SEED_PREFIX: &'static [u8] = b"ticket_level";

    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_NAME_LEN: usize = 64;

    // 32 + 4+32 + 4+64 + 4 + 8 + 1 + 1 + 1 + 1 + 1 = 153 bytes
    pub const SIZE: usize = 8 + 153;

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available && self.quantity > 0
    }

    /// `available_units` is stored denormalized and must be kept in step
    /// with `quantity` on every mutation.
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

    pub fn restock(&mut self, additional: u32) -> Result<()> {
        self.quantity = self
            .quantity
            .checked_add(additional)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        if self.quantity > 0 {
            self.status = ItemStatus::Available;
        }
        self.recompute_available_units();
        Ok(())
    }
}
