use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::tiers::{available_units_for_quantity, ItemStatus, PackTier, TierLevel};

/// A memorabilia/trading-card break item for a game.
#[account]
pub struct CardBreak {
    /// Owning game
    pub game: Pubkey,

    /// Break ID (max 32 chars)
    pub break_id: String,

    /// Display title (max 64 chars)
    pub title: String,

    /// Unit value, cents
    pub break_value: u64,

    /// Units remaining
    pub quantity: u32,

    /// Sale status
    pub status: ItemStatus,

    /// Bundle sizes this break may currently be paired into (bitmask)
    pub available_units: u8,

    /// Pack tiers (blue/red/gold) this break is eligible for (bitmask)
    pub available_packs: u8,

    /// Value-derived tier
    pub tier_level: TierLevel,

    /// Rank within the tier
    pub tier_priority: u8,

    /// PDA bump
    pub bump: u8,
}

impl CardBreak {
    pub const SEED_PREFIX: &'static [u8] = b"card_break";

    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_TITLE_LEN: usize = 64;

    // 32 + 4+32 + 4+64 + 8 + 4 + 1 + 1 + 1 + 1 + 1 + 1 = 154 bytes
    pub const SIZE: usize = 8 + 154;

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available && self.quantity > 0
    }

    pub fn allows_pack(&self, pack: PackTier) -> bool {
        self.available_packs & pack.mask_bit() != 0
    }

    pub fn recompute_available_units(&mut self) {
        self.available_units = available_units_for_quantity(self.quantity);
    }

    pub fn consume_one(&mut self) -> Result<()> {
        self.quantity = self
            .quantity
            .checked_sub(1)
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
