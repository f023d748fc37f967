use anchor_lang::prelude::*;

use crate::state::tiers::available_units_for_quantity;

/// A named bonus prize for a game, e.g. a signed jersey. A prize flagged
/// `is_backup` stays invisible to pricing and pools until the primary it
/// backs up depletes and it is promoted.
#[account]
pub struct SpecialPrize {
    /// Owning game
    pub game: Pubkey,

    /// Prize ID (max 32 chars)
    pub prize_id: String,

    /// Display name (max 64 chars)
    pub name: String,

    /// Prize category label (max 32 chars)
    pub prize_type: String,

    /// Units remaining
    pub quantity: u32,

    /// Unit value, cents
    pub value: u64,

    /// Bundle sizes this prize may currently be won at (bitmask)
    pub available_units: u8,

    /// Whether this prize is held back as a backup
    pub is_backup: bool,

    /// Primary prize this one backs up (weak reference, cleared on
    /// promotion)
    pub backup_for: Option<Pubkey>,

    /// PDA bump
    pub bump: u8,
}

impl SpecialPrize {
    pub const SEED_PREFIX: &'static [u8] = b"special_prize";

    pub const MAX_ID_LEN: usize = 32;
    pub const MAX_NAME_LEN: usize = 64;
    pub const MAX_TYPE_LEN: usize = 32;

    // 32 + 4+32 + 4+64 + 4+32 + 4 + 8 + 1 + 1 + 1+32 + 1 = 220 bytes
    pub const SIZE: usize = 8 + 220;

    /// Listed prizes are the ones pricing and pools may see.
    pub fn is_listed(&self) -> bool {
        !self.is_backup && self.quantity > 0
    }

    pub fn is_depleted_primary(&self) -> bool {
        !self.is_backup && self.quantity == 0
    }

    pub fn backs_up(&self, primary: &Pubkey) -> bool {
        self.is_backup && self.backup_for == Some(*primary)
    }

    pub fn recompute_available_units(&mut self) {
        self.available_units = available_units_for_quantity(self.quantity);
    }

    /// One unit won/consumed, floored at zero.
    pub fn consume_one(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
        self.recompute_available_units();
    }

    /// One-way promotion into an ordinary, independently listed prize.
    pub fn promote(&mut self) {
        self.is_backup = false;
        self.backup_for = None;
    }
}
