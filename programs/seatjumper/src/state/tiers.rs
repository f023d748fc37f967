use anchor_lang::prelude::*;

use crate::constants::{
    GOLD_THRESHOLD_CENTS, MAX_BUNDLE_SIZE, MIN_BUNDLE_SIZE, VIP_THRESHOLD_CENTS,
};

/// Price-derived classification for ticket-side inventory.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TierLevel {
    VipItem,
    GoldLevel,
    UpperDeck,
}

impl TierLevel {
    /// Classify a per-seat price in cents into a tier and its default
    /// priority rank (1 = highest). Only lower bounds are checked, so any
    /// price below the Gold threshold lands in UpperDeck.
    pub fn classify(price_cents: u64) -> (TierLevel, u8) {
        if price_cents >= VIP_THRESHOLD_CENTS {
            (TierLevel::VipItem, 1)
        } else if price_cents >= GOLD_THRESHOLD_CENTS {
            (TierLevel::GoldLevel, 2)
        } else {
            (TierLevel::UpperDeck, 3)
        }
    }
}

/// Memorabilia pack tier, orthogonal to bundle size.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PackTier {
    Blue,
    Red,
    Gold,
}

/// Bitmask admitting every pack tier.
pub const ALL_PACKS_MASK: u8 = 0b111;

impl PackTier {
    pub fn mask_bit(self) -> u8 {
        match self {
            PackTier::Blue => 1 << 0,
            PackTier::Red => 1 << 1,
            PackTier::Gold => 1 << 2,
        }
    }

    /// Pack tier a bundle carries, derived from its ticket side's tier.
    pub fn for_ticket_tier(tier: TierLevel) -> PackTier {
        match tier {
            TierLevel::VipItem => PackTier::Gold,
            TierLevel::GoldLevel => PackTier::Red,
            TierLevel::UpperDeck => PackTier::Blue,
        }
    }
}

/// Inventory item sale status.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemStatus {
    Available,
    Sold,
}

/// Game lifecycle: forward-only, Draft -> Active -> Closed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Draft,
    Active,
    Closed,
}

/// Which kind of item occupies the ticket side of a bundle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TicketSide {
    Level,
    Group,
    Special,
}

/// Bundle sizes an item with `quantity` units remaining may be sold at,
/// as a bitmask (bit s-1 set = size s allowed).
///
/// Quantities of four or fewer sell only as the exact size on hand, so a
/// pair or quad is never broken into orphan seats. Larger quantities may
/// serve any offered size.
pub fn available_units_for_quantity(quantity: u32) -> u8 {
    match quantity {
        0 => 0,
        q if q <= MAX_BUNDLE_SIZE as u32 => 1 << (q - 1),
        _ => unit_mask_all(),
    }
}

/// Bitmask admitting every offered bundle size.
pub const fn unit_mask_all() -> u8 {
    let mut mask = 0u8;
    let mut size = MIN_BUNDLE_SIZE;
    while size <= MAX_BUNDLE_SIZE {
        mask |= 1 << (size - 1);
        size += 1;
    }
    mask
}

/// Whether `mask` admits `bundle_size`.
pub fn unit_mask_allows(mask: u8, bundle_size: u8) -> bool {
    if bundle_size < MIN_BUNDLE_SIZE || bundle_size > MAX_BUNDLE_SIZE {
        return false;
    }
    mask & (1 << (bundle_size - 1)) != 0
}
