use anchor_lang::prelude::*;

use crate::constants::BUNDLE_SIZE_COUNT;
use crate::state::GameStatus;

// --- PLATFORM & ADMIN ---
#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub backend_authority: Pubkey,
}

#[event]
pub struct PauseChanged {
    pub is_paused: bool,
}

// --- GAMES & PRICING ---
#[event]
pub struct GameCreated {
    pub game: Pubkey,
    pub game_id: String,
    pub margin_bps: u16,
    pub max_entries: u32,
}

#[event]
pub struct GameStatusChanged {
    pub game: Pubkey,
    pub new_status: GameStatus,
}

#[event]
pub struct PricingRecalculated {
    pub game: Pubkey,
    pub inventory_version: u64,
    pub avg_ticket_price: u64,
    pub avg_break_value: u64,
    pub spin_price_per_bundle: u64,
    pub spin_prices: [u64; BUNDLE_SIZE_COUNT],
}

#[event]
pub struct PoolsMarkedStale {
    pub game: Pubkey,
    pub inventory_version: u64,
}

// --- PRIZE POOLS & BACKUPS ---
#[event]
pub struct PrizePoolGenerated {
    pub game: Pubkey,
    pub bundle_size: u8,
    pub bundle_count: u8,
    pub spin_price: u64,
    pub total_value: u64,
    pub inventory_version: u64,
}

#[event]
pub struct VipBackupPromoted {
    pub game: Pubkey,
    pub depleted_item: Pubkey,
    pub promoted_item: Pubkey,
    pub new_priority: u8,
}

#[event]
pub struct BackupPrizeActivated {
    pub game: Pubkey,
    pub primary: Pubkey,
    pub backup: Pubkey,
}

// --- SPINS ---
#[event]
pub struct SpinCommitted {
    pub game: Pubkey,
    pub buyer: Pubkey,
    pub bundle_size: u8,
    pub bundle_index: u8,
    pub bundle_value: u64,
    pub spin_price: u64,
    pub entry_number: u32,
}
