use anchor_lang::prelude::*;

#[account]
pub struct PlatformConfig {
    /// Update authority (multisig address)
    pub admin: Pubkey,

    /// Backend signing authority
    pub backend_authority: Pubkey,

    /// Margin applied to games created without an explicit margin,
    /// in basis points (3000 = 30%)
    pub default_margin_bps: u16,

    /// Platform pause status
    pub is_paused: bool,

    /// PDA bump
    pub bump: u8,
}

impl PlatformConfig {
    pub const SEED_PREFIX: &'static [u8] = b"platform_config";

    // 32 + 32 + 2 + 1 + 1 = 68 bytes
    pub const SIZE: usize = 8 + 68;

    /// Admin and backend may both run maintenance operations
    /// (pricing recalculation, pool generation, backup sweeps).
    pub fn is_operator(&self, key: &Pubkey) -> bool {
        *key == self.admin || *key == self.backend_authority
    }
}
