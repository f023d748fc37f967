/// Smallest bundle size a spin can be bought at.
pub const MIN_BUNDLE_SIZE: u8 = 1;

/// Largest bundle size a spin can be bought at.
pub const MAX_BUNDLE_SIZE: u8 = 4;

/// Number of distinct bundle sizes offered (1x..4x).
pub const BUNDLE_SIZE_COUNT: usize = 4;

/// Basis point scale for margin math (10_000 = 100%).
pub const BPS_SCALE: u64 = 10_000;

/// Per-seat price at or above which a ticket item is VIP tier, in cents.
pub const VIP_THRESHOLD_CENTS: u64 = 50_000;

/// Per-seat price at or above which a ticket item is Gold tier, in cents.
pub const GOLD_THRESHOLD_CENTS: u64 = 20_000;

/// Upper bound on bundles materialized per prize pool.
pub const MAX_BUNDLES_PER_POOL: usize = 16;
