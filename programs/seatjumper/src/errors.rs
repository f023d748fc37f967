use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Platform is currently paused")]
    PlatformPaused,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Margin exceeds 100%")]
    InvalidMargin,

    #[msg("String field exceeds maximum length")]
    StringTooLong,

    #[msg("Invalid game status transition")]
    InvalidGameStatus,

    #[msg("Game is not active")]
    GameNotActive,

    #[msg("Game has reached its entry capacity")]
    GameFull,

    #[msg("Invalid quantity")]
    InvalidQuantity,

    #[msg("Bundle size out of supported range")]
    InvalidBundleSize,

    #[msg("Tier priority must be at least 1")]
    InvalidTierPriority,

    #[msg("Invalid pack tier mask")]
    InvalidPackMask,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Insufficient remaining quantity")]
    InsufficientQuantity,

    #[msg("Inventory item belongs to a different game")]
    ItemGameMismatch,

    #[msg("Account is not a recognized inventory type")]
    UnknownInventoryAccount,

    #[msg("Item still has remaining quantity")]
    ItemNotDepleted,

    #[msg("Item is not VIP tier")]
    NotVipTier,

    #[msg("Game pricing is stale and must be recalculated")]
    PricingStale,

    #[msg("Prize pool is stale and must be regenerated")]
    PrizePoolStale,

    #[msg("Bundle index out of range")]
    BundleIndexOutOfRange,

    #[msg("Passed accounts do not match the bundle contents")]
    BundleItemMismatch,

    #[msg("Prize is a backup, expected a primary prize")]
    PrizeIsBackup,

    #[msg("Backup linkage does not match the given primary prize")]
    InvalidBackupTarget,

    #[msg("Backup account does not back up this prize")]
    BackupMismatch,
}
