use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::GameStatus;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod seatjumper {
    use super::*;

    // ==================== Platform Management ====================

    /// Initialize the platform configuration
    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        backend_authority: Pubkey,
        default_margin_bps: u16,
    ) -> Result<()> {
        instructions::platform::initialize_platform(ctx, backend_authority, default_margin_bps)
    }

    /// Update platform configuration
    pub fn update_platform_config(
        ctx: Context<UpdatePlatformConfig>,
        new_backend_authority: Option<Pubkey>,
        new_default_margin_bps: Option<u16>,
    ) -> Result<()> {
        instructions::platform::update_platform_config(
            ctx,
            new_backend_authority,
            new_default_margin_bps,
        )
    }

    /// Toggle platform pause status
    pub fn toggle_pause(ctx: Context<TogglePause>) -> Result<()> {
        instructions::platform::toggle_pause(ctx)
    }

    /// Transfer platform admin to a new address (e.g., multisig)
    pub fn transfer_authority(ctx: Context<TransferAuthority>, new_admin: Pubkey) -> Result<()> {
        instructions::platform::transfer_authority(ctx, new_admin)
    }

    // ==================== Game Management ====================

    /// Create a new game
    pub fn create_game(
        ctx: Context<CreateGame>,
        game_id: String,
        name: String,
        venue: String,
        city: String,
        state_code: String,
        sport: String,
        event_date: i64,
        max_entries: u32,
        margin_bps: Option<u16>,
    ) -> Result<()> {
        instructions::game::create_game(
            ctx,
            game_id,
            name,
            venue,
            city,
            state_code,
            sport,
            event_date,
            max_entries,
            margin_bps,
        )
    }

    /// Update game lifecycle status
    pub fn update_game_status(
        ctx: Context<UpdateGameStatus>,
        game_id: String,
        new_status: GameStatus,
    ) -> Result<()> {
        instructions::game::update_game_status(ctx, game_id, new_status)
    }

    /// Recalculate aggregate and per-size pricing from current inventory
    pub fn recalculate_pricing<'info>(
        ctx: Context<'_, '_, '_, 'info, RecalculatePricing<'info>>,
        game_id: String,
        margin_bps: Option<u16>,
    ) -> Result<()> {
        instructions::game::recalculate_pricing(ctx, game_id, margin_bps)
    }

    /// Force every prize pool of the game stale
    pub fn mark_pools_stale(ctx: Context<MarkPoolsStale>, game_id: String) -> Result<()> {
        instructions::game::mark_pools_stale(ctx, game_id)
    }

    // ==================== Ticket Inventory ====================

    /// Add a ticket level
    pub fn add_ticket_level(
        ctx: Context<AddTicketLevel>,
        game_id: String,
        level_id: String,
        name: String,
        quantity: u32,
        price_per_seat: u64,
        tier_priority: Option<u8>,
    ) -> Result<()> {
        instructions::ticket_inventory::add_ticket_level(
            ctx,
            game_id,
            level_id,
            name,
            quantity,
            price_per_seat,
            tier_priority,
        )
    }

    /// Add a ticket group
    pub fn add_ticket_group(
        ctx: Context<AddTicketGroup>,
        game_id: String,
        group_id: String,
        section: String,
        row: String,
        quantity: u32,
        price_per_seat: u64,
        tier_priority: Option<u8>,
    ) -> Result<()> {
        instructions::ticket_inventory::add_ticket_group(
            ctx,
            game_id,
            group_id,
            section,
            row,
            quantity,
            price_per_seat,
            tier_priority,
        )
    }

    /// Restock a ticket level
    pub fn restock_ticket_level(
        ctx: Context<RestockTicketLevel>,
        game_id: String,
        level_id: String,
        additional: u32,
    ) -> Result<()> {
        instructions::ticket_inventory::restock_ticket_level(ctx, game_id, level_id, additional)
    }

    /// Remove a ticket level
    pub fn remove_ticket_level(
        ctx: Context<RemoveTicketLevel>,
        game_id: String,
        level_id: String,
    ) -> Result<()> {
        instructions::ticket_inventory::remove_ticket_level(ctx, game_id, level_id)
    }

    /// Remove a ticket group
    pub fn remove_ticket_group(
        ctx: Context<RemoveTicketGroup>,
        game_id: String,
        group_id: String,
    ) -> Result<()> {
        instructions::ticket_inventory::remove_ticket_group(ctx, game_id, group_id)
    }

    /// Recompute drifted availability masks across the game's inventory
    pub fn repair_available_units<'info>(
        ctx: Context<'_, '_, '_, 'info, RepairAvailableUnits<'info>>,
        game_id: String,
    ) -> Result<()> {
        instructions::ticket_inventory::repair_available_units(ctx, game_id)
    }

    // ==================== Card Breaks ====================

    /// Add a card break
    pub fn add_card_break(
        ctx: Context<AddCardBreak>,
        game_id: String,
        break_id: String,
        title: String,
        break_value: u64,
        quantity: u32,
        available_packs: u8,
    ) -> Result<()> {
        instructions::card_breaks::add_card_break(
            ctx,
            game_id,
            break_id,
            title,
            break_value,
            quantity,
            available_packs,
        )
    }

    /// Restock a card break
    pub fn restock_card_break(
        ctx: Context<RestockCardBreak>,
        game_id: String,
        break_id: String,
        additional: u32,
    ) -> Result<()> {
        instructions::card_breaks::restock_card_break(ctx, game_id, break_id, additional)
    }

    /// Remove a card break
    pub fn remove_card_break(
        ctx: Context<RemoveCardBreak>,
        game_id: String,
        break_id: String,
    ) -> Result<()> {
        instructions::card_breaks::remove_card_break(ctx, game_id, break_id)
    }

    // ==================== Special Prizes ====================

    /// Add a special prize, listed or registered as a backup
    pub fn add_special_prize(
        ctx: Context<AddSpecialPrize>,
        game_id: String,
        prize_id: String,
        name: String,
        prize_type: String,
        value: u64,
        quantity: u32,
        is_backup: bool,
    ) -> Result<()> {
        instructions::special_prizes::add_special_prize(
            ctx,
            game_id,
            prize_id,
            name,
            prize_type,
            value,
            quantity,
            is_backup,
        )
    }

    /// Remove a special prize
    pub fn remove_special_prize(
        ctx: Context<RemoveSpecialPrize>,
        game_id: String,
        prize_id: String,
    ) -> Result<()> {
        instructions::special_prizes::remove_special_prize(ctx, game_id, prize_id)
    }

    /// Record the award of one unit of a primary prize, promoting its
    /// backup on depletion
    pub fn activate_backup_prize(
        ctx: Context<ActivateBackupPrize>,
        game_id: String,
        prize_id: String,
    ) -> Result<()> {
        instructions::special_prizes::activate_backup_prize(ctx, game_id, prize_id)
    }

    /// Promote a backup for every depleted primary prize of the game
    pub fn check_and_activate_backups<'info>(
        ctx: Context<'_, '_, '_, 'info, CheckAndActivateBackups<'info>>,
        game_id: String,
    ) -> Result<()> {
        instructions::special_prizes::check_and_activate_backups(ctx, game_id)
    }

    // ==================== Prize Pools ====================

    /// Generate the candidate bundle pool for one bundle size
    pub fn generate_prize_pool<'info>(
        ctx: Context<'_, '_, '_, 'info, GeneratePrizePool<'info>>,
        game_id: String,
        bundle_size: u8,
        bundle_count: u8,
    ) -> Result<()> {
        instructions::prize_pools::generate_prize_pool(ctx, game_id, bundle_size, bundle_count)
    }

    // ==================== VIP Backups ====================

    /// Promote the next-ranked VIP backup after a named item depleted
    pub fn promote_vip_backup<'info>(
        ctx: Context<'_, '_, '_, 'info, PromoteVipBackup<'info>>,
        game_id: String,
        depleted_item: Pubkey,
    ) -> Result<()> {
        instructions::vip_backup::promote_vip_backup(ctx, game_id, depleted_item)
    }

    /// Sweep the VIP tier and repair the top rank if it has depleted
    pub fn check_and_promote_vip_backups<'info>(
        ctx: Context<'_, '_, '_, 'info, CheckAndPromoteVipBackups<'info>>,
        game_id: String,
    ) -> Result<()> {
        instructions::vip_backup::check_and_promote_vip_backups(ctx, game_id)
    }

    // ==================== Spin Flow ====================

    /// Commit a paid spin with backend authorization
    pub fn commit_spin<'info>(
        ctx: Context<'_, '_, '_, 'info, CommitSpin<'info>>,
        game_id: String,
        bundle_size: u8,
        bundle_index: u8,
    ) -> Result<()> {
        instructions::spins::commit_spin(ctx, game_id, bundle_size, bundle_index)
    }
}
