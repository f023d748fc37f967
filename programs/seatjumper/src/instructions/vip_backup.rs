use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::events::VipBackupPromoted;
use crate::state::*;
use crate::utils::promotion::{plan_vip_promotion, plan_vip_sweep, PriorityChange};
use crate::utils::snapshot::{load_inventory, store_account, InventorySnapshot};

/// Promote the next-ranked VIP backup after a named item depleted.
/// Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct PromoteVipBackup<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.is_operator(&authority.key()) @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    pub authority: Signer<'info>,
}

fn apply_priority_change<'info>(
    snapshot: &mut InventorySnapshot,
    accounts: &[AccountInfo<'info>],
    change: &PriorityChange,
) -> Result<()> {
    if let Some(loaded) = snapshot.levels.iter_mut().find(|l| l.key == change.key) {
        loaded.account.tier_priority = change.new_priority;
        return store_account(&accounts[loaded.index], &loaded.account);
    }
    if let Some(loaded) = snapshot.groups.iter_mut().find(|g| g.key == change.key) {
        loaded.account.tier_priority = change.new_priority;
        return store_account(&accounts[loaded.index], &loaded.account);
    }
    err!(ErrorCode::UnknownInventoryAccount)
}

pub fn promote_vip_backup<'info>(
    ctx: Context<'_, '_, '_, 'info, PromoteVipBackup<'info>>,
    _game_id: String,
    depleted_item: Pubkey,
) -> Result<()> {
    let game_key = ctx.accounts.game.key();
    let mut snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;
    let views = snapshot.vip_views();

    let depleted = views
        .iter()
        .find(|v| v.key == depleted_item)
        .ok_or(error!(ErrorCode::NotVipTier))?;
    require!(depleted.quantity == 0, ErrorCode::ItemNotDepleted);

    match plan_vip_promotion(&views, &depleted_item) {
        Some((promoted, demoted)) => {
            apply_priority_change(&mut snapshot, ctx.remaining_accounts, &promoted)?;
            apply_priority_change(&mut snapshot, ctx.remaining_accounts, &demoted)?;
            ctx.accounts.game.touch_inventory();

            emit!(VipBackupPromoted {
                game: game_key,
                depleted_item: demoted.key,
                promoted_item: promoted.key,
                new_priority: promoted.new_priority,
            });

            msg!(
                "VIP backup {} promoted to priority {} for game {}",
                promoted.key,
                promoted.new_priority,
                ctx.accounts.game.game_id
            );
        }
        None => {
            msg!(
                "No VIP promotion applied for game {}: ranking healthy or no live backup",
                ctx.accounts.game.game_id
            );
        }
    }

    Ok(())
}

/// Sweep the game's VIP tier and repair the top rank if it has fully
/// depleted. Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct CheckAndPromoteVipBackups<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.is_operator(&authority.key()) @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    pub authority: Signer<'info>,
}

pub fn check_and_promote_vip_backups<'info>(
    ctx: Context<'_, '_, '_, 'info, CheckAndPromoteVipBackups<'info>>,
    _game_id: String,
) -> Result<()> {
    let game_key = ctx.accounts.game.key();
    let mut snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;
    let views = snapshot.vip_views();

    match plan_vip_sweep(&views) {
        Some((promoted, demoted)) => {
            apply_priority_change(&mut snapshot, ctx.remaining_accounts, &promoted)?;
            apply_priority_change(&mut snapshot, ctx.remaining_accounts, &demoted)?;
            ctx.accounts.game.touch_inventory();

            emit!(VipBackupPromoted {
                game: game_key,
                depleted_item: demoted.key,
                promoted_item: promoted.key,
                new_priority: promoted.new_priority,
            });

            msg!(
                "VIP sweep promoted {} to priority {} for game {}",
                promoted.key,
                promoted.new_priority,
                ctx.accounts.game.game_id
            );
        }
        None => {
            msg!(
                "VIP sweep found game {} healthy",
                ctx.accounts.game.game_id
            );
        }
    }

    Ok(())
}
