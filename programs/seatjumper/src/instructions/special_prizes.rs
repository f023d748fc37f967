use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::events::BackupPrizeActivated;
use crate::state::*;
use crate::utils::promotion::plan_backup_activations;
use crate::utils::snapshot::{load_inventory, store_account};

/// Add a special prize, either as a listed primary or as a backup
/// registered against an existing primary
#[derive(Accounts)]
#[instruction(game_id: String, prize_id: String)]
pub struct AddSpecialPrize<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = !platform_config.is_paused @ ErrorCode::PlatformPaused
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    #[account(
        init,
        payer = admin,
        space = SpecialPrize::SIZE,
        seeds = [SpecialPrize::SEED_PREFIX, game.key().as_ref(), prize_id.as_bytes()],
        bump
    )]
    pub special_prize: Account<'info, SpecialPrize>,

    /// Primary prize this one backs up; required when `is_backup` is set.
    pub backup_of: Option<Account<'info, SpecialPrize>>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_special_prize(
    ctx: Context<AddSpecialPrize>,
    _game_id: String,
    prize_id: String,
    name: String,
    prize_type: String,
    value: u64,
    quantity: u32,
    is_backup: bool,
) -> Result<()> {
    require!(
        prize_id.len() <= SpecialPrize::MAX_ID_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        name.len() <= SpecialPrize::MAX_NAME_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        prize_type.len() <= SpecialPrize::MAX_TYPE_LEN,
        ErrorCode::StringTooLong
    );
    require!(quantity > 0, ErrorCode::InvalidQuantity);

    let backup_for = match (ctx.accounts.backup_of.as_ref(), is_backup) {
        (Some(primary), true) => {
            require!(
                primary.game == ctx.accounts.game.key(),
                ErrorCode::ItemGameMismatch
            );
            require!(!primary.is_backup, ErrorCode::InvalidBackupTarget);
            Some(primary.key())
        }
        (None, false) => None,
        _ => return err!(ErrorCode::InvalidBackupTarget),
    };

    let prize = &mut ctx.accounts.special_prize;
    prize.game = ctx.accounts.game.key();
    prize.prize_id = prize_id;
    prize.name = name;
    prize.prize_type = prize_type;
    prize.quantity = quantity;
    prize.value = value;
    prize.is_backup = is_backup;
    prize.backup_for = backup_for;
    prize.bump = ctx.bumps.special_prize;
    prize.recompute_available_units();

    ctx.accounts.game.touch_inventory();

    msg!(
        "Special prize {} added: {} unit(s) at {} cents, backup: {}",
        prize.prize_id,
        prize.quantity,
        prize.value,
        prize.is_backup
    );

    Ok(())
}

/// Remove a special prize and reclaim its rent
#[derive(Accounts)]
#[instruction(game_id: String, prize_id: String)]
pub struct RemoveSpecialPrize<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        mut,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    #[account(
        mut,
        close = admin,
        seeds = [SpecialPrize::SEED_PREFIX, game.key().as_ref(), prize_id.as_bytes()],
        bump = special_prize.bump
    )]
    pub special_prize: Account<'info, SpecialPrize>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn remove_special_prize(
    ctx: Context<RemoveSpecialPrize>,
    _game_id: String,
    _prize_id: String,
) -> Result<()> {
    ctx.accounts.game.touch_inventory();

    msg!(
        "Special prize {} removed from game {}",
        ctx.accounts.special_prize.prize_id,
        ctx.accounts.game.game_id
    );

    Ok(())
}

/// Record the award of one unit of a primary prize, promoting its backup
/// on depletion
#[derive(Accounts)]
#[instruction(game_id: String, prize_id: String)]
pub struct ActivateBackupPrize<'info> {
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

    #[account(
        mut,
        seeds = [SpecialPrize::SEED_PREFIX, game.key().as_ref(), prize_id.as_bytes()],
        bump = prize.bump
    )]
    pub prize: Account<'info, SpecialPrize>,

    /// Backup registered for `prize`, passed when one exists.
    #[account(mut)]
    pub backup: Option<Account<'info, SpecialPrize>>,

    pub authority: Signer<'info>,
}

pub fn activate_backup_prize(
    ctx: Context<ActivateBackupPrize>,
    _game_id: String,
    _prize_id: String,
) -> Result<()> {
    require!(!ctx.accounts.prize.is_backup, ErrorCode::PrizeIsBackup);

    let was_remaining = ctx.accounts.prize.quantity;
    ctx.accounts.prize.consume_one();
    ctx.accounts.game.touch_inventory();

    msg!(
        "Special prize {} consumed: {} unit(s) remaining",
        ctx.accounts.prize.prize_id,
        ctx.accounts.prize.quantity
    );

    // Promotion fires only on the 1 -> 0 transition.
    if was_remaining != 1 {
        return Ok(());
    }

    let game_key = ctx.accounts.game.key();
    let prize_key = ctx.accounts.prize.key();

    match ctx.accounts.backup.as_mut() {
        Some(backup) => {
            require!(backup.game == game_key, ErrorCode::ItemGameMismatch);
            require!(backup.backs_up(&prize_key), ErrorCode::BackupMismatch);
            if backup.quantity == 0 {
                msg!(
                    "Backup {} for prize {} is depleted; nothing to activate",
                    backup.prize_id,
                    ctx.accounts.prize.prize_id
                );
                return Ok(());
            }
            backup.promote();
            emit!(BackupPrizeActivated {
                game: game_key,
                primary: prize_key,
                backup: backup.key(),
            });
            msg!(
                "Backup prize {} activated for {}",
                backup.prize_id,
                ctx.accounts.prize.prize_id
            );
        }
        None => {
            msg!(
                "No backup registered for prize {}",
                ctx.accounts.prize.prize_id
            );
        }
    }

    Ok(())
}

/// Sweep the game's prizes and promote a backup for every depleted
/// primary. Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct CheckAndActivateBackups<'info> {
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

pub fn check_and_activate_backups<'info>(
    ctx: Context<'_, '_, '_, 'info, CheckAndActivateBackups<'info>>,
    _game_id: String,
) -> Result<()> {
    let game_key = ctx.accounts.game.key();
    let mut snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;
    let plans = plan_backup_activations(&snapshot.prize_views());

    for (primary, backup) in plans.iter() {
        let loaded = snapshot
            .prizes
            .iter_mut()
            .find(|p| p.key == *backup)
            .ok_or(error!(ErrorCode::UnknownInventoryAccount))?;
        loaded.account.promote();
        store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;

        emit!(BackupPrizeActivated {
            game: game_key,
            primary: *primary,
            backup: *backup,
        });
        msg!("Backup prize {} activated for depleted primary {}", backup, primary);
    }

    if plans.is_empty() {
        msg!(
            "No backup activations needed for game {}",
            ctx.accounts.game.game_id
        );
    } else {
        ctx.accounts.game.touch_inventory();
    }

    Ok(())
}
