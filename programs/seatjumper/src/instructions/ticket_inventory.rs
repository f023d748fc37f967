use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::state::*;
use crate::utils::snapshot::{load_inventory, store_account};

/// Add a ticket level (section-style inventory with an average seat price)
#[derive(Accounts)]
#[instruction(game_id: String, level_id: String)]
pub struct AddTicketLevel<'info> {
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
        space = TicketLevel::SIZE,
        seeds = [TicketLevel::SEED_PREFIX, game.key().as_ref(), level_id.as_bytes()],
        bump
    )]
    pub ticket_level: Account<'info, TicketLevel>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_ticket_level(
    ctx: Context<AddTicketLevel>,
    _game_id: String,
    level_id: String,
    name: String,
    quantity: u32,
    price_per_seat: u64,
    tier_priority: Option<u8>,
) -> Result<()> {
    require!(
        level_id.len() <= TicketLevel::MAX_ID_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        name.len() <= TicketLevel::MAX_NAME_LEN,
        ErrorCode::StringTooLong
    );
    require!(quantity > 0, ErrorCode::InvalidQuantity);

    let (tier_level, default_priority) = TierLevel::classify(price_per_seat);
    let tier_priority = tier_priority.unwrap_or(default_priority);
    require!(tier_priority >= 1, ErrorCode::InvalidTierPriority);

    let level = &mut ctx.accounts.ticket_level;
    level.game = ctx.accounts.game.key();
    level.level_id = level_id;
    level.name = name;
    level.quantity = quantity;
    level.price_per_seat = price_per_seat;
    level.status = ItemStatus::Available;
    level.tier_level = tier_level;
    level.tier_priority = tier_priority;
    level.bump = ctx.bumps.ticket_level;
    level.recompute_available_units();

    ctx.accounts.game.touch_inventory();

    msg!(
        "Ticket level {} added: {} seats at {} cents, tier {:?} priority {}",
        level.level_id,
        level.quantity,
        level.price_per_seat,
        level.tier_level,
        level.tier_priority
    );

    Ok(())
}

/// Add a ticket group (specific section/row seats)
#[derive(Accounts)]
#[instruction(game_id: String, group_id: String)]
pub struct AddTicketGroup<'info> {
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
        space = TicketGroup::SIZE,
        seeds = [TicketGroup::SEED_PREFIX, game.key().as_ref(), group_id.as_bytes()],
        bump
    )]
    pub ticket_group: Account<'info, TicketGroup>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_ticket_group(
    ctx: Context<AddTicketGroup>,
    _game_id: String,
    group_id: String,
    section: String,
    row: String,
    quantity: u32,
    price_per_seat: u64,
    tier_priority: Option<u8>,
) -> Result<()> {
    require!(
        group_id.len() <= TicketGroup::MAX_ID_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        section.len() <= TicketGroup::MAX_SECTION_LEN,
        ErrorCode::StringTooLong
    );
    require!(row.len() <= TicketGroup::MAX_ROW_LEN, ErrorCode::StringTooLong);
    require!(quantity > 0, ErrorCode::InvalidQuantity);

    let (tier_level, default_priority) = TierLevel::classify(price_per_seat);
    let tier_priority = tier_priority.unwrap_or(default_priority);
    require!(tier_priority >= 1, ErrorCode::InvalidTierPriority);

    let group = &mut ctx.accounts.ticket_group;
    group.game = ctx.accounts.game.key();
    group.group_id = group_id;
    group.section = section;
    group.row = row;
    group.quantity = quantity;
    group.price_per_seat = price_per_seat;
    group.status = ItemStatus::Available;
    group.tier_level = tier_level;
    group.tier_priority = tier_priority;
    group.bump = ctx.bumps.ticket_group;
    group.recompute_available_units();

    ctx.accounts.game.touch_inventory();

    msg!(
        "Ticket group {} added: section {} row {}, {} seats at {} cents",
        group.group_id,
        group.section,
        group.row,
        group.quantity,
        group.price_per_seat
    );

    Ok(())
}

/// Restock a ticket level after a supplier refill
#[derive(Accounts)]
#[instruction(game_id: String, level_id: String)]
pub struct RestockTicketLevel<'info> {
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
        seeds = [TicketLevel::SEED_PREFIX, game.key().as_ref(), level_id.as_bytes()],
        bump = ticket_level.bump
    )]
    pub ticket_level: Account<'info, TicketLevel>,

    #[account(
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn restock_ticket_level(
    ctx: Context<RestockTicketLevel>,
    _game_id: String,
    _level_id: String,
    additional: u32,
) -> Result<()> {
    require!(additional > 0, ErrorCode::InvalidQuantity);

    let level = &mut ctx.accounts.ticket_level;
    level.restock(additional)?;
    ctx.accounts.game.touch_inventory();

    msg!(
        "Ticket level {} restocked by {}: {} seats remaining",
        level.level_id,
        additional,
        level.quantity
    );

    Ok(())
}

/// Remove a ticket level and reclaim its rent
#[derive(Accounts)]
#[instruction(game_id: String, level_id: String)]
pub struct RemoveTicketLevel<'info> {
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
        seeds = [TicketLevel::SEED_PREFIX, game.key().as_ref(), level_id.as_bytes()],
        bump = ticket_level.bump
    )]
    pub ticket_level: Account<'info, TicketLevel>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn remove_ticket_level(
    ctx: Context<RemoveTicketLevel>,
    _game_id: String,
    _level_id: String,
) -> Result<()> {
    ctx.accounts.game.touch_inventory();

    msg!(
        "Ticket level {} removed from game {}",
        ctx.accounts.ticket_level.level_id,
        ctx.accounts.game.game_id
    );

    Ok(())
}

/// Remove a ticket group and reclaim its rent
#[derive(Accounts)]
#[instruction(game_id: String, group_id: String)]
pub struct RemoveTicketGroup<'info> {
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
        seeds = [TicketGroup::SEED_PREFIX, game.key().as_ref(), group_id.as_bytes()],
        bump = ticket_group.bump
    )]
    pub ticket_group: Account<'info, TicketGroup>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn remove_ticket_group(
    ctx: Context<RemoveTicketGroup>,
    _game_id: String,
    _group_id: String,
) -> Result<()> {
    ctx.accounts.game.touch_inventory();

    msg!(
        "Ticket group {} removed from game {}",
        ctx.accounts.ticket_group.group_id,
        ctx.accounts.game.game_id
    );

    Ok(())
}

/// Recompute drifted availability masks across the game's inventory.
/// Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct RepairAvailableUnits<'info> {
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

pub fn repair_available_units<'info>(
    ctx: Context<'_, '_, '_, 'info, RepairAvailableUnits<'info>>,
    _game_id: String,
) -> Result<()> {
    let game_key = ctx.accounts.game.key();
    let mut snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;
    let mut repaired: u32 = 0;

    for loaded in snapshot.levels.iter_mut() {
        let before = loaded.account.available_units;
        loaded.account.recompute_available_units();
        if loaded.account.available_units != before {
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
            repaired += 1;
        }
    }
    for loaded in snapshot.groups.iter_mut() {
        let before = loaded.account.available_units;
        loaded.account.recompute_available_units();
        if loaded.account.available_units != before {
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
            repaired += 1;
        }
    }
    for loaded in snapshot.prizes.iter_mut() {
        let before = loaded.account.available_units;
        loaded.account.recompute_available_units();
        if loaded.account.available_units != before {
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
            repaired += 1;
        }
    }
    for loaded in snapshot.breaks.iter_mut() {
        let before = loaded.account.available_units;
        loaded.account.recompute_available_units();
        if loaded.account.available_units != before {
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
            repaired += 1;
        }
    }

    if repaired > 0 {
        ctx.accounts.game.touch_inventory();
    }

    msg!(
        "Availability repair for game {}: {} account(s) corrected",
        ctx.accounts.game.game_id,
        repaired
    );

    Ok(())
}
