use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::state::*;

/// Add a card break to the memorabilia side of a game
#[derive(Accounts)]
#[instruction(game_id: String, break_id: String)]
pub struct AddCardBreak<'info> {
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
        space = CardBreak::SIZE,
        seeds = [CardBreak::SEED_PREFIX, game.key().as_ref(), break_id.as_bytes()],
        bump
    )]
    pub card_break: Account<'info, CardBreak>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_card_break(
    ctx: Context<AddCardBreak>,
    _game_id: String,
    break_id: String,
    title: String,
    break_value: u64,
    quantity: u32,
    available_packs: u8,
) -> Result<()> {
    require!(
        break_id.len() <= CardBreak::MAX_ID_LEN,
        ErrorCode::StringTooLong
    );
    require!(
        title.len() <= CardBreak::MAX_TITLE_LEN,
        ErrorCode::StringTooLong
    );
    require!(quantity > 0, ErrorCode::InvalidQuantity);
    require!(
        available_packs != 0 && available_packs & !ALL_PACKS_MASK == 0,
        ErrorCode::InvalidPackMask
    );

    let (tier_level, tier_priority) = TierLevel::classify(break_value);

    let card_break = &mut ctx.accounts.card_break;
    card_break.game = ctx.accounts.game.key();
    card_break.break_id = break_id;
    card_break.title = title;
    card_break.break_value = break_value;
    card_break.quantity = quantity;
    card_break.status = ItemStatus::Available;
    card_break.available_packs = available_packs;
    card_break.tier_level = tier_level;
    card_break.tier_priority = tier_priority;
    card_break.bump = ctx.bumps.card_break;
    card_break.recompute_available_units();

    ctx.accounts.game.touch_inventory();

    msg!(
        "Card break {} added: {} units at {} cents, pack mask {:#05b}",
        card_break.break_id,
        card_break.quantity,
        card_break.break_value,
        card_break.available_packs
    );

    Ok(())
}

/// Restock a card break after a supplier refill
#[derive(Accounts)]
#[instruction(game_id: String, break_id: String)]
pub struct RestockCardBreak<'info> {
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
        seeds = [CardBreak::SEED_PREFIX, game.key().as_ref(), break_id.as_bytes()],
        bump = card_break.bump
    )]
    pub card_break: Account<'info, CardBreak>,

    #[account(
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn restock_card_break(
    ctx: Context<RestockCardBreak>,
    _game_id: String,
    _break_id: String,
    additional: u32,
) -> Result<()> {
    require!(additional > 0, ErrorCode::InvalidQuantity);

    let card_break = &mut ctx.accounts.card_break;
    card_break.restock(additional)?;
    ctx.accounts.game.touch_inventory();

    msg!(
        "Card break {} restocked by {}: {} units remaining",
        card_break.break_id,
        additional,
        card_break.quantity
    );

    Ok(())
}

/// Remove a card break and reclaim its rent
#[derive(Accounts)]
#[instruction(game_id: String, break_id: String)]
pub struct RemoveCardBreak<'info> {
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
        seeds = [CardBreak::SEED_PREFIX, game.key().as_ref(), break_id.as_bytes()],
        bump = card_break.bump
    )]
    pub card_break: Account<'info, CardBreak>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn remove_card_break(
    ctx: Context<RemoveCardBreak>,
    _game_id: String,
    _break_id: String,
) -> Result<()> {
    ctx.accounts.game.touch_inventory();

    msg!(
        "Card break {} removed from game {}",
        ctx.accounts.card_break.break_id,
        ctx.accounts.game.game_id
    );

    Ok(())
}
