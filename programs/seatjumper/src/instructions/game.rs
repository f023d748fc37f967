use anchor_lang::prelude::*;
use crate::constants::{BPS_SCALE, BUNDLE_SIZE_COUNT};
use crate::errors::ErrorCode;
use crate::events::{GameCreated, GameStatusChanged, PoolsMarkedStale, PricingRecalculated};
use crate::state::*;
use crate::utils::pricing::{calculate_bundle_pricing, calculate_bundle_specific_pricing};
use crate::utils::snapshot::load_inventory;

/// Create a new game
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct CreateGame<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = !platform_config.is_paused @ ErrorCode::PlatformPaused
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        init,
        payer = admin,
        space = Game::SIZE,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump
    )]
    pub game: Account<'info, Game>,

    #[account(
        mut,
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

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
    require!(game_id.len() <= Game::MAX_ID_LEN, ErrorCode::StringTooLong);
    require!(name.len() <= Game::MAX_NAME_LEN, ErrorCode::StringTooLong);
    require!(venue.len() <= Game::MAX_VENUE_LEN, ErrorCode::StringTooLong);
    require!(city.len() <= Game::MAX_CITY_LEN, ErrorCode::StringTooLong);
    require!(state_code.len() <= Game::MAX_STATE_LEN, ErrorCode::StringTooLong);
    require!(sport.len() <= Game::MAX_SPORT_LEN, ErrorCode::StringTooLong);
    require!(max_entries > 0, ErrorCode::InvalidQuantity);

    let margin_bps = margin_bps.unwrap_or(ctx.accounts.platform_config.default_margin_bps);
    require!((margin_bps as u64) <= BPS_SCALE, ErrorCode::InvalidMargin);

    let game = &mut ctx.accounts.game;
    game.game_id = game_id;
    game.name = name;
    game.venue = venue;
    game.city = city;
    game.state_code = state_code;
    game.sport = sport;
    game.event_date = event_date;
    game.status = GameStatus::Draft;
    game.max_entries = max_entries;
    game.current_entries = 0;
    game.margin_bps = margin_bps;
    game.avg_ticket_price = 0;
    game.avg_break_value = 0;
    game.spin_price_per_bundle = 0;
    game.spin_prices = [0; BUNDLE_SIZE_COUNT];
    // Pricing starts one version behind so a game cannot sell before its
    // first recalculation.
    game.inventory_version = 1;
    game.priced_version = 0;
    game.bump = ctx.bumps.game;

    emit!(GameCreated {
        game: game.key(),
        game_id: game.game_id.clone(),
        margin_bps,
        max_entries,
    });

    msg!("Game created in Draft status: {}", game.game_id);

    Ok(())
}

/// Update game lifecycle status
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct UpdateGameStatus<'info> {
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
        constraint = admin.key() == platform_config.admin @ ErrorCode::Unauthorized
    )]
    pub admin: Signer<'info>,
}

pub fn update_game_status(
    ctx: Context<UpdateGameStatus>,
    _game_id: String,
    new_status: GameStatus,
) -> Result<()> {
    let game = &mut ctx.accounts.game;
    require!(
        game.can_transition_to(new_status),
        ErrorCode::InvalidGameStatus
    );

    game.status = new_status;

    emit!(GameStatusChanged {
        game: game.key(),
        new_status,
    });

    msg!("Game {} status updated to: {:?}", game.game_id, new_status);

    Ok(())
}

/// Recalculate aggregate and per-size pricing from current inventory.
/// Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct RecalculatePricing<'info> {
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

pub fn recalculate_pricing<'info>(
    ctx: Context<'_, '_, '_, 'info, RecalculatePricing<'info>>,
    _game_id: String,
    margin_bps: Option<u16>,
) -> Result<()> {
    let game_key = ctx.accounts.game.key();
    let snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;

    let margin_bps = margin_bps.unwrap_or(ctx.accounts.game.margin_bps);
    require!((margin_bps as u64) <= BPS_SCALE, ErrorCode::InvalidMargin);

    let groups = snapshot.priced_groups();
    let levels = snapshot.priced_levels();
    let breaks = snapshot.priced_breaks();
    let prizes = snapshot.priced_prizes();

    let summary = calculate_bundle_pricing(&groups, &levels, &breaks, &prizes, margin_bps)?;
    let spin_prices = calculate_bundle_specific_pricing(&groups, &levels, &breaks, &prizes, margin_bps)?;

    // All pricing fields move together with the version stamp, so readers
    // never observe a half-updated quote.
    let game = &mut ctx.accounts.game;
    game.margin_bps = margin_bps;
    game.avg_ticket_price = summary.avg_ticket_price;
    game.avg_break_value = summary.avg_break_value;
    game.spin_price_per_bundle = summary.spin_price_per_bundle;
    game.spin_prices = spin_prices;
    game.priced_version = game.inventory_version;

    emit!(PricingRecalculated {
        game: game.key(),
        inventory_version: game.inventory_version,
        avg_ticket_price: game.avg_ticket_price,
        avg_break_value: game.avg_break_value,
        spin_price_per_bundle: game.spin_price_per_bundle,
        spin_prices: game.spin_prices,
    });

    msg!(
        "Pricing recalculated for game {}: spin price {} cents at version {}",
        game.game_id,
        game.spin_price_per_bundle,
        game.inventory_version
    );

    Ok(())
}

/// Force every prize pool of the game stale
#[derive(Accounts)]
#[instruction(game_id: String)]
pub struct MarkPoolsStale<'info> {
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

pub fn mark_pools_stale(ctx: Context<MarkPoolsStale>, _game_id: String) -> Result<()> {
    let game = &mut ctx.accounts.game;
    game.touch_inventory();

    emit!(PoolsMarkedStale {
        game: game.key(),
        inventory_version: game.inventory_version,
    });

    msg!(
        "Pools marked stale for game {}: inventory version {}",
        game.game_id,
        game.inventory_version
    );

    Ok(())
}
