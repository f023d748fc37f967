use anchor_lang::prelude::*;
use crate::constants::{MAX_BUNDLE_SIZE, MIN_BUNDLE_SIZE};
use crate::errors::ErrorCode;
use crate::events::PrizePoolGenerated;
use crate::state::*;
use crate::utils::pools::{build_bundles, pool_total_value};
use crate::utils::snapshot::load_inventory;

/// Generate (or regenerate) the candidate bundle pool for one bundle
/// size. Remaining accounts: every inventory account of the game.
#[derive(Accounts)]
#[instruction(game_id: String, bundle_size: u8)]
pub struct GeneratePrizePool<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.is_operator(&authority.key()) @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump
    )]
    pub game: Account<'info, Game>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PrizePool::SIZE,
        seeds = [PrizePool::SEED_PREFIX, game.key().as_ref(), &[bundle_size]],
        bump
    )]
    pub prize_pool: Account<'info, PrizePool>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn generate_prize_pool<'info>(
    ctx: Context<'_, '_, '_, 'info, GeneratePrizePool<'info>>,
    _game_id: String,
    bundle_size: u8,
    bundle_count: u8,
) -> Result<()> {
    require!(
        (MIN_BUNDLE_SIZE..=MAX_BUNDLE_SIZE).contains(&bundle_size),
        ErrorCode::InvalidBundleSize
    );
    require!(bundle_count > 0, ErrorCode::InvalidQuantity);

    let game = &ctx.accounts.game;
    require!(!game.pricing_is_stale(), ErrorCode::PricingStale);

    let snapshot = load_inventory(ctx.remaining_accounts, &game.key())?;
    let bundles = build_bundles(
        &snapshot.ticket_candidates(),
        &snapshot.break_candidates(),
        bundle_size,
        bundle_count,
    )?;
    let total_value = pool_total_value(&bundles)?;

    let pool = &mut ctx.accounts.prize_pool;
    pool.game = game.key();
    pool.bundle_size = bundle_size;
    pool.inventory_version = game.inventory_version;
    pool.spin_price = game.spin_prices[(bundle_size - 1) as usize];
    pool.total_value = total_value;
    pool.generated_at = Clock::get()?.unix_timestamp;
    pool.bundles = bundles;
    pool.bump = ctx.bumps.prize_pool;

    if pool.bundles.is_empty() {
        // A game can legitimately have nothing sellable at this size.
        msg!(
            "Prize pool for game {} size {} generated empty",
            game.game_id,
            bundle_size
        );
    }

    emit!(PrizePoolGenerated {
        game: game.key(),
        bundle_size,
        bundle_count: pool.bundles.len() as u8,
        spin_price: pool.spin_price,
        total_value: pool.total_value,
        inventory_version: pool.inventory_version,
    });

    msg!(
        "Prize pool for game {} size {}: {} bundle(s), spin price {} cents",
        game.game_id,
        bundle_size,
        pool.bundles.len(),
        pool.spin_price
    );

    Ok(())
}
