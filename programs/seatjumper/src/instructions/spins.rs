use anchor_lang::prelude::*;
use crate::constants::{MAX_BUNDLE_SIZE, MIN_BUNDLE_SIZE};
use crate::errors::ErrorCode;
use crate::events::SpinCommitted;
use crate::state::*;
use crate::utils::snapshot::{load_inventory, store_account};

/// Commit a paid spin: debit the inventory behind one bundle of the pool
#[derive(Accounts)]
#[instruction(game_id: String, bundle_size: u8)]
pub struct CommitSpin<'info> {
    #[account(
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = !platform_config.is_paused @ ErrorCode::PlatformPaused
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// Backend authority must co-sign once external payment has been
    /// confirmed
    #[account(constraint = backend_authority.key() == platform_config.backend_authority @ ErrorCode::Unauthorized)]
    pub backend_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Game::SEED_PREFIX, game_id.as_bytes()],
        bump = game.bump,
        constraint = game.is_active() @ ErrorCode::GameNotActive
    )]
    pub game: Account<'info, Game>,

    #[account(
        seeds = [PrizePool::SEED_PREFIX, game.key().as_ref(), &[bundle_size]],
        bump = prize_pool.bump
    )]
    pub prize_pool: Account<'info, PrizePool>,

    pub buyer: Signer<'info>,

    // Inventory to debit as remaining_accounts in order:
    // [0] ticket-side item, [1] memorabilia item when the bundle has one
}

pub fn commit_spin<'info>(
    ctx: Context<'_, '_, '_, 'info, CommitSpin<'info>>,
    _game_id: String,
    bundle_size: u8,
    bundle_index: u8,
) -> Result<()> {
    require!(
        (MIN_BUNDLE_SIZE..=MAX_BUNDLE_SIZE).contains(&bundle_size),
        ErrorCode::InvalidBundleSize
    );

    // 1. Check entry capacity and pool freshness
    require!(
        ctx.accounts.game.can_accept_entries(),
        ErrorCode::GameFull
    );
    require!(
        !ctx.accounts.prize_pool.is_stale(&ctx.accounts.game),
        ErrorCode::PrizePoolStale
    );
    require!(
        (bundle_index as usize) < ctx.accounts.prize_pool.bundles.len(),
        ErrorCode::BundleIndexOutOfRange
    );

    let bundle = ctx.accounts.prize_pool.bundles[bundle_index as usize].clone();
    let game_key = ctx.accounts.game.key();

    // 2. Debit the ticket side of the bundle
    let mut snapshot = load_inventory(ctx.remaining_accounts, &game_key)?;
    match bundle.ticket_side {
        TicketSide::Level => {
            let loaded = snapshot
                .levels
                .iter_mut()
                .find(|l| l.key == bundle.ticket_item)
                .ok_or(error!(ErrorCode::BundleItemMismatch))?;
            loaded.account.consume(bundle.seats as u32)?;
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
        }
        TicketSide::Group => {
            let loaded = snapshot
                .groups
                .iter_mut()
                .find(|g| g.key == bundle.ticket_item)
                .ok_or(error!(ErrorCode::BundleItemMismatch))?;
            loaded.account.consume(bundle.seats as u32)?;
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
        }
        TicketSide::Special => {
            let loaded = snapshot
                .prizes
                .iter_mut()
                .find(|p| p.key == bundle.ticket_item)
                .ok_or(error!(ErrorCode::BundleItemMismatch))?;
            require!(
                loaded.account.quantity > 0,
                ErrorCode::InsufficientQuantity
            );
            loaded.account.consume_one();
            store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
        }
    }

    // 3. Debit the memorabilia side when the bundle carries one
    if let Some(break_key) = bundle.memorabilia_item {
        let loaded = snapshot
            .breaks
            .iter_mut()
            .find(|b| b.key == break_key)
            .ok_or(error!(ErrorCode::BundleItemMismatch))?;
        loaded.account.consume_one()?;
        store_account(&ctx.remaining_accounts[loaded.index], &loaded.account)?;
    }

    // 4. Record the entry and retire every pool built on the old counts
    let game = &mut ctx.accounts.game;
    game.current_entries = game
        .current_entries
        .checked_add(1)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    game.touch_inventory();

    emit!(SpinCommitted {
        game: game_key,
        buyer: ctx.accounts.buyer.key(),
        bundle_size,
        bundle_index,
        bundle_value: bundle.bundle_value,
        spin_price: ctx.accounts.prize_pool.spin_price,
        entry_number: ctx.accounts.game.current_entries,
    });

    msg!(
        "Spin committed for game {}: bundle {} of size {} worth {} cents to {}",
        ctx.accounts.game.game_id,
        bundle_index,
        bundle_size,
        bundle.bundle_value,
        ctx.accounts.buyer.key()
    );

    Ok(())
}
