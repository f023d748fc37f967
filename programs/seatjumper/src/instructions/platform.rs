use anchor_lang::prelude::*;
use crate::constants::BPS_SCALE;
use crate::errors::ErrorCode;
use crate::events::{PauseChanged, PlatformInitialized};
use crate::state::*;

/// Initialize platform configuration
#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = deployer,
        space = PlatformConfig::SIZE,
        seeds = [PlatformConfig::SEED_PREFIX],
        bump
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    #[account(mut)]
    pub deployer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_platform(
    ctx: Context<InitializePlatform>,
    backend_authority: Pubkey,
    default_margin_bps: u16,
) -> Result<()> {
    require!(
        (default_margin_bps as u64) <= BPS_SCALE,
        ErrorCode::InvalidMargin
    );

    let config = &mut ctx.accounts.platform_config;
    config.admin = ctx.accounts.deployer.key();
    config.backend_authority = backend_authority;
    config.default_margin_bps = default_margin_bps;
    config.is_paused = false;
    config.bump = ctx.bumps.platform_config;

    emit!(PlatformInitialized {
        admin: config.admin,
        backend_authority: config.backend_authority,
    });

    msg!(
        "Platform initialized with deployer as admin: {}",
        ctx.accounts.deployer.key()
    );

    Ok(())
}

/// Update platform configuration
#[derive(Accounts)]
pub struct UpdatePlatformConfig<'info> {
    #[account(
        mut,
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.admin == authority.key() @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    pub authority: Signer<'info>,
}

pub fn update_platform_config(
    ctx: Context<UpdatePlatformConfig>,
    new_backend_authority: Option<Pubkey>,
    new_default_margin_bps: Option<u16>,
) -> Result<()> {
    let config = &mut ctx.accounts.platform_config;

    if let Some(backend_auth) = new_backend_authority {
        config.backend_authority = backend_auth;
        msg!("Backend authority updated to: {}", backend_auth);
    }

    if let Some(margin_bps) = new_default_margin_bps {
        require!((margin_bps as u64) <= BPS_SCALE, ErrorCode::InvalidMargin);
        config.default_margin_bps = margin_bps;
        msg!("Default margin updated to: {} bps", margin_bps);
    }

    Ok(())
}

/// Toggle platform pause status
#[derive(Accounts)]
pub struct TogglePause<'info> {
    #[account(
        mut,
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.admin == authority.key() @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    pub authority: Signer<'info>,
}

pub fn toggle_pause(ctx: Context<TogglePause>) -> Result<()> {
    let config = &mut ctx.accounts.platform_config;
    config.is_paused = !config.is_paused;

    emit!(PauseChanged {
        is_paused: config.is_paused,
    });

    msg!("Platform pause status: {}", config.is_paused);

    Ok(())
}

/// Transfer platform admin to a new address (e.g., multisig)
#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    #[account(
        mut,
        seeds = [PlatformConfig::SEED_PREFIX],
        bump = platform_config.bump,
        constraint = platform_config.admin == current_admin.key() @ ErrorCode::Unauthorized
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    pub current_admin: Signer<'info>,
}

pub fn transfer_authority(ctx: Context<TransferAuthority>, new_admin: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.platform_config;

    config.admin = new_admin;
    msg!("Admin transferred to: {}", new_admin);

    Ok(())
}
