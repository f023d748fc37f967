use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::Discriminator;

use crate::errors::ErrorCode;
use crate::state::*;
use crate::utils::pools::{BreakCandidate, TicketCandidate};
use crate::utils::pricing::PricedItem;
use crate::utils::promotion::{PrizeView, VipItemView};

/// Deserialized inventory account paired with its position in the
/// remaining-accounts slice, so writes can find the matching AccountInfo.
pub struct Loaded<T> {
    pub index: usize,
    pub key: Pubkey,
    pub account: T,
}

/// Every inventory account passed alongside an instruction, sorted into
/// its kind by discriminator.
#[derive(Default)]
pub struct InventorySnapshot {
    pub levels: Vec<Loaded<TicketLevel>>,
    pub groups: Vec<Loaded<TicketGroup>>,
    pub prizes: Vec<Loaded<SpecialPrize>>,
    pub breaks: Vec<Loaded<CardBreak>>,
}

/// Reads the remaining accounts into an [`InventorySnapshot`]. Every
/// account must be one of our inventory kinds and belong to `game`;
/// anything else fails the instruction rather than being skipped.
pub fn load_inventory(accounts: &[AccountInfo], game: &Pubkey) -> Result<InventorySnapshot> {
    let mut snapshot = InventorySnapshot::default();
    for (index, info) in accounts.iter().enumerate() {
        require!(info.owner == &crate::ID, ErrorCode::UnknownInventoryAccount);
        let data = info.try_borrow_data()?;
        require!(data.len() >= 8, ErrorCode::UnknownInventoryAccount);
        if &data[..8] == TicketLevel::DISCRIMINATOR {
            let account = TicketLevel::try_deserialize(&mut &data[..])?;
            require!(account.game == *game, ErrorCode::ItemGameMismatch);
            snapshot.levels.push(Loaded { index, key: info.key(), account });
        } else if &data[..8] == TicketGroup::DISCRIMINATOR {
            let account = TicketGroup::try_deserialize(&mut &data[..])?;
            require!(account.game == *game, ErrorCode::ItemGameMismatch);
            snapshot.groups.push(Loaded { index, key: info.key(), account });
        } else if &data[..8] == SpecialPrize::DISCRIMINATOR {
            let account = SpecialPrize::try_deserialize(&mut &data[..])?;
            require!(account.game == *game, ErrorCode::ItemGameMismatch);
            snapshot.prizes.push(Loaded { index, key: info.key(), account });
        } else if &data[..8] == CardBreak::DISCRIMINATOR {
            let account = CardBreak::try_deserialize(&mut &data[..])?;
            require!(account.game == *game, ErrorCode::ItemGameMismatch);
            snapshot.breaks.push(Loaded { index, key: info.key(), account });
        } else {
            return err!(ErrorCode::UnknownInventoryAccount);
        }
    }
    Ok(snapshot)
}

/// Serializes `account` back into `info`, discriminator included. The
/// account was created at a fixed size, so the payload must still fit.
pub fn store_account<T: AccountSerialize>(info: &AccountInfo, account: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut serialized = Vec::with_capacity(data.len());
    account.try_serialize(&mut serialized)?;
    if serialized.len() > data.len() {
        return Err(ProgramError::AccountDataTooSmall.into());
    }
    data[..serialized.len()].copy_from_slice(&serialized);
    Ok(())
}

impl InventorySnapshot {
    pub fn priced_levels(&self) -> Vec<PricedItem> {
        self.levels
            .iter()
            .map(|l| PricedItem {
                unit_value: l.account.price_per_seat,
                quantity: l.account.quantity,
                available: l.account.status == ItemStatus::Available,
                available_units: l.account.available_units,
            })
            .collect()
    }

    pub fn priced_groups(&self) -> Vec<PricedItem> {
        self.groups
            .iter()
            .map(|g| PricedItem {
                unit_value: g.account.price_per_seat,
                quantity: g.account.quantity,
                available: g.account.status == ItemStatus::Available,
                available_units: g.account.available_units,
            })
            .collect()
    }

    pub fn priced_breaks(&self) -> Vec<PricedItem> {
        self.breaks
            .iter()
            .map(|b| PricedItem {
                unit_value: b.account.break_value,
                quantity: b.account.quantity,
                available: b.account.status == ItemStatus::Available,
                available_units: b.account.available_units,
            })
            .collect()
    }

    /// Special prizes price on the memorabilia side while they are
    /// primaries; backups stay out of pricing until promoted.
    pub fn priced_prizes(&self) -> Vec<PricedItem> {
        self.prizes
            .iter()
            .map(|p| PricedItem {
                unit_value: p.account.value,
                quantity: p.account.quantity,
                available: !p.account.is_backup,
                available_units: p.account.available_units,
            })
            .collect()
    }

    /// Ticket-side pool candidates: sellable levels and groups plus
    /// listed special prizes, which take the ticket slot of a bundle.
    pub fn ticket_candidates(&self) -> Vec<TicketCandidate> {
        let mut candidates = Vec::new();
        for l in self.levels.iter().filter(|l| l.account.is_available()) {
            candidates.push(TicketCandidate {
                key: l.key,
                side: TicketSide::Level,
                unit_value: l.account.price_per_seat,
                quantity: l.account.quantity,
                available_units: l.account.available_units,
                tier_level: l.account.tier_level,
            });
        }
        for g in self.groups.iter().filter(|g| g.account.is_available()) {
            candidates.push(TicketCandidate {
                key: g.key,
                side: TicketSide::Group,
                unit_value: g.account.price_per_seat,
                quantity: g.account.quantity,
                available_units: g.account.available_units,
                tier_level: g.account.tier_level,
            });
        }
        for p in self.prizes.iter().filter(|p| p.account.is_listed()) {
            candidates.push(TicketCandidate {
                key: p.key,
                side: TicketSide::Special,
                unit_value: p.account.value,
                quantity: p.account.quantity,
                available_units: p.account.available_units,
                tier_level: TierLevel::classify(p.account.value).0,
            });
        }
        candidates
    }

    pub fn break_candidates(&self) -> Vec<BreakCandidate> {
        self.breaks
            .iter()
            .filter(|b| b.account.is_available())
            .map(|b| BreakCandidate {
                key: b.key,
                value: b.account.break_value,
                quantity: b.account.quantity,
                available_units: b.account.available_units,
                available_packs: b.account.available_packs,
            })
            .collect()
    }

    /// Levels and groups classified VIP, flattened for the promotion
    /// planner regardless of current stock.
    pub fn vip_views(&self) -> Vec<VipItemView> {
        let mut views = Vec::new();
        for l in self.levels.iter().filter(|l| l.account.tier_level == TierLevel::VipItem) {
            views.push(VipItemView {
                key: l.key,
                tier_priority: l.account.tier_priority,
                quantity: l.account.quantity,
            });
        }
        for g in self.groups.iter().filter(|g| g.account.tier_level == TierLevel::VipItem) {
            views.push(VipItemView {
                key: g.key,
                tier_priority: g.account.tier_priority,
                quantity: g.account.quantity,
            });
        }
        views
    }

    pub fn prize_views(&self) -> Vec<PrizeView> {
        self.prizes
            .iter()
            .map(|p| PrizeView {
                key: p.key,
                quantity: p.account.quantity,
                is_backup: p.account.is_backup,
                backup_for: p.account.backup_for,
            })
            .collect()
    }
}
