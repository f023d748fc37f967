use anchor_lang::prelude::*;

use crate::constants::MAX_BUNDLES_PER_POOL;
use crate::errors::ErrorCode;
use crate::state::prize_pool::Bundle;
use crate::state::tiers::{unit_mask_allows, PackTier, TicketSide, TierLevel};

/// Ticket-side candidate for pool generation.
#[derive(Clone, Debug)]
pub struct TicketCandidate {
    pub key: Pubkey,
    pub side: TicketSide,
    /// Per-seat price for levels/groups, unit value for special prizes
    pub unit_value: u64,
    pub quantity: u32,
    pub available_units: u8,
    pub tier_level: TierLevel,
}

impl TicketCandidate {
    /// Ticket-side value at `bundle_size` and the seats it consumes. A
    /// special prize replaces the seats outright, one prize unit for the
    /// whole ticket side.
    fn ticket_side_value(&self, bundle_size: u8) -> Result<(u64, u8)> {
        match self.side {
            TicketSide::Special => Ok((self.unit_value, 0)),
            TicketSide::Level | TicketSide::Group => {
                let value = self
                    .unit_value
                    .checked_mul(bundle_size as u64)
                    .ok_or(ErrorCode::ArithmeticOverflow)?;
                Ok((value, bundle_size))
            }
        }
    }
}

/// Memorabilia-side candidate for pool generation.
#[derive(Clone, Debug)]
pub struct BreakCandidate {
    pub key: Pubkey,
    pub value: u64,
    pub quantity: u32,
    pub available_units: u8,
    pub available_packs: u8,
}

/// Deterministically pairs eligible ticket-side candidates with eligible
/// card breaks into at most `count` candidate bundles for `bundle_size`.
///
/// Tickets are taken value-descending and cycled; each bundle takes the
/// next break (cycling) whose pack mask admits the bundle's pack tier.
/// Bundles in a pool are alternatives for a single draw, so a candidate
/// may appear in more than one bundle.
pub fn build_bundles(
    ticket_candidates: &[TicketCandidate],
    break_candidates: &[BreakCandidate],
    bundle_size: u8,
    count: u8,
) -> Result<Vec<Bundle>> {
    let target = (count as usize).min(MAX_BUNDLES_PER_POOL);

    let mut tickets: Vec<&TicketCandidate> = ticket_candidates
        .iter()
        .filter(|t| t.quantity > 0 && unit_mask_allows(t.available_units, bundle_size))
        .collect();
    if tickets.is_empty() || target == 0 {
        return Ok(Vec::new());
    }
    // Highest value first; key order breaks ties so regeneration is stable.
    tickets.sort_by(|a, b| b.unit_value.cmp(&a.unit_value).then(a.key.cmp(&b.key)));

    let mut eligible_breaks: Vec<&BreakCandidate> = break_candidates
        .iter()
        .filter(|b| b.quantity > 0 && unit_mask_allows(b.available_units, bundle_size))
        .collect();
    eligible_breaks.sort_by(|a, b| b.value.cmp(&a.value).then(a.key.cmp(&b.key)));

    let mut bundles = Vec::with_capacity(target);
    let mut break_cursor = 0usize;
    for slot in 0..target {
        let ticket = tickets[slot % tickets.len()];
        let (ticket_value, seats) = ticket.ticket_side_value(bundle_size)?;
        let pack_tier = PackTier::for_ticket_tier(ticket.tier_level);

        let mut memorabilia_item = None;
        let mut memorabilia_value = 0u64;
        // At most one full cycle looking for a break this pack admits.
        for _ in 0..eligible_breaks.len() {
            let candidate = eligible_breaks[break_cursor % eligible_breaks.len()];
            break_cursor += 1;
            if candidate.available_packs & pack_tier.mask_bit() != 0 {
                memorabilia_item = Some(candidate.key);
                memorabilia_value = candidate.value;
                break;
            }
        }

        let bundle_value = ticket_value
            .checked_add(memorabilia_value)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        bundles.push(Bundle {
            ticket_side: ticket.side,
            ticket_item: ticket.key,
            seats,
            ticket_value,
            memorabilia_item,
            memorabilia_value,
            pack_tier,
            bundle_value,
        });
    }
    Ok(bundles)
}

/// Sum of bundle values, for pool accounting.
pub fn pool_total_value(bundles: &[Bundle]) -> Result<u64> {
    let mut total = 0u64;
    for bundle in bundles {
        total = total
            .checked_add(bundle.bundle_value)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tiers::{available_units_for_quantity, ALL_PACKS_MASK};

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn level(n: u8, price: u64, quantity: u32) -> TicketCandidate {
        TicketCandidate {
            key: key(n),
            side: TicketSide::Level,
            unit_value: price,
            quantity,
            available_units: available_units_for_quantity(quantity),
            tier_level: TierLevel::classify(price).0,
        }
    }

    fn special(n: u8, value: u64, quantity: u32) -> TicketCandidate {
        TicketCandidate {
            key: key(n),
            side: TicketSide::Special,
            unit_value: value,
            quantity,
            available_units: available_units_for_quantity(quantity),
            tier_level: TierLevel::classify(value).0,
        }
    }

    fn card_break(n: u8, value: u64, quantity: u32, packs: u8) -> BreakCandidate {
        BreakCandidate {
            key: key(n),
            value,
            quantity,
            available_units: available_units_for_quantity(quantity),
            available_packs: packs,
        }
    }

    #[test]
    fn pairing_is_deterministic() {
        let tickets = [level(1, 60_000, 8), level(2, 25_000, 8), level(3, 10_000, 8)];
        let breaks = [
            card_break(4, 5_000, 8, ALL_PACKS_MASK),
            card_break(5, 2_000, 8, ALL_PACKS_MASK),
        ];
        let first = build_bundles(&tickets, &breaks, 2, 6).unwrap();
        let second = build_bundles(&tickets, &breaks, 2, 6).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn tickets_are_taken_value_descending() {
        let tickets = [level(1, 10_000, 8), level(2, 60_000, 8)];
        let bundles = build_bundles(&tickets, &[], 1, 2).unwrap();
        assert_eq!(bundles[0].ticket_item, key(2));
        assert_eq!(bundles[1].ticket_item, key(1));
    }

    #[test]
    fn size_mask_gates_ticket_eligibility() {
        // A pair-only group must not appear in 1x bundles.
        let tickets = [level(1, 10_000, 2)];
        assert!(build_bundles(&tickets, &[], 1, 4).unwrap().is_empty());
        let bundles = build_bundles(&tickets, &[], 2, 4).unwrap();
        assert_eq!(bundles.len(), 4);
        assert_eq!(bundles[0].seats, 2);
        assert_eq!(bundles[0].ticket_value, 20_000);
    }

    #[test]
    fn pack_tier_gates_memorabilia_pairing() {
        // VIP ticket side carries a gold pack; a blue-only break cannot
        // pair into it.
        let tickets = [level(1, 60_000, 8)];
        let blue_only = [card_break(2, 5_000, 8, PackTier::Blue.mask_bit())];
        let bundles = build_bundles(&tickets, &blue_only, 1, 2).unwrap();
        assert_eq!(bundles[0].pack_tier, PackTier::Gold);
        assert_eq!(bundles[0].memorabilia_item, None);
        assert_eq!(bundles[0].bundle_value, 60_000);

        let gold_ok = [card_break(2, 5_000, 8, ALL_PACKS_MASK)];
        let bundles = build_bundles(&tickets, &gold_ok, 1, 2).unwrap();
        assert_eq!(bundles[0].memorabilia_item, Some(key(2)));
        assert_eq!(bundles[0].bundle_value, 65_000);
    }

    #[test]
    fn candidates_cycle_when_count_exceeds_supply() {
        let tickets = [level(1, 30_000, 8), level(2, 20_000, 8)];
        let bundles = build_bundles(&tickets, &[], 1, 5).unwrap();
        assert_eq!(bundles.len(), 5);
        assert_eq!(bundles[0].ticket_item, bundles[2].ticket_item);
        assert_eq!(bundles[1].ticket_item, bundles[3].ticket_item);
    }

    #[test]
    fn special_prize_replaces_seats() {
        let tickets = [special(1, 75_000, 5)];
        let bundles = build_bundles(&tickets, &[], 3, 1).unwrap();
        assert_eq!(bundles[0].ticket_side, TicketSide::Special);
        assert_eq!(bundles[0].seats, 0);
        assert_eq!(bundles[0].ticket_value, 75_000);
        assert_eq!(bundles[0].pack_tier, PackTier::Gold);
    }

    #[test]
    fn no_eligible_tickets_yields_empty_pool() {
        let breaks = [card_break(1, 5_000, 8, ALL_PACKS_MASK)];
        assert!(build_bundles(&[], &breaks, 1, 4).unwrap().is_empty());
    }

    #[test]
    fn count_is_capped_at_pool_limit() {
        let tickets = [level(1, 10_000, 8)];
        let bundles = build_bundles(&tickets, &[], 1, u8::MAX).unwrap();
        assert_eq!(bundles.len(), MAX_BUNDLES_PER_POOL);
    }

    #[test]
    fn total_value_sums_bundles() {
        let tickets = [level(1, 10_000, 8)];
        let breaks = [card_break(2, 2_500, 8, ALL_PACKS_MASK)];
        let bundles = build_bundles(&tickets, &breaks, 2, 3).unwrap();
        assert_eq!(pool_total_value(&bundles).unwrap(), 3 * (20_000 + 2_500));
    }
}
