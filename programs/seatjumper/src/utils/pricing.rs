use anchor_lang::prelude::*;

use crate::constants::{BPS_SCALE, BUNDLE_SIZE_COUNT, MAX_BUNDLE_SIZE, MIN_BUNDLE_SIZE};
use crate::errors::ErrorCode;
use crate::state::tiers::unit_mask_allows;

/// One inventory item as the pricing engine sees it. `available` carries
/// the status/backup filtering decided by the snapshot layer; the engine
/// additionally requires positive quantity.
#[derive(Clone, Copy, Debug)]
pub struct PricedItem {
    /// Per-seat price or unit value, cents
    pub unit_value: u64,
    pub quantity: u32,
    pub available: bool,
    pub available_units: u8,
}

impl PricedItem {
    fn is_sellable(&self) -> bool {
        self.available && self.quantity > 0
    }
}

/// Aggregate pricing outputs, persisted onto the game by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PricingSummary {
    pub avg_ticket_price: u64,
    pub avg_break_value: u64,
    pub total_bundle_value: u64,
    pub spin_price_per_bundle: u64,
    /// Remaining units across the ticket side
    pub available_tickets: u64,
    /// Remaining units across the memorabilia side
    pub available_breaks: u64,
}

#[derive(Default)]
struct SideTally {
    total_value: u128,
    item_count: u64,
    unit_count: u64,
}

impl SideTally {
    fn add(&mut self, item: &PricedItem) -> Result<()> {
        self.total_value = self
            .total_value
            .checked_add(item.unit_value as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        self.item_count += 1;
        self.unit_count = self
            .unit_count
            .checked_add(item.quantity as u64)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(())
    }

    /// Mean unit value; an empty side averages to zero rather than
    /// dividing by zero.
    fn average(&self) -> u64 {
        if self.item_count == 0 {
            0
        } else {
            (self.total_value / self.item_count as u128) as u64
        }
    }
}

fn tally_sellable<'a, I>(items: I) -> Result<SideTally>
where
    I: IntoIterator<Item = &'a PricedItem>,
{
    let mut tally = SideTally::default();
    for item in items.into_iter().filter(|i| i.is_sellable()) {
        tally.add(item)?;
    }
    Ok(tally)
}

/// Marks a value up by `margin_bps` basis points.
pub fn apply_margin(value_cents: u64, margin_bps: u16) -> Result<u64> {
    let marked_up = (value_cents as u128)
        .checked_mul(BPS_SCALE as u128 + margin_bps as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_div(BPS_SCALE as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    u64::try_from(marked_up).map_err(|_| error!(ErrorCode::ArithmeticOverflow))
}

/// Aggregate pricing across the whole available inventory: mean ticket
/// price plus mean break value, marked up by the margin. The ticket side
/// is groups and levels; the memorabilia side is card breaks and listed
/// special prizes.
pub fn calculate_bundle_pricing(
    ticket_groups: &[PricedItem],
    ticket_levels: &[PricedItem],
    card_breaks: &[PricedItem],
    special_prizes: &[PricedItem],
    margin_bps: u16,
) -> Result<PricingSummary> {
    let tickets = tally_sellable(ticket_groups.iter().chain(ticket_levels))?;
    let breaks = tally_sellable(card_breaks.iter().chain(special_prizes))?;

    let avg_ticket_price = tickets.average();
    let avg_break_value = breaks.average();
    let total_bundle_value = avg_ticket_price
        .checked_add(avg_break_value)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    Ok(PricingSummary {
        avg_ticket_price,
        avg_break_value,
        total_bundle_value,
        spin_price_per_bundle: apply_margin(total_bundle_value, margin_bps)?,
        available_tickets: tickets.unit_count,
        available_breaks: breaks.unit_count,
    })
}

/// Per-bundle-size pricing. Each size restricts every collection to items
/// whose `available_units` admit that size, then applies the same
/// average/margin formula, so each size's price reflects its own eligible
/// pool rather than a single blended number.
pub fn calculate_bundle_specific_pricing(
    ticket_groups: &[PricedItem],
    ticket_levels: &[PricedItem],
    card_breaks: &[PricedItem],
    special_prizes: &[PricedItem],
    margin_bps: u16,
) -> Result<[u64; BUNDLE_SIZE_COUNT]> {
    let mut prices = [0u64; BUNDLE_SIZE_COUNT];
    for size in MIN_BUNDLE_SIZE..=MAX_BUNDLE_SIZE {
        let admits = |item: &&PricedItem| unit_mask_allows(item.available_units, size);
        let tickets = tally_sellable(ticket_groups.iter().chain(ticket_levels).filter(admits))?;
        let breaks = tally_sellable(card_breaks.iter().chain(special_prizes).filter(admits))?;
        let total = tickets
            .average()
            .checked_add(breaks.average())
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        prices[(size - 1) as usize] = apply_margin(total, margin_bps)?;
    }
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tiers::available_units_for_quantity;

    fn item(unit_value: u64, quantity: u32) -> PricedItem {
        PricedItem {
            unit_value,
            quantity,
            available: true,
            available_units: available_units_for_quantity(quantity),
        }
    }

    fn item_with_units(unit_value: u64, quantity: u32, available_units: u8) -> PricedItem {
        PricedItem {
            unit_value,
            quantity,
            available: true,
            available_units,
        }
    }

    #[test]
    fn margin_markup_matches_expected() {
        // avg ticket $100.00, avg break $35.00, 30% margin -> $175.50
        let groups = [item(10_000, 10)];
        let breaks = [item(3_500, 10)];
        let summary = calculate_bundle_pricing(&groups, &[], &breaks, &[], 3_000).unwrap();
        assert_eq!(summary.avg_ticket_price, 10_000);
        assert_eq!(summary.avg_break_value, 3_500);
        assert_eq!(summary.total_bundle_value, 13_500);
        assert_eq!(summary.spin_price_per_bundle, 17_550);
    }

    #[test]
    fn empty_ticket_side_averages_to_zero() {
        let breaks = [item(3_500, 5)];
        let summary = calculate_bundle_pricing(&[], &[], &breaks, &[], 3_000).unwrap();
        assert_eq!(summary.avg_ticket_price, 0);
        assert_eq!(summary.total_bundle_value, 3_500);
        assert_eq!(summary.available_tickets, 0);
    }

    #[test]
    fn fully_empty_inventory_prices_to_zero() {
        let summary = calculate_bundle_pricing(&[], &[], &[], &[], 3_000).unwrap();
        assert_eq!(summary, PricingSummary::default());
    }

    #[test]
    fn depleted_and_unavailable_items_are_excluded() {
        let groups = [
            item(10_000, 4),
            item(90_000, 0),
            PricedItem {
                unit_value: 90_000,
                quantity: 4,
                available: false,
                available_units: 0b1000,
            },
        ];
        let summary = calculate_bundle_pricing(&groups, &[], &[], &[], 0).unwrap();
        assert_eq!(summary.avg_ticket_price, 10_000);
        assert_eq!(summary.available_tickets, 4);
    }

    #[test]
    fn averages_span_both_collections_per_side() {
        let groups = [item(10_000, 6)];
        let levels = [item(20_000, 6)];
        let breaks = [item(2_000, 6)];
        let prizes = [item(4_000, 6)];
        let summary = calculate_bundle_pricing(&groups, &levels, &breaks, &prizes, 0).unwrap();
        assert_eq!(summary.avg_ticket_price, 15_000);
        assert_eq!(summary.avg_break_value, 3_000);
        assert_eq!(summary.available_tickets, 12);
        assert_eq!(summary.available_breaks, 12);
    }

    #[test]
    fn single_only_item_does_not_move_larger_sizes() {
        let levels = [item_with_units(40_000, 10, 0b1111)];
        let breaks = [item(3_500, 10)];
        let before = calculate_bundle_specific_pricing(&[], &levels, &breaks, &[], 3_000).unwrap();

        let groups = [item_with_units(10_000, 1, 0b0001)];
        let after = calculate_bundle_specific_pricing(&groups, &levels, &breaks, &[], 3_000).unwrap();

        assert_eq!(before[1], after[1], "2x price must ignore single-only items");
        assert_eq!(before[2], after[2]);
        assert_eq!(before[3], after[3]);
        assert_ne!(before[0], after[0], "1x price must include the new item");
    }

    #[test]
    fn per_size_prices_draw_from_their_own_pool() {
        let levels = [
            item_with_units(10_000, 1, 0b0001),
            item_with_units(20_000, 2, 0b0010),
            item_with_units(30_000, 3, 0b0100),
            item_with_units(40_000, 4, 0b1000),
        ];
        let prices = calculate_bundle_specific_pricing(&[], &levels, &[], &[], 0).unwrap();
        assert_eq!(prices, [10_000, 20_000, 30_000, 40_000]);
    }

    #[test]
    fn size_with_no_eligible_inventory_prices_to_zero() {
        let levels = [item_with_units(10_000, 1, 0b0001)];
        let prices = calculate_bundle_specific_pricing(&[], &levels, &[], &[], 3_000).unwrap();
        assert_eq!(prices[0], 13_000);
        assert_eq!(prices[1], 0);
        assert_eq!(prices[3], 0);
    }
}
