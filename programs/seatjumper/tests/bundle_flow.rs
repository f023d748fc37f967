use anchor_lang::prelude::*;

use seatjumper::constants::BUNDLE_SIZE_COUNT;
use seatjumper::state::*;
use seatjumper::utils::pools::{build_bundles, pool_total_value, BreakCandidate, TicketCandidate};
use seatjumper::utils::pricing::{
    calculate_bundle_pricing, calculate_bundle_specific_pricing, PricedItem,
};
use seatjumper::utils::promotion::{
    find_backup_for, plan_backup_activations, plan_vip_sweep, PrizeView, VipItemView,
};

#[cfg(test)]
mod tests {
    use super::*;

    // Helper: Generate a test pubkey
    fn test_pubkey(seed: u8) -> Pubkey {
        Pubkey::new_from_array([seed; 32])
    }

    // Helper: Get a test clock time
    fn test_time() -> i64 {
        1_700_000_000 // Fixed timestamp for deterministic tests
    }

    // Helper: a freshly created game, one inventory version ahead of its
    // pricing so nothing can sell before the first recalculation
    fn test_game() -> Game {
        Game {
            game_id: "nyk-vs-bos-0114".to_string(),
            name: "Knicks vs Celtics".to_string(),
            venue: "Madison Square Garden".to_string(),
            city: "New York".to_string(),
            state_code: "NY".to_string(),
            sport: "NBA".to_string(),
            event_date: test_time(),
            status: GameStatus::Draft,
            max_entries: 100,
            current_entries: 0,
            margin_bps: 3_000,
            avg_ticket_price: 0,
            avg_break_value: 0,
            spin_price_per_bundle: 0,
            spin_prices: [0; BUNDLE_SIZE_COUNT],
            inventory_version: 1,
            priced_version: 0,
            bump: 255,
        }
    }

    fn test_level(game: Pubkey, id: &str, quantity: u32, price_per_seat: u64) -> TicketLevel {
        let (tier_level, tier_priority) = TierLevel::classify(price_per_seat);
        let mut level = TicketLevel {
            game,
            level_id: id.to_string(),
            name: format!("Level {}", id),
            quantity,
            price_per_seat,
            status: ItemStatus::Available,
            available_units: 0,
            tier_level,
            tier_priority,
            bump: 255,
        };
        level.recompute_available_units();
        level
    }

    fn test_break(game: Pubkey, id: &str, quantity: u32, break_value: u64) -> CardBreak {
        let (tier_level, tier_priority) = TierLevel::classify(break_value);
        let mut card_break = CardBreak {
            game,
            break_id: id.to_string(),
            title: format!("Break {}", id),
            break_value,
            quantity,
            status: ItemStatus::Available,
            available_units: 0,
            available_packs: ALL_PACKS_MASK,
            tier_level,
            tier_priority,
            bump: 255,
        };
        card_break.recompute_available_units();
        card_break
    }

    fn test_prize(
        game: Pubkey,
        id: &str,
        quantity: u32,
        value: u64,
        is_backup: bool,
        backup_for: Option<Pubkey>,
    ) -> SpecialPrize {
        let mut prize = SpecialPrize {
            game,
            prize_id: id.to_string(),
            name: format!("Prize {}", id),
            prize_type: "SIGNED_MEMORABILIA".to_string(),
            quantity,
            value,
            available_units: 0,
            is_backup,
            backup_for,
            bump: 255,
        };
        prize.recompute_available_units();
        prize
    }

    // Helper: a sellable priced item with its mask derived from quantity
    fn priced(unit_value: u64, quantity: u32) -> PricedItem {
        PricedItem {
            unit_value,
            quantity,
            available: quantity > 0,
            available_units: available_units_for_quantity(quantity),
        }
    }

    #[test]
    fn test_pricing_cycle_updates_quote_and_version() {
        let mut game = test_game();
        assert!(game.pricing_is_stale());

        // Upper deck level, one VIP pair, a common break, one gold prize
        let levels = vec![priced(15_000, 10)];
        let groups = vec![priced(60_000, 2)];
        let breaks = vec![priced(8_000, 5)];
        let prizes = vec![priced(25_000, 1)];

        let summary = calculate_bundle_pricing(&groups, &levels, &breaks, &prizes, 3_000).unwrap();
        assert_eq!(summary.avg_ticket_price, 37_500); // mean of the two listings
        assert_eq!(summary.avg_break_value, 16_500);
        assert_eq!(summary.total_bundle_value, 54_000);
        assert_eq!(summary.spin_price_per_bundle, 70_200); // 30% margin
        assert_eq!(summary.available_tickets, 12);
        assert_eq!(summary.available_breaks, 6);

        // The pair-only group drops out of 1x; the single-unit prize and
        // the pair both drop out of 3x/4x
        let spin_prices =
            calculate_bundle_specific_pricing(&groups, &levels, &breaks, &prizes, 3_000).unwrap();
        assert_eq!(spin_prices, [40_950, 59_150, 29_900, 29_900]);

        // Publishing the quote pins it to the inventory version it saw
        game.avg_ticket_price = summary.avg_ticket_price;
        game.avg_break_value = summary.avg_break_value;
        game.spin_price_per_bundle = summary.spin_price_per_bundle;
        game.spin_prices = spin_prices;
        game.priced_version = game.inventory_version;
        assert!(!game.pricing_is_stale());

        // Any later inventory mutation reopens the pricing cycle
        game.touch_inventory();
        assert!(game.pricing_is_stale());
    }

    #[test]
    fn test_spin_consumption_invalidates_pools() {
        let game_key = test_pubkey(1);
        let mut game = test_game();
        game.status = GameStatus::Active;
        game.priced_version = game.inventory_version;
        game.spin_prices = [20_000, 39_650, 50_000, 60_000];

        let level_key = test_pubkey(2);
        let break_key = test_pubkey(3);
        let mut level = test_level(game_key, "upper-deck", 4, 15_000);
        let mut card_break = test_break(game_key, "panini-prizm", 2, 8_000);

        let tickets = vec![TicketCandidate {
            key: level_key,
            side: TicketSide::Level,
            unit_value: level.price_per_seat,
            quantity: level.quantity,
            available_units: level.available_units,
            tier_level: level.tier_level,
        }];
        let breaks = vec![BreakCandidate {
            key: break_key,
            value: card_break.break_value,
            quantity: card_break.quantity,
            available_units: card_break.available_units,
            available_packs: card_break.available_packs,
        }];

        let bundles = build_bundles(&tickets, &breaks, 2, 3).unwrap();
        assert_eq!(bundles.len(), 3);
        assert_eq!(bundles[0].seats, 2);
        assert_eq!(bundles[0].ticket_value, 30_000);
        assert_eq!(bundles[0].memorabilia_value, 8_000);
        assert_eq!(bundles[0].bundle_value, 38_000);
        assert_eq!(bundles[0].pack_tier, PackTier::Blue);

        let pool = PrizePool {
            game: game_key,
            bundle_size: 2,
            inventory_version: game.inventory_version,
            spin_price: game.spin_prices[1],
            total_value: pool_total_value(&bundles).unwrap(),
            generated_at: test_time(),
            bundles,
            bump: 255,
        };
        assert_eq!(pool.total_value, 114_000);
        assert!(!pool.is_stale(&game));

        // Commit one spin of bundle 0: two seats and one break go
        level.consume(2).unwrap();
        card_break.consume_one().unwrap();
        game.current_entries += 1;
        game.touch_inventory();

        assert_eq!(level.quantity, 2);
        assert_eq!(level.available_units, 0b0010); // pair only now
        assert_eq!(card_break.quantity, 1);
        assert_eq!(card_break.available_units, 0b0001);
        assert!(pool.is_stale(&game));
        assert!(game.pricing_is_stale());
    }

    #[test]
    fn test_depleted_level_goes_sold_and_restock_revives_it() {
        let mut level = test_level(test_pubkey(1), "floor", 2, 80_000);
        level.consume(2).unwrap();
        assert_eq!(level.quantity, 0);
        assert_eq!(level.status, ItemStatus::Sold);
        assert_eq!(level.available_units, 0);
        assert!(!level.is_available());

        level.restock(3).unwrap();
        assert_eq!(level.quantity, 3);
        assert_eq!(level.status, ItemStatus::Available);
        assert_eq!(level.available_units, 0b0100);
        assert!(level.is_available());

        // Oversell is rejected without touching the count
        assert!(level.consume(4).is_err());
        assert_eq!(level.quantity, 3);
    }

    #[test]
    fn test_vip_promotion_swaps_ranks_once() {
        let game_key = test_pubkey(1);
        let key_a = test_pubkey(2);
        let key_b = test_pubkey(3);

        let mut level_a = test_level(game_key, "courtside", 2, 60_000);
        let mut level_b = test_level(game_key, "club-box", 5, 55_000);
        level_b.tier_priority = 2; // held back behind courtside
        level_a.consume(2).unwrap();

        let views = vec![
            VipItemView {
                key: key_a,
                tier_priority: level_a.tier_priority,
                quantity: level_a.quantity,
            },
            VipItemView {
                key: key_b,
                tier_priority: level_b.tier_priority,
                quantity: level_b.quantity,
            },
        ];

        let (promoted, demoted) = plan_vip_sweep(&views).unwrap();
        assert_eq!(promoted.key, key_b);
        assert_eq!(promoted.new_priority, 1);
        assert_eq!(demoted.key, key_a);
        assert_eq!(demoted.new_priority, 2);

        // Apply the swap and sweep again: ranking is healthy, nothing moves
        level_b.tier_priority = promoted.new_priority;
        level_a.tier_priority = demoted.new_priority;
        let views = vec![
            VipItemView {
                key: key_a,
                tier_priority: level_a.tier_priority,
                quantity: level_a.quantity,
            },
            VipItemView {
                key: key_b,
                tier_priority: level_b.tier_priority,
                quantity: level_b.quantity,
            },
        ];
        assert!(plan_vip_sweep(&views).is_none());
    }

    #[test]
    fn test_backup_prize_chain() {
        let game_key = test_pubkey(1);
        let primary_key = test_pubkey(2);
        let backup_key = test_pubkey(3);

        let mut primary = test_prize(game_key, "jersey-captain", 1, 150_000, false, None);
        let mut backup = test_prize(game_key, "jersey-rookie", 1, 140_000, true, Some(primary_key));
        assert!(primary.is_listed());
        assert!(!backup.is_listed()); // held back until activated

        // Last unit of the primary is won
        primary.consume_one();
        assert!(primary.is_depleted_primary());
        assert_eq!(primary.available_units, 0);

        let views = vec![
            PrizeView {
                key: primary_key,
                quantity: primary.quantity,
                is_backup: primary.is_backup,
                backup_for: primary.backup_for,
            },
            PrizeView {
                key: backup_key,
                quantity: backup.quantity,
                is_backup: backup.is_backup,
                backup_for: backup.backup_for,
            },
        ];
        assert_eq!(find_backup_for(&primary_key, &views), Some(backup_key));
        assert_eq!(plan_backup_activations(&views), vec![(primary_key, backup_key)]);

        // Promotion clears the link and lists the backup
        backup.promote();
        assert!(!backup.is_backup);
        assert!(backup.backup_for.is_none());
        assert!(backup.is_listed());

        let views = vec![
            PrizeView {
                key: primary_key,
                quantity: primary.quantity,
                is_backup: primary.is_backup,
                backup_for: primary.backup_for,
            },
            PrizeView {
                key: backup_key,
                quantity: backup.quantity,
                is_backup: backup.is_backup,
                backup_for: backup.backup_for,
            },
        ];
        assert!(plan_backup_activations(&views).is_empty());
    }

    #[test]
    fn test_repair_recomputes_drifted_masks() {
        let game_key = test_pubkey(1);

        let mut level = test_level(game_key, "mezzanine", 3, 12_000);
        level.available_units = unit_mask_all(); // drifted: claims 4x eligibility
        level.recompute_available_units();
        assert_eq!(level.available_units, 0b0100);

        let mut card_break = test_break(game_key, "topps-chrome", 0, 9_000);
        card_break.available_units = 0b0001; // drifted: claims stock it lacks
        card_break.recompute_available_units();
        assert_eq!(card_break.available_units, 0);
    }

    #[test]
    fn test_game_lifecycle_transitions() {
        let mut game = test_game();
        assert!(!game.can_accept_entries()); // drafts never sell

        assert!(game.can_transition_to(GameStatus::Active));
        assert!(game.can_transition_to(GameStatus::Closed));

        game.status = GameStatus::Active;
        assert!(game.can_accept_entries());
        assert!(!game.can_transition_to(GameStatus::Draft));
        assert!(game.can_transition_to(GameStatus::Closed));

        game.current_entries = game.max_entries;
        assert!(!game.can_accept_entries());

        game.status = GameStatus::Closed;
        assert!(!game.can_transition_to(GameStatus::Draft));
        assert!(!game.can_transition_to(GameStatus::Active));
        assert!(!game.can_accept_entries());
    }
}
