use anchor_lang::prelude::*;

/// VIP-tier item as the promotion planner sees it; ticket levels and
/// groups both flatten into this.
#[derive(Clone, Copy, Debug)]
pub struct VipItemView {
    pub key: Pubkey,
    pub tier_priority: u8,
    pub quantity: u32,
}

/// One rank reassignment to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityChange {
    pub key: Pubkey,
    pub new_priority: u8,
}

fn min_priority(items: &[VipItemView]) -> Option<u8> {
    items.iter().map(|i| i.tier_priority).min()
}

/// Plans the rank swap promoting the best live backup into the slot held
/// by `depleted`. Returns the (promoted, demoted) pair, or None when the
/// top rank still has live inventory, `depleted` does not hold the top
/// rank, or no live backup exists. Callers treat None as a logged no-op.
///
/// A swap keeps the rank set intact, so repeated promotion can produce
/// neither duplicate nor gapped ranks.
pub fn plan_vip_promotion(
    items: &[VipItemView],
    depleted: &Pubkey,
) -> Option<(PriorityChange, PriorityChange)> {
    let depleted_view = items.iter().find(|i| i.key == *depleted)?;
    if depleted_view.quantity > 0 {
        return None;
    }
    let top = min_priority(items)?;
    if depleted_view.tier_priority > top {
        return None;
    }
    if items
        .iter()
        .any(|i| i.tier_priority == top && i.quantity > 0)
    {
        return None;
    }
    let backup = items
        .iter()
        .filter(|i| i.quantity > 0 && i.key != *depleted)
        .min_by(|a, b| {
            a.tier_priority
                .cmp(&b.tier_priority)
                .then(a.key.cmp(&b.key))
        })?;
    Some((
        PriorityChange {
            key: backup.key,
            new_priority: depleted_view.tier_priority,
        },
        PriorityChange {
            key: depleted_view.key,
            new_priority: backup.tier_priority,
        },
    ))
}

/// Sweep planner: if the top rank is fully depleted, plan a promotion for
/// its deterministically chosen depleted holder. Once a live item holds
/// the top rank this returns None, so the sweep is safe to repeat.
pub fn plan_vip_sweep(items: &[VipItemView]) -> Option<(PriorityChange, PriorityChange)> {
    let top = min_priority(items)?;
    let depleted_head = items
        .iter()
        .filter(|i| i.tier_priority == top && i.quantity == 0)
        .min_by(|a, b| a.key.cmp(&b.key))?;
    plan_vip_promotion(items, &depleted_head.key)
}

/// Special prize as the backup planner sees it.
#[derive(Clone, Copy, Debug)]
pub struct PrizeView {
    pub key: Pubkey,
    pub quantity: u32,
    pub is_backup: bool,
    pub backup_for: Option<Pubkey>,
}

/// Live backup registered for `primary`, if any. Key order breaks ties
/// deterministically when several backups point at the same primary.
pub fn find_backup_for(primary: &Pubkey, prizes: &[PrizeView]) -> Option<Pubkey> {
    prizes
        .iter()
        .filter(|p| p.is_backup && p.backup_for == Some(*primary) && p.quantity > 0)
        .min_by(|a, b| a.key.cmp(&b.key))
        .map(|p| p.key)
}

/// Pairs every depleted primary with its live backup. Promotion clears
/// the backup link, so a pair never shows up in a later sweep.
pub fn plan_backup_activations(prizes: &[PrizeView]) -> Vec<(Pubkey, Pubkey)> {
    prizes
        .iter()
        .filter(|p| !p.is_backup && p.quantity == 0)
        .filter_map(|primary| {
            find_backup_for(&primary.key, prizes).map(|backup| (primary.key, backup))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn vip(n: u8, tier_priority: u8, quantity: u32) -> VipItemView {
        VipItemView {
            key: key(n),
            tier_priority,
            quantity,
        }
    }

    fn prize(n: u8, quantity: u32, is_backup: bool, backup_for: Option<u8>) -> PrizeView {
        PrizeView {
            key: key(n),
            quantity,
            is_backup,
            backup_for: backup_for.map(key),
        }
    }

    #[test]
    fn depleted_head_swaps_with_next_ranked_backup() {
        let items = [vip(1, 1, 0), vip(2, 2, 5)];
        let (promoted, demoted) = plan_vip_promotion(&items, &key(1)).unwrap();
        assert_eq!(promoted, PriorityChange { key: key(2), new_priority: 1 });
        assert_eq!(demoted, PriorityChange { key: key(1), new_priority: 2 });
    }

    #[test]
    fn promotion_skips_depleted_backups() {
        let items = [vip(1, 1, 0), vip(2, 2, 0), vip(3, 3, 4)];
        let (promoted, demoted) = plan_vip_promotion(&items, &key(1)).unwrap();
        assert_eq!(promoted.key, key(3));
        assert_eq!(promoted.new_priority, 1);
        assert_eq!(demoted.new_priority, 3);
    }

    #[test]
    fn live_item_is_not_promoted_over() {
        let items = [vip(1, 1, 2), vip(2, 2, 5)];
        assert!(plan_vip_promotion(&items, &key(1)).is_none());
    }

    #[test]
    fn non_head_depletion_is_a_noop() {
        let items = [vip(1, 1, 5), vip(2, 2, 0), vip(3, 3, 4)];
        assert!(plan_vip_promotion(&items, &key(2)).is_none());
        assert!(plan_vip_sweep(&items).is_none());
    }

    #[test]
    fn no_live_backup_leaves_depleted_head_in_place() {
        let items = [vip(1, 1, 0), vip(2, 2, 0)];
        assert!(plan_vip_promotion(&items, &key(1)).is_none());
        assert!(plan_vip_sweep(&items).is_none());
    }

    #[test]
    fn sweep_is_idempotent_after_swap() {
        let mut items = [vip(1, 1, 0), vip(2, 2, 5)];
        let (promoted, demoted) = plan_vip_sweep(&items).unwrap();
        for item in items.iter_mut() {
            if item.key == promoted.key {
                item.tier_priority = promoted.new_priority;
            } else if item.key == demoted.key {
                item.tier_priority = demoted.new_priority;
            }
        }
        assert!(plan_vip_sweep(&items).is_none());
    }

    #[test]
    fn shared_top_rank_with_stock_is_healthy() {
        let items = [vip(1, 1, 0), vip(2, 1, 5)];
        assert!(plan_vip_promotion(&items, &key(1)).is_none());
        assert!(plan_vip_sweep(&items).is_none());
    }

    #[test]
    fn backup_lookup_requires_live_linked_backup() {
        let prizes = [
            prize(1, 0, false, None),
            prize(2, 3, true, Some(1)),
            prize(3, 0, true, Some(1)),
        ];
        assert_eq!(find_backup_for(&key(1), &prizes), Some(key(2)));
        assert_eq!(find_backup_for(&key(9), &prizes), None);
    }

    #[test]
    fn activation_plan_pairs_depleted_primaries_only() {
        let prizes = [
            prize(1, 0, false, None),
            prize(2, 3, true, Some(1)),
            prize(3, 4, false, None),
            prize(4, 2, true, Some(3)),
        ];
        let plans = plan_backup_activations(&prizes);
        assert_eq!(plans, vec![(key(1), key(2))]);
    }

    #[test]
    fn activation_plan_is_empty_after_promotion() {
        // Once the backup is promoted its link is gone; the primary stays
        // depleted but has nothing left to promote.
        let prizes = [prize(1, 0, false, None), prize(2, 3, false, None)];
        assert!(plan_backup_activations(&prizes).is_empty());
    }
}
