//! Grouping of item types that are the same shape up to rotation.

use crate::types::{Dimensions, ItemGroup};

/// Item groups whose dimensions coincide under some orientation. Members are
/// consumed front to back.
#[derive(Debug, Clone, PartialEq)]
pub struct CongruencyGroup {
    pub dimensions: Dimensions,
    pub item_groups: Vec<ItemGroup>,
}

impl CongruencyGroup {
    pub fn new(first: ItemGroup) -> Self {
        Self {
            dimensions: first.item.dimensions,
            item_groups: vec![first],
        }
    }

    /// Total over all members. Congruent demands may add up past `u32::MAX`.
    pub fn quantity(&self) -> u64 {
        self.item_groups.iter().map(|ig| u64::from(ig.quantity)).sum()
    }

    /// Remaining volume of all members, measured on the canonical shape.
    pub fn demand_volume(&self) -> f64 {
        self.dimensions.volume() * self.quantity() as f64
    }

    /// Splits `count` items off the front of the member list without
    /// changing the group. The member straddling the boundary contributes
    /// only the part that is needed.
    pub fn allocate(&self, count: u64) -> Vec<ItemGroup> {
        let mut remaining = count;
        let mut allocated = Vec::new();
        for ig in &self.item_groups {
            if remaining == 0 {
                break;
            }
            let take = take_from(ig.quantity, remaining);
            if take > 0 {
                allocated.push(ItemGroup::new(ig.item.clone(), take));
                remaining -= u64::from(take);
            }
        }
        allocated
    }

    /// Removes `count` items from the front of the member list, dropping
    /// members that run out.
    pub fn consume(&mut self, count: u64) {
        let mut remaining = count;
        for ig in &mut self.item_groups {
            if remaining == 0 {
                break;
            }
            let take = take_from(ig.quantity, remaining);
            ig.quantity -= take;
            remaining -= u64::from(take);
        }
        self.item_groups.retain(|ig| ig.quantity > 0);
    }
}

fn take_from(available: u32, wanted: u64) -> u32 {
    u32::try_from(wanted).map_or(available, |wanted| available.min(wanted))
}

/// Buckets item groups by shape. Groups appear in the order their first
/// member was seen, and members keep input order.
pub fn gather_congruency_groups(item_groups: &[ItemGroup]) -> Vec<CongruencyGroup> {
    let mut groups: Vec<CongruencyGroup> = Vec::new();
    for ig in item_groups {
        match groups.iter_mut().find(|cg| {
            cg.dimensions
                .orientation_to_be_same(&ig.item.dimensions)
                .is_some()
        }) {
            Some(cg) => cg.item_groups.push(ig.clone()),
            None => groups.push(CongruencyGroup::new(ig.clone())),
        }
    }
    groups
}
