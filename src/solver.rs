use crate::config::SolverConfig;
use crate::congruency::{CongruencyGroup, gather_congruency_groups};
use crate::error::{PackError, Result};
use crate::guillotine::{Space, SpacePool, best_split};
use crate::types::{
    Container, Dimensions, ItemGroup, PackRequest, PackedBox, PackedItems, Pattern, Solution,
};

/// Anything that turns a container catalog and a demand into placements.
///
/// The greedy [`Solver`] is the only engine in this crate; an exact backend
/// can sit behind the same call.
pub trait PackingEngine {
    fn pack(&self, containers: &[Container], demands: &[ItemGroup]) -> Result<Solution>;
}

/// Greedy, non-backtracking packer.
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Packs a request, using its own empty space ratio when it carries one.
    pub fn solve(&self, request: &PackRequest) -> Result<Solution> {
        let config = match request.empty_space_ratio {
            Some(ratio) => SolverConfig::new(ratio),
            None => self.config,
        };
        Solver::new(config).pack(&request.containers, &request.items)
    }

    fn validate(
        &self,
        containers: &[Container],
        demands: &[ItemGroup],
    ) -> Result<(Vec<Container>, Vec<ItemGroup>)> {
        let containers: Vec<Container> = containers.iter().filter(|c| c.enabled).cloned().collect();
        if containers.is_empty() {
            return Err(PackError::EmptyCatalog);
        }

        let demands: Vec<ItemGroup> = demands.iter().filter(|d| d.quantity > 0).cloned().collect();
        if demands.is_empty() {
            return Err(PackError::EmptyDemand);
        }

        for c in &containers {
            if !c.dimensions.is_valid() {
                return Err(PackError::InvalidDimensions(format!(
                    "container '{}' has dimensions {}",
                    c.name, c.dimensions
                )));
            }
        }
        for d in &demands {
            if !d.item.dimensions.is_valid() {
                return Err(PackError::InvalidDimensions(format!(
                    "item '{}' has dimensions {}",
                    d.item.name, d.item.dimensions
                )));
            }
        }

        let ratio = self.config.empty_space_ratio;
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(PackError::InvalidDimensions(format!(
                "empty space ratio must be at least 1, got {ratio}"
            )));
        }

        Ok((containers, demands))
    }

    /// Picks a fresh container for `group`: the smallest one holding the
    /// estimated remaining volume that also fits the group's shape, else the
    /// largest one that fits the shape.
    fn select_container<'a>(
        &self,
        sorted: &'a [Container],
        group: &CongruencyGroup,
        remaining: &[CongruencyGroup],
    ) -> Option<&'a Container> {
        let required = self.config.empty_space_ratio
            * (remaining.iter().map(|cg| cg.demand_volume()).sum::<f64>() + group.demand_volume());

        sorted
            .iter()
            .find(|c| c.dimensions.volume() >= required && c.dimensions.admits(&group.dimensions))
            .or_else(|| {
                sorted
                    .iter()
                    .rev()
                    .find(|c| c.dimensions.admits(&group.dimensions))
            })
    }

    /// One block per orientation that fits, keeping only the blocks with the
    /// highest item count.
    fn candidates(&self, group: &CongruencyGroup, space: &Space) -> Vec<PackedItems> {
        let quantity = group.quantity();
        let mut candidates: Vec<PackedItems> = space
            .dimensions
            .fit_orientations(&group.dimensions)
            .into_iter()
            .map(|orientation| {
                let rotated = group.dimensions.rotate(orientation);
                let pattern = grid_pattern(&space.dimensions, &rotated, quantity);
                PackedItems {
                    box_index: space.box_index,
                    item_groups: group.allocate(pattern.count()),
                    offset: space.offset,
                    dimensions: rotated.tiled(pattern),
                    pattern,
                    canonical: group.dimensions,
                    orientation,
                }
            })
            .collect();

        let max_quantity = candidates.iter().map(|c| c.quantity()).max().unwrap_or(0);
        candidates.retain(|c| c.quantity() == max_quantity);
        candidates
    }

    /// Pairs each candidate with its preferred split and keeps the one whose
    /// leading leftover space has the most volume. The first candidate wins
    /// ties.
    fn select(
        &self,
        candidates: Vec<PackedItems>,
        space: &Space,
    ) -> Option<(PackedItems, [Space; 3])> {
        let mut best: Option<(PackedItems, [Space; 3])> = None;
        for candidate in candidates {
            let split = best_split(space, &candidate.dimensions);
            let better = match &best {
                None => true,
                Some((_, current)) => split[0].volume() > current[0].volume(),
            };
            if better {
                best = Some((candidate, split));
            }
        }
        best
    }
}

/// Counts along width, then depth, then height, never exceeding `quantity`.
fn grid_pattern(space: &Dimensions, rotated: &Dimensions, quantity: u64) -> Pattern {
    let fit = |available: f64, extent: f64| (available / extent).floor() as u64;

    let wide = fit(space.width, rotated.width).min(quantity);
    let deep = fit(space.depth, rotated.depth).min(quantity / wide.max(1));
    let high = fit(space.height, rotated.height).min(quantity / (wide * deep).max(1));
    Pattern::new(wide, high, deep)
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl PackingEngine for Solver {
    fn pack(&self, containers: &[Container], demands: &[ItemGroup]) -> Result<Solution> {
        let (mut containers, demands) = self.validate(containers, demands)?;

        let mut groups = gather_congruency_groups(&demands);
        groups.sort_by(|a, b| b.dimensions.shape_key().total_cmp(&a.dimensions.shape_key()));
        containers.sort_by(|a, b| a.dimensions.volume().total_cmp(&b.dimensions.volume()));

        if let Some(cg) = groups
            .iter()
            .find(|cg| !containers.iter().any(|c| c.dimensions.admits(&cg.dimensions)))
        {
            return Err(PackError::ItemExceedsAllContainers {
                name: cg.item_groups[0].item.name.clone(),
                dimensions: cg.item_groups[0].item.dimensions,
            });
        }

        let smallest_item_volume = groups
            .iter()
            .map(|cg| cg.dimensions.volume())
            .fold(f64::INFINITY, f64::min);
        let mut pool = SpacePool::new(smallest_item_volume);
        let mut used: Vec<Container> = Vec::new();
        let mut placements: Vec<PackedItems> = Vec::new();

        for idx in 0..groups.len() {
            let (current, rest) = groups[idx..].split_at_mut(1);
            let group = &mut current[0];

            while group.quantity() > 0 {
                let space = match pool.take_fitting(&group.dimensions) {
                    Some(space) => space,
                    None => {
                        let container = self
                            .select_container(&containers, group, rest)
                            .ok_or_else(|| PackError::ItemExceedsAllContainers {
                                name: group.item_groups[0].item.name.clone(),
                                dimensions: group.dimensions,
                            })?;
                        tracing::debug!(
                            container = %container.name,
                            dims = %container.dimensions,
                            index = used.len(),
                            "opening container"
                        );
                        used.push(container.clone());
                        Space::from_container(container, used.len() - 1)
                    }
                };

                let candidates = self.candidates(group, &space);
                let (packed, leftover) = self.select(candidates, &space).ok_or_else(|| {
                    PackError::ItemExceedsAllContainers {
                        name: group.item_groups[0].item.name.clone(),
                        dimensions: group.dimensions,
                    }
                })?;

                tracing::debug!(
                    group = %group.dimensions,
                    box_index = space.box_index,
                    space = %space.dimensions,
                    pattern = %packed.pattern,
                    quantity = packed.quantity(),
                    free_spaces = pool.len(),
                    "placed block"
                );

                group.consume(packed.quantity());
                placements.push(packed);
                pool.admit(leftover);
            }
        }

        let mut boxes: Vec<PackedBox> = used
            .into_iter()
            .map(|container| PackedBox {
                container,
                packed_items: Vec::new(),
            })
            .collect();
        for packed in placements {
            boxes[packed.box_index].packed_items.push(packed);
        }
        for packed_box in &mut boxes {
            packed_box.packed_items.sort_by(|a, b| {
                a.offset
                    .z
                    .total_cmp(&b.offset.z)
                    .then(a.offset.y.total_cmp(&b.offset.y))
                    .then(a.offset.x.total_cmp(&b.offset.x))
            });
        }

        let solution = Solution { boxes };
        tracing::info!(
            boxes = solution.box_count(),
            items = solution.item_count(),
            space_used = solution.space_used_percent(),
            "packing finished"
        );
        Ok(solution)
    }
}
