use crate::types::{Container, Dimensions, Point};

/// Empty axis-aligned region inside a committed container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Space {
    pub box_index: usize,
    pub dimensions: Dimensions,
    pub offset: Point,
}

impl Space {
    pub fn from_container(container: &Container, box_index: usize) -> Self {
        Self {
            box_index,
            dimensions: container.dimensions,
            offset: Point::origin(),
        }
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    fn sub(&self, dimensions: Dimensions, offset: Point) -> Self {
        Self {
            box_index: self.box_index,
            dimensions,
            offset,
        }
    }
}

/// Axis of the first full-length cut through the leftover of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutOrder {
    WidthFirst,
    HeightFirst,
    DepthFirst,
}

impl CutOrder {
    pub const ALL: [CutOrder; 3] = [
        CutOrder::WidthFirst,
        CutOrder::HeightFirst,
        CutOrder::DepthFirst,
    ];

    /// Tiles `space` minus the block of size `placed` at its origin into three
    /// disjoint spaces. Some may have zero volume.
    pub fn split(self, space: &Space, placed: &Dimensions) -> [Space; 3] {
        let s = space.dimensions;
        let o = space.offset;
        let p = placed;

        let right = Point::new(o.x + p.width, o.y, o.z);
        let above = Point::new(o.x, o.y + p.height, o.z);
        let behind = Point::new(o.x, o.y, o.z + p.depth);

        match self {
            CutOrder::WidthFirst => [
                space.sub(
                    Dimensions::new(s.width - p.width, s.height, s.depth),
                    right,
                ),
                space.sub(
                    Dimensions::new(p.width, s.height - p.height, s.depth),
                    above,
                ),
                space.sub(
                    Dimensions::new(p.width, p.height, s.depth - p.depth),
                    behind,
                ),
            ],
            CutOrder::HeightFirst => [
                space.sub(
                    Dimensions::new(s.width, s.height - p.height, s.depth),
                    above,
                ),
                space.sub(
                    Dimensions::new(s.width, p.height, s.depth - p.depth),
                    behind,
                ),
                space.sub(
                    Dimensions::new(s.width - p.width, p.height, p.depth),
                    right,
                ),
            ],
            CutOrder::DepthFirst => [
                space.sub(
                    Dimensions::new(s.width, s.height, s.depth - p.depth),
                    behind,
                ),
                space.sub(
                    Dimensions::new(s.width - p.width, s.height, p.depth),
                    right,
                ),
                space.sub(
                    Dimensions::new(p.width, s.height - p.height, p.depth),
                    above,
                ),
            ],
        }
    }
}

/// Picks the cut order whose first space has the largest shape key. Earlier
/// orders win ties.
pub fn best_split(space: &Space, placed: &Dimensions) -> [Space; 3] {
    let mut best = CutOrder::WidthFirst.split(space, placed);
    for order in &CutOrder::ALL[1..] {
        let split = order.split(space, placed);
        if split[0].dimensions.shape_key() > best[0].dimensions.shape_key() {
            best = split;
        }
    }
    best
}

/// Free spaces across all committed containers, kept ascending by volume.
#[derive(Debug, Clone)]
pub struct SpacePool {
    spaces: Vec<Space>,
    min_volume: f64,
}

impl SpacePool {
    /// Spaces smaller than `min_volume` are never retained.
    pub fn new(min_volume: f64) -> Self {
        Self {
            spaces: Vec::new(),
            min_volume,
        }
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Removes and returns the first space, in ascending volume order, that
    /// admits `dimensions` in some orientation.
    pub fn take_fitting(&mut self, dimensions: &Dimensions) -> Option<Space> {
        let idx = self
            .spaces
            .iter()
            .position(|s| s.dimensions.admits(dimensions))?;
        Some(self.spaces.remove(idx))
    }

    /// Adds the spaces that are large enough and restores volume order.
    pub fn admit(&mut self, spaces: impl IntoIterator<Item = Space>) {
        let min_volume = self.min_volume;
        self.spaces
            .extend(spaces.into_iter().filter(|s| s.volume() >= min_volume));
        self.spaces.sort_by(|a, b| a.volume().total_cmp(&b.volume()));
    }
}
