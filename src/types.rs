use serde::{Deserialize, Serialize};

/// Extents along the three axes. Width runs along x, height along y, depth along z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Sum of squared extents. Favours long or cube-like shapes over flat ones
    /// of the same volume.
    pub fn shape_key(&self) -> f64 {
        self.width * self.width + self.height * self.height + self.depth * self.depth
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    pub fn rotate(&self, orientation: Orientation) -> Self {
        let Self {
            width: w,
            height: h,
            depth: d,
        } = *self;
        match orientation {
            Orientation::Front => Self::new(w, h, d),
            Orientation::Front90 => Self::new(d, h, w),
            Orientation::Side => Self::new(h, w, d),
            Orientation::Side90 => Self::new(d, w, h),
            Orientation::Top => Self::new(w, d, h),
            Orientation::Top90 => Self::new(h, d, w),
        }
    }

    /// True if `item` fits inside `self` as given, without rotating it.
    pub fn fits_strictly(&self, item: &Dimensions) -> bool {
        item.width <= self.width && item.height <= self.height && item.depth <= self.depth
    }

    /// Orientations of `item` that fit inside `self`, in enumeration order.
    pub fn fit_orientations(&self, item: &Dimensions) -> Vec<Orientation> {
        if self.volume() < item.volume() {
            return Vec::new();
        }
        Orientation::ALL
            .into_iter()
            .filter(|&o| self.fits_strictly(&item.rotate(o)))
            .collect()
    }

    pub fn admits(&self, item: &Dimensions) -> bool {
        !self.fit_orientations(item).is_empty()
    }

    /// The orientation that turns `self` into exactly `other`, if there is one.
    pub fn orientation_to_be_same(&self, other: &Dimensions) -> Option<Orientation> {
        if self.volume() != other.volume() {
            return None;
        }
        Orientation::ALL
            .into_iter()
            .find(|&o| self.rotate(o) == *other)
    }

    /// Scales each axis by the matching pattern count.
    pub fn tiled(&self, pattern: Pattern) -> Self {
        Self::new(
            self.width * pattern.wide as f64,
            self.height * pattern.high as f64,
            self.depth * pattern.deep as f64,
        )
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// The six axis-aligned ways to assign an item's extents to the container axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "front")]
    Front,
    #[serde(rename = "front_90")]
    Front90,
    #[serde(rename = "side")]
    Side,
    #[serde(rename = "side_90")]
    Side90,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "top_90")]
    Top90,
}

impl Orientation {
    pub const ALL: [Orientation; 6] = [
        Orientation::Front,
        Orientation::Front90,
        Orientation::Side,
        Orientation::Side90,
        Orientation::Top,
        Orientation::Top90,
    ];

    /// The orientation that undoes this one. `Side90` and `Top90` are
    /// three-cycles and undo each other; the rest are their own inverse.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Front => Orientation::Front,
            Orientation::Front90 => Orientation::Front90,
            Orientation::Side => Orientation::Side,
            Orientation::Side90 => Orientation::Top90,
            Orientation::Top => Orientation::Top,
            Orientation::Top90 => Orientation::Side90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

/// A container type from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Container {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dimensions,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dimensions,
        }
    }
}

/// A quantity of one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub item: Item,
    pub quantity: u32,
}

impl ItemGroup {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// Grid counts of a placed block along width, height and depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub wide: u64,
    pub high: u64,
    pub deep: u64,
}

impl Pattern {
    pub fn new(wide: u64, high: u64, deep: u64) -> Self {
        Self { wide, high, deep }
    }

    pub fn count(&self) -> u64 {
        self.wide * self.high * self.deep
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.wide, self.high, self.deep)
    }
}

/// One placement: a rectangular block of congruent items at an offset inside
/// a committed container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedItems {
    pub box_index: usize,
    pub item_groups: Vec<ItemGroup>,
    pub offset: Point,
    pub dimensions: Dimensions,
    pub pattern: Pattern,
    /// Shape shared by every member, as the congruency group first saw it.
    pub canonical: Dimensions,
    /// Rotation applied to `canonical`. Members listed in another rotation
    /// need [`PackedItems::orientation_of`].
    pub orientation: Orientation,
}

impl PackedItems {
    pub fn quantity(&self) -> u64 {
        self.item_groups.iter().map(|ig| u64::from(ig.quantity)).sum()
    }

    /// Extents of a single item as placed in the grid.
    pub fn cell(&self) -> Dimensions {
        self.canonical.rotate(self.orientation)
    }

    /// Rotation that takes `item`'s own dimensions to the placed cell.
    pub fn orientation_of(&self, item: &Item) -> Option<Orientation> {
        let cell = self.cell();
        Orientation::ALL
            .into_iter()
            .find(|&o| item.dimensions.rotate(o) == cell)
    }

    pub fn item_volume(&self) -> f64 {
        self.item_groups
            .iter()
            .map(|ig| ig.item.dimensions.volume() * ig.quantity as f64)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedBox {
    pub container: Container,
    pub packed_items: Vec<PackedItems>,
}

impl PackedBox {
    pub fn item_count(&self) -> u64 {
        self.packed_items.iter().map(|pi| pi.quantity()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub boxes: Vec<PackedBox>,
}

impl Solution {
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn item_count(&self) -> u64 {
        self.boxes.iter().map(|b| b.item_count()).sum()
    }

    pub fn most_items_per_box(&self) -> u64 {
        self.boxes.iter().map(|b| b.item_count()).max().unwrap_or(0)
    }

    pub fn space_used_percent(&self) -> f64 {
        let total_box_volume: f64 = self
            .boxes
            .iter()
            .map(|b| b.container.dimensions.volume())
            .sum();
        let total_item_volume: f64 = self
            .boxes
            .iter()
            .flat_map(|b| &b.packed_items)
            .map(|pi| pi.item_volume())
            .sum();
        if total_box_volume == 0.0 {
            return 0.0;
        }
        total_item_volume / total_box_volume * 100.0
    }
}

/// Container catalog plus demand, as accepted by the CLI and the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackRequest {
    pub containers: Vec<Container>,
    pub items: Vec<ItemGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_space_ratio: Option<f64>,
}
