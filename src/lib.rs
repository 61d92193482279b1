//! Greedy placement of rectangular items into rectangular containers.
//!
//! Items that are the same shape up to rotation are packed together as grid
//! blocks. Each block is cut out of a free space with guillotine cuts and the
//! leftover pieces go back into a pool of free spaces ordered by volume. A new
//! container is opened only when no free space can take the current shape.

pub mod config;
pub mod congruency;
pub mod error;
pub mod guillotine;
pub mod render;
pub mod solver;
pub mod types;

pub use config::SolverConfig;
pub use error::{PackError, Result};
pub use solver::{PackingEngine, Solver};
pub use types::{
    Container, Dimensions, Item, ItemGroup, Orientation, PackRequest, PackedBox, PackedItems,
    Pattern, Point, Solution,
};
