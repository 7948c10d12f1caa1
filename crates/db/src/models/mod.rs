pub mod analysis;
pub mod color;
pub mod event;
pub mod feedback;
pub mod product;
