pub mod analysis;
pub mod colors;
pub mod feedback;
pub mod metrics;
pub mod products;
