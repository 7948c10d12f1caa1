//! Domain types and pure logic for the tonematch backend.
//!
//! Nothing in this crate touches the database or the network. The API and
//! repository layers build on these modules.

pub mod analysis;
pub mod cache;
pub mod color;
pub mod error;
pub mod feedback;
pub mod hashing;
pub mod monk;
pub mod palette;
pub mod product;
pub mod progress;
pub mod season;
pub mod types;
