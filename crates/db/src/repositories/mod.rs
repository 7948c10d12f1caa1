//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod analysis_repo;
pub mod apparel_product_repo;
pub mod color_repo;
pub mod event_repo;
pub mod feedback_repo;
pub mod makeup_product_repo;

pub use analysis_repo::AnalysisRepo;
pub use apparel_product_repo::ApparelProductRepo;
pub use color_repo::ColorRepo;
pub use event_repo::EventRepo;
pub use feedback_repo::FeedbackRepo;
pub use makeup_product_repo::MakeupProductRepo;
