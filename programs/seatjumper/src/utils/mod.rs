pub mod pools;
pub mod pricing;
pub mod promotion;
pub mod snapshot;
