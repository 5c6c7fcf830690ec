use crate::domain::models::{Holding, TimelinePoint};
use crate::errors::StoreError;

pub type RepoResult<T> = Result<T, StoreError>;

// Source of the holdings collection, read once at startup
pub trait HoldingsRepo: Send + Sync {
    fn load_holdings(&self) -> RepoResult<Vec<Holding>>;
}

// Source of the benchmark history consumed by the performance calculator
pub trait TimelineRepo: Send + Sync {
    fn load_timeline(&self) -> RepoResult<Vec<TimelinePoint>>;
}
