#[macro_use]
mod macros;

mod health;
mod normalization;

use std::sync::Arc;

use crate::config::NormalizerConfig;
use crate::upstream::Upstream;

pub use health::*;
pub use normalization::*;

#[derive(Clone)]
pub struct GlobalState {
    pub config: Arc<NormalizerConfig>,
    pub upstream: Option<Upstream>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl GlobalState {
    pub fn new(config: NormalizerConfig, upstream: Option<Upstream>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
            started_at: chrono::Utc::now(),
        }
    }
}
