use std::sync::Arc;

use axum::Router;

use crate::{Classifier, Dataset};

mod devices;
mod error;
mod health;

pub use devices::{DeviceHealth, DeviceList, Indicator};
pub use error::ApiError;

/// Shared state of every route: the session dataset and its classifier.
pub type AppState = (Arc<Dataset>, Classifier);

// ---

pub fn router(dataset: Arc<Dataset>, classifier: Classifier) -> Router {
    // ---
    Router::new()
        .merge(devices::router())
        .merge(health::router())
        .with_state((dataset, classifier))
}
