use corridor_news::NewsAggregator;
use std::sync::Arc;

pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: NewsAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}
