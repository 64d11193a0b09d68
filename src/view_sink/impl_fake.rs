use crate::view_sink::interface::{PredictionView, ViewSink};
use std::sync::{Arc, Mutex};

/// Records every published view.
#[derive(Clone, Default)]
pub struct ViewSinkFake {
    views: Arc<Mutex<Vec<PredictionView>>>,
}

impl ViewSinkFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<PredictionView> {
        self.views.lock().map(|views| views.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<PredictionView> {
        self.views().pop()
    }
}

impl ViewSink for ViewSinkFake {
    fn publish(
        &mut self,
        view: &PredictionView,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.views
            .lock()
            .map_err(|e| e.to_string())?
            .push(view.clone());
        Ok(())
    }
}
