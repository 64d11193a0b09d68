use crate::category::resolver::resolve;
use crate::classify_session::core::{LoaderPhase, State};
use crate::config::Config;
use crate::prediction::ranker::top_confident;
use crate::view_sink::interface::{ModelStatus, PredictionView, ViewSink};
use chrono::Utc;

pub fn to_view(config: &Config, state: &State) -> PredictionView {
    let ranked = state
        .latest
        .as_ref()
        .map(|published| published.ranked.clone())
        .unwrap_or_default();
    let top_confident = top_confident(&ranked);

    // An unmapped class shows no panel.
    let category = if config.render_panel {
        top_confident
            .as_ref()
            .and_then(|top| resolve(&top.class_name).copied())
    } else {
        None
    };

    PredictionView {
        mode: state.mode.mode,
        model: model_status(&state.loader),
        source: state.latest.as_ref().map(|published| published.source),
        ranked,
        top_confident,
        category,
        error: state.last_error.as_ref().map(|error| error.to_string()),
        published_at: Utc::now(),
    }
}

fn model_status(loader: &LoaderPhase) -> ModelStatus {
    match loader {
        LoaderPhase::Unloaded => ModelStatus::Unloaded,
        LoaderPhase::Loading => ModelStatus::Loading,
        LoaderPhase::Ready { .. } => ModelStatus::Ready,
        LoaderPhase::Failed(_) => ModelStatus::Failed,
    }
}

pub struct Render {
    config: Config,
    sink: Box<dyn ViewSink>,
}

impl Render {
    pub fn new(config: Config, sink: Box<dyn ViewSink>) -> Self {
        Self { config, sink }
    }

    pub fn render(&mut self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sink.publish(&to_view(&self.config, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify_session::core::Published;
    use crate::classify_session::mode_controller::Mode;
    use crate::prediction::interface::Prediction;
    use crate::view_sink::interface::PredictionSource;

    fn published(ranked: Vec<Prediction>) -> State {
        let mut state = State::default();
        state.mode.mode = Mode::Uploading;
        state.loader = LoaderPhase::Ready {
            labels: vec!["Plastic".to_string(), "Trash".to_string()],
        };
        state.latest = Some(Published {
            source: PredictionSource::Upload,
            ranked,
            revision: 1,
        });
        state
    }

    #[test]
    fn test_confident_view_has_category() {
        let state = published(vec![
            Prediction::new("Plastic", 0.82),
            Prediction::new("Trash", 0.18),
        ]);
        let view = to_view(&Config::default(), &state);

        assert_eq!(view.model, ModelStatus::Ready);
        assert_eq!(view.top_confident, Some(Prediction::new("Plastic", 0.82)));
        assert_eq!(view.category.map(|c| c.title), Some("Recyclable (Plastic)"));
        assert!(!view.is_inconclusive());
    }

    #[test]
    fn test_panel_disabled() {
        let config = Config {
            render_panel: false,
            ..Config::default()
        };
        let state = published(vec![Prediction::new("Plastic", 0.82)]);

        let view = to_view(&config, &state);
        assert!(view.top_confident.is_some());
        assert!(view.category.is_none());
    }

    #[test]
    fn test_unknown_class_has_no_panel() {
        let state = published(vec![Prediction::new("Styrofoam", 0.9)]);
        let view = to_view(&Config::default(), &state);

        assert!(view.top_confident.is_some());
        assert!(view.category.is_none());
    }

    #[test]
    fn test_empty_state() {
        let view = to_view(&Config::default(), &State::default());
        assert_eq!(view.mode, Mode::Idle);
        assert_eq!(view.model, ModelStatus::Unloaded);
        assert!(view.ranked.is_empty());
        assert!(view.source.is_none());
        assert!(!view.is_inconclusive());
    }
}
