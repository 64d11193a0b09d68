use crate::classify_session::mode_controller::Mode;
use crate::view_sink::interface::{ModelStatus, PredictionView, ViewSink};
use std::io::Write;

const PANEL_WIDTH: usize = 48;

/// Draws each published view as a text panel.
pub struct ViewSinkConsole<W: Write + Send> {
    out: W,
}

impl ViewSinkConsole<std::io::Stdout> {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send> ViewSinkConsole<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn render_lines(view: &PredictionView) -> Vec<String> {
    let mut lines = vec![format!(
        "{} | model {}",
        mode_label(view.mode),
        model_label(view.model)
    )];

    if let Some(error) = &view.error {
        lines.extend(wrap_words(&format!("Error: {}", error), PANEL_WIDTH));
    }

    if let Some(top) = view.ranked.first() {
        lines.push(format!("{}  {}", top.class_name, top.percent_label()));

        if view.top_confident.is_none() {
            lines.push("Analyzing...".to_string());
        } else if let Some(category) = &view.category {
            lines.push(category.title.to_string());
            lines.extend(wrap_words(category.instruction, PANEL_WIDTH));
        }
    } else if view.mode == Mode::Idle {
        lines.push("Camera is not active".to_string());
    }

    lines
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Idle => "idle",
        Mode::Uploading => "upload",
        Mode::CameraRunning => "camera",
    }
}

fn model_label(status: ModelStatus) -> &'static str {
    match status {
        ModelStatus::Unloaded => "unloaded",
        ModelStatus::Loading => "loading",
        ModelStatus::Ready => "ready",
        ModelStatus::Failed => "failed",
    }
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + word.chars().count() + 1 > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

impl<W: Write + Send> ViewSink for ViewSinkConsole<W> {
    fn publish(
        &mut self,
        view: &PredictionView,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let border = "─".repeat(PANEL_WIDTH + 2);
        writeln!(self.out, "┌{}┐", border)?;
        for line in render_lines(view) {
            let padding = PANEL_WIDTH.saturating_sub(line.chars().count());
            writeln!(self.out, "│ {}{} │", line, " ".repeat(padding))?;
        }
        writeln!(self.out, "└{}┘", border)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::resolver::resolve;
    use crate::prediction::interface::Prediction;
    use crate::view_sink::interface::PredictionSource;
    use chrono::Utc;

    fn view(ranked: Vec<Prediction>, confident: bool) -> PredictionView {
        let top_confident = if confident { ranked.first().cloned() } else { None };
        let category = top_confident
            .as_ref()
            .and_then(|top| resolve(&top.class_name).copied());
        PredictionView {
            mode: Mode::Uploading,
            model: ModelStatus::Ready,
            source: Some(PredictionSource::Upload),
            ranked,
            top_confident,
            category,
            error: None,
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_confident_view_shows_panel() {
        let lines = render_lines(&view(vec![Prediction::new("Plastic", 0.82)], true));
        assert_eq!(lines[0], "upload | model ready");
        assert_eq!(lines[1], "Plastic  82.0%");
        assert_eq!(lines[2], "Recyclable (Plastic)");
        assert!(lines[3].starts_with("Rinse the bottle"));
        assert!(lines.iter().all(|line| line.chars().count() <= PANEL_WIDTH));
    }

    #[test]
    fn test_inconclusive_view_shows_analyzing() {
        let lines = render_lines(&view(vec![Prediction::new("Paper", 0.41)], false));
        assert_eq!(lines[1], "Paper  41.0%");
        assert_eq!(lines[2], "Analyzing...");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_publish_draws_box() {
        let mut sink = ViewSinkConsole::with_writer(Vec::new());
        sink.publish(&view(vec![Prediction::new("Glass", 0.9)], true))
            .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with('┌'));
        assert!(output.contains("│ Glass  90.0%"));
        assert!(output.trim_end().ends_with('┘'));
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap_words("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }
}
