//! Comment text generation.

use rand::Rng;

use crate::models::CommentConfig;

/// Produces the text of a new comment.
pub trait CommentComposer: Send + Sync {
    fn compose(&self) -> String;
}

/// Picks one configured template at random and brands it with the marker.
#[derive(Debug, Clone)]
pub struct TemplateComposer {
    marker: String,
    templates: Vec<String>,
}

impl TemplateComposer {
    pub fn new(marker: impl Into<String>, templates: Vec<String>) -> Self {
        Self {
            marker: marker.into(),
            templates,
        }
    }

    pub fn from_config(config: &CommentConfig) -> Self {
        Self::new(config.marker.clone(), config.templates.clone())
    }

    fn render(&self, template: &str) -> String {
        let text = template.replace("{marker}", &self.marker);
        if text.contains(&self.marker) {
            text
        } else if text.trim().is_empty() {
            self.marker.clone()
        } else {
            format!("{} {}", text.trim_end(), self.marker)
        }
    }
}

impl CommentComposer for TemplateComposer {
    fn compose(&self) -> String {
        if self.templates.is_empty() {
            return self.marker.clone();
        }
        let index = rand::rng().random_range(0..self.templates.len());
        self.render(&self.templates[index])
    }
}
