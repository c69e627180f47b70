//! Markdown export of generated articles.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::Result;

pub const DEFAULT_OUTPUT_DIR: &str = "generated_articles";

/// Replace every non-alphanumeric character with `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Render the Markdown document for an article.
pub fn render_markdown(
    title: &str,
    content: &str,
    feedback: Option<&str>,
    generated_at: &DateTime<Local>,
) -> String {
    let mut doc = format!(
        "# {title}\n\n*Generated on: {}*\n\n## Article Content\n\n{content}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(feedback) = feedback.filter(|f| !f.is_empty()) {
        doc.push_str("\n\n## Editor's Feedback\n\n");
        doc.push_str(feedback);
    }
    doc
}

/// Write an article to `<output_dir>/<sanitized-title>_<YYYYMMDD_HHMMSS>.md`.
///
/// The directory is created if needed. Two exports of the same title within
/// one second write to the same file.
pub fn export_article(
    title: &str,
    content: &str,
    feedback: Option<&str>,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let now = Local::now();
    let file_name = format!("{}_{}.md", sanitize_title(title), now.format("%Y%m%d_%H%M%S"));
    let path = output_dir.join(file_name);

    std::fs::write(&path, render_markdown(title, content, feedback, &now))?;
    info!(path = %path.display(), "article exported");
    Ok(path)
}

/// Exporter bound to a fixed output directory.
#[derive(Debug, Clone)]
pub struct ArticleExporter {
    output_dir: PathBuf,
}

impl ArticleExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export(&self, title: &str, content: &str, feedback: Option<&str>) -> Result<PathBuf> {
        export_article(title, content, feedback, &self.output_dir)
    }
}

impl Default for ArticleExporter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
