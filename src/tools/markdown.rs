//! `create_markdown_file` tool wrapping the article exporter.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::error::JournalistError;
use crate::export::ArticleExporter;

pub const MARKDOWN_TOOL_NAME: &str = "create_markdown_file";

#[derive(Debug)]
pub struct MarkdownFileTool {
    exporter: ArticleExporter,
    parameters: AgentToolParameters,
}

impl MarkdownFileTool {
    pub fn new(exporter: ArticleExporter) -> Self {
        Self {
            exporter,
            parameters: AgentToolParameters::object()
                .string("title", "Title of the article", true)
                .string("content", "Full article text", true)
                .string("feedback", "Editor's feedback on the article", false)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for MarkdownFileTool {
    fn name(&self) -> &str {
        MARKDOWN_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Create a markdown file from the extracted content."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, JournalistError> {
        let title = args.get_str("title")?;
        let content = args.get_str("content")?;
        let feedback = args.get_str_opt("feedback");
        let path = self.exporter.export(title, content, feedback)?;
        Ok(serde_json::json!({ "path": path.display().to_string() }))
    }
}
