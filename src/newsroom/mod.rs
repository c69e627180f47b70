//! The newsroom: a user proxy, researcher, writer and editor taking turns
//! on a topic.

pub mod prompts;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::{Agent, AutoReply, ModelResponder, Responder};
use crate::config::JournalistConfig;
use crate::conversation::{
    ConversationEventSink, ConversationLoop, ConversationSettings, ConversationStatus, Participant,
};
use crate::error::{JournalistError, Result};
use crate::export::ArticleExporter;
use crate::extract::extract;
use crate::provider::{self, ModelProvider};
use crate::termination::SentinelTermination;
use crate::tools::{MarkdownFileTool, SearchTool, ToolRegistry, MARKDOWN_TOOL_NAME, SEARCH_TOOL_NAME};
use crate::types::{AgentRole, GenerationSettings, Transcript};

pub const DOWNLOAD_FILE_NAME: &str = "ai_generated_article.md";
pub const DOWNLOAD_MIME_TYPE: &str = "text/markdown";

/// Article text as a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDownload {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Output of one newsroom run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub topic: String,
    pub article: String,
    pub feedback: String,
    pub status: ConversationStatus,
    pub transcript: Transcript,
}

impl GeneratedArticle {
    pub fn has_feedback(&self) -> bool {
        !self.feedback.is_empty()
    }

    pub fn download(&self) -> ArticleDownload {
        ArticleDownload {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: DOWNLOAD_MIME_TYPE,
            bytes: self.article.clone().into_bytes(),
        }
    }
}

/// The four newsroom agents, in speaking order.
pub fn newsroom_agents() -> Vec<Agent> {
    vec![
        Agent::human(AgentRole::UserProxy).with_tool(MARKDOWN_TOOL_NAME),
        Agent::new(AgentRole::Researcher, prompts::RESEARCHER_PROMPT).with_tool(SEARCH_TOOL_NAME),
        Agent::new(AgentRole::Writer, prompts::WRITER_PROMPT),
        Agent::new(AgentRole::Editor, prompts::EDITOR_PROMPT),
    ]
}

/// Registry with web search (Researcher calls, UserProxy runs) and
/// Markdown export (UserProxy calls and runs).
pub fn newsroom_registry(search: SearchTool, exporter: ArticleExporter) -> Result<ToolRegistry> {
    ToolRegistry::new()
        .with_tool(
            SEARCH_TOOL_NAME,
            Arc::new(search),
            AgentRole::Researcher,
            AgentRole::UserProxy,
        )?
        .with_tool(
            MARKDOWN_TOOL_NAME,
            Arc::new(MarkdownFileTool::new(exporter)),
            AgentRole::UserProxy,
            AgentRole::UserProxy,
        )
}

/// Research, write and edit an article about a topic.
pub struct Newsroom {
    config: JournalistConfig,
    provider: Option<Arc<dyn ModelProvider>>,
    event_sink: Option<ConversationEventSink>,
}

impl Newsroom {
    /// Build a newsroom whose model provider is created from `config` on each run.
    pub fn from_config(config: JournalistConfig) -> Self {
        Self {
            config,
            provider: None,
            event_sink: None,
        }
    }

    /// Use a specific model provider instead of the configured one.
    pub fn with_provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_event_sink(mut self, sink: ConversationEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn config(&self) -> &JournalistConfig {
        &self.config
    }

    pub fn exporter(&self) -> ArticleExporter {
        ArticleExporter::new(self.config.output_dir.clone())
    }

    pub fn search_tool(&self) -> Result<SearchTool> {
        let key = self
            .config
            .search_api_key()
            .ok_or_else(|| JournalistError::MissingCredential("SERPER_API_KEY".into()))?;
        Ok(SearchTool::new(key)
            .with_base_url(self.config.search_base_url.clone())
            .with_default_num_results(self.config.num_results))
    }

    fn model_provider(&self) -> Result<Arc<dyn ModelProvider>> {
        match self.provider {
            Some(ref provider) => Ok(Arc::clone(provider)),
            None => Ok(Arc::from(provider::create_provider(&self.config)?)),
        }
    }

    /// Assemble the conversation for one run.
    pub fn conversation(&self) -> Result<ConversationLoop> {
        let model: Arc<dyn Responder> = Arc::new(
            ModelResponder::new(self.model_provider()?).with_settings(GenerationSettings {
                temperature: self.config.temperature,
                ..Default::default()
            }),
        );
        let proxy: Arc<dyn Responder> = Arc::new(AutoReply::default());

        let participants = newsroom_agents()
            .into_iter()
            .map(|agent| {
                let responder = if agent.is_human {
                    Arc::clone(&proxy)
                } else {
                    Arc::clone(&model)
                };
                Participant::new(agent, responder)
            })
            .collect();

        let registry = newsroom_registry(self.search_tool()?, self.exporter())?;
        let settings = ConversationSettings::builder()
            .max_rounds(self.config.max_rounds)
            .build();

        let mut conversation = ConversationLoop::new(
            participants,
            registry,
            SentinelTermination::new(self.config.termination_sentinel.clone()),
        )
        .with_settings(settings);
        if let Some(ref sink) = self.event_sink {
            conversation = conversation.with_event_sink(Arc::clone(sink));
        }
        Ok(conversation)
    }

    /// Run the newsroom on `topic`.
    ///
    /// Refuses to start on a blank topic or incomplete configuration. Fails
    /// with [`JournalistError::NoArticleProduced`] when the Writer never spoke
    /// before the Editor's first message.
    pub async fn generate(&self, topic: &str) -> Result<GeneratedArticle> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(JournalistError::InvalidArgument("topic must not be empty".into()));
        }
        self.config.validate()?;

        let conversation = self.conversation()?;
        info!(topic, model = %self.config.model, "generating article");
        let outcome = conversation.run(prompts::assignment(topic)).await?;

        let (article, feedback) = extract(&outcome.transcript).into_article()?;
        Ok(GeneratedArticle {
            topic: topic.to_string(),
            article,
            feedback,
            status: outcome.status,
            transcript: outcome.transcript,
        })
    }

    /// Write `article` to the configured output directory.
    pub fn export(&self, article: &GeneratedArticle) -> Result<std::path::PathBuf> {
        let feedback = Some(article.feedback.as_str()).filter(|f| !f.is_empty());
        self.exporter().export(&article.topic, &article.article, feedback)
    }
}

impl std::fmt::Debug for Newsroom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Newsroom")
            .field("config", &self.config)
            .field("provider", &self.provider.as_ref().map(|p| p.model_id().to_string()))
            .finish()
    }
}
