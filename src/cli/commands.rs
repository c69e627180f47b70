//! CLI command handlers for `generate` and `search`.

use std::path::Path;
use std::sync::Arc;

use crate::config::JournalistConfig;
use crate::conversation::{ConversationEvent, ConversationEventPayload};
use crate::error::JournalistError;
use crate::newsroom::Newsroom;
use crate::tools::SearchTool;

use super::{GenerateArgs, SearchArgs};

/// Message shown when the conversation produced no article.
pub const GENERATION_FAILED: &str = "An error occurred while generating the article. Please try again.";

fn progress(event: ConversationEvent) {
    match event.payload {
        ConversationEventPayload::MessageAppended { round, message } => {
            eprintln!("  [{round}] {}", message.speaker);
        }
        ConversationEventPayload::ToolInvoked { invocation, .. } => {
            eprintln!("      ⚡ {}", invocation.tool_name);
        }
        ConversationEventPayload::Finished { status, rounds } => {
            eprintln!("  finished after {rounds} messages ({status:?})");
        }
        _ => {}
    }
}

/// Handle `journalist generate`.
pub async fn handle_generate(
    config_path: Option<&Path>,
    args: GenerateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = JournalistConfig::load(config_path)?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(max_rounds) = args.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(key) = args.search_api_key {
        config = config.with_search_api_key(key);
    }

    let newsroom = Newsroom::from_config(config).with_event_sink(Arc::new(progress));

    eprintln!("Researching and writing your article...");
    let article = match newsroom.generate(&args.topic).await {
        Ok(article) => article,
        Err(e) if e.is_user_visible_failure() => {
            eprintln!("{GENERATION_FAILED}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("## Generated Article\n\n{}", article.article);
    if article.has_feedback() {
        println!("\n## Editor's Feedback\n\n{}", article.feedback);
    }

    if let Some(path) = args.transcript {
        std::fs::write(&path, article.transcript.to_json_pretty()?)
            .map_err(JournalistError::from)?;
        eprintln!("Transcript written to {}", path.display());
    }
    if args.save {
        let path = newsroom.export(&article)?;
        eprintln!("Article saved to {}", path.display());
    }
    Ok(())
}

/// Handle `journalist search`.
pub async fn handle_search(
    config_path: Option<&Path>,
    args: SearchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = JournalistConfig::load(config_path)?;
    if let Some(key) = args.search_api_key {
        config = config.with_search_api_key(key);
    }
    let key = config
        .search_api_key()
        .ok_or_else(|| JournalistError::MissingCredential("SERPER_API_KEY".into()))?;

    let tool = SearchTool::new(key).with_base_url(config.search_base_url.clone());
    let results = tool.search(&args.query, args.num).await;
    if results.is_empty() {
        println!("No results.");
    }
    for (i, result) in results.iter().enumerate() {
        println!("{}. {}\n   {}", i + 1, result.title, result.link);
        if !result.snippet.is_empty() {
            println!("   {}", result.snippet);
        }
    }
    Ok(())
}
