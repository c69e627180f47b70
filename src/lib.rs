//! Journalist: an AI newsroom.
//!
//! A user proxy, a researcher, a writer and an editor take turns in a
//! round-robin conversation. The researcher can search the web, the writer
//! drafts an article, the editor reviews it. The finished transcript yields
//! the article and the editor's feedback, which can be exported as Markdown.
//!
//! # Quick Start
//!
//! ```no_run
//! use journalist::prelude::*;
//!
//! # async fn example() -> journalist::error::Result<()> {
//! let config = JournalistConfig::from_env()?;
//! let newsroom = Newsroom::from_config(config);
//! let article = newsroom.generate("latest ML news").await?;
//! println!("{}", article.article);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod export;
pub mod extract;
pub mod newsroom;
pub mod prelude;
pub mod provider;
pub mod termination;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
