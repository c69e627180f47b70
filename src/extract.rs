//! Pulls the article and the editor's feedback out of a finished transcript.

use serde::{Deserialize, Serialize};

use crate::error::{JournalistError, Result};
use crate::types::{AgentRole, Transcript};

/// Article text and editor feedback found in a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub article: String,
    pub feedback: String,
}

impl Extraction {
    pub fn has_article(&self) -> bool {
        !self.article.is_empty()
    }

    pub fn has_feedback(&self) -> bool {
        !self.feedback.is_empty()
    }

    /// `(article, feedback)`, failing when no article was written.
    pub fn into_article(self) -> Result<(String, String)> {
        if self.article.is_empty() {
            return Err(JournalistError::NoArticleProduced);
        }
        Ok((self.article, self.feedback))
    }
}

/// Scan `transcript` in order: each Writer message replaces the article, and
/// the first Editor message supplies the feedback and ends the scan.
///
/// Writer messages after the first Editor message are ignored.
pub fn extract(transcript: &Transcript) -> Extraction {
    let mut extraction = Extraction::default();
    for message in transcript {
        match message.speaker {
            AgentRole::Writer => extraction.article = message.content.clone(),
            AgentRole::Editor => {
                extraction.feedback = message.content.clone();
                break;
            }
            _ => {}
        }
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    fn transcript(messages: &[(AgentRole, &str)]) -> Transcript {
        messages
            .iter()
            .map(|(role, text)| Message::new(*role, *text))
            .collect()
    }

    #[test]
    fn last_writer_before_first_editor() {
        let t = transcript(&[
            (AgentRole::UserProxy, "topic"),
            (AgentRole::Writer, "m1"),
            (AgentRole::Writer, "m2"),
            (AgentRole::Editor, "feedback"),
            (AgentRole::Writer, "m3"),
            (AgentRole::Editor, "second feedback"),
        ]);
        let e = extract(&t);
        assert_eq!(e.article, "m2");
        assert_eq!(e.feedback, "feedback");
    }

    #[test]
    fn no_editor_takes_last_writer() {
        let t = transcript(&[
            (AgentRole::Writer, "m1"),
            (AgentRole::Researcher, "more research"),
            (AgentRole::Writer, "m2"),
        ]);
        let e = extract(&t);
        assert_eq!(e.article, "m2");
        assert_eq!(e.feedback, "");
    }

    #[test]
    fn editor_before_any_writer_leaves_article_empty() {
        let t = transcript(&[(AgentRole::Editor, "nothing to edit"), (AgentRole::Writer, "late")]);
        let e = extract(&t);
        assert!(!e.has_article());
        assert_eq!(e.feedback, "nothing to edit");
        assert!(matches!(e.into_article(), Err(JournalistError::NoArticleProduced)));
    }

    #[test]
    fn empty_transcript() {
        assert_eq!(extract(&Transcript::new()), Extraction::default());
    }
}
