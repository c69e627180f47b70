//! Agent definition: a named role, its behavior prompt and its tools.

use std::collections::BTreeSet;

use crate::types::AgentRole;

/// A conversation participant's identity and instructions.
///
/// Immutable for the duration of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub role: AgentRole,
    pub role_prompt: String,
    /// Names of the tools this agent may request.
    pub tools: BTreeSet<String>,
    /// Human proxies never consult the model.
    pub is_human: bool,
}

impl Agent {
    /// Create a model-backed agent.
    pub fn new(role: AgentRole, role_prompt: impl Into<String>) -> Self {
        Self {
            role,
            role_prompt: role_prompt.into(),
            tools: BTreeSet::new(),
            is_human: false,
        }
    }

    /// Create a human proxy agent.
    pub fn human(role: AgentRole) -> Self {
        Self {
            is_human: true,
            ..Self::new(role, String::new())
        }
    }

    /// Allow this agent to request `tool`.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.insert(tool.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.role.as_str()
    }

    pub fn can_call(&self, tool: &str) -> bool {
        self.tools.contains(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_agents_have_no_prompt() {
        let proxy = Agent::human(AgentRole::UserProxy).with_tool("create_markdown_file");
        assert!(proxy.is_human);
        assert!(proxy.role_prompt.is_empty());
        assert!(proxy.can_call("create_markdown_file"));
        assert!(!proxy.can_call("search_google"));
        assert_eq!(proxy.name(), "UserProxy");
    }
}
