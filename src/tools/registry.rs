//! Tool registry: which agent may call a tool and which agent runs it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::ToolDefinition;
use crate::agent::Agent;
use crate::error::{JournalistError, Result};
use crate::types::AgentRole;

/// A tool together with its authorized caller and executor.
#[derive(Clone)]
pub struct RegisteredTool {
    pub tool: Arc<dyn Tool>,
    pub caller: AgentRole,
    pub executor: AgentRole,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("tool", &self.tool.name())
            .field("caller", &self.caller)
            .field("executor", &self.executor)
            .finish()
    }
}

/// Named tools available to a conversation.
///
/// Built once before a conversation starts and handed to the loop; there is
/// no process-wide registration.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool` under `name`, callable only by `caller` and run by `executor`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        tool: Arc<dyn Tool>,
        caller: AgentRole,
        executor: AgentRole,
    ) -> Result<()> {
        let name = name.into();
        if self.tools.contains_key(&name) {
            return Err(JournalistError::Configuration(format!(
                "tool '{name}' is already registered"
            )));
        }
        debug!(tool = %name, %caller, %executor, "registering tool");
        self.tools.insert(
            name,
            RegisteredTool {
                tool,
                caller,
                executor,
            },
        );
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_tool(
        mut self,
        name: impl Into<String>,
        tool: Arc<dyn Tool>,
        caller: AgentRole,
        executor: AgentRole,
    ) -> Result<Self> {
        self.register(name, tool, caller, executor)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &RegisteredTool)> {
        self.tools.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<&RegisteredTool> {
        self.tools
            .get(name)
            .ok_or_else(|| JournalistError::tool_resolution(name, "no such tool is registered"))
    }

    /// Invoke a tool on behalf of `requesting_agent`, run by its registered executor.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
        requesting_agent: AgentRole,
    ) -> Result<serde_json::Value> {
        let executor = self.resolve(name)?.executor;
        self.execute(name, arguments, requesting_agent, executor).await
    }

    /// Execute a tool, checking both the caller and the executor.
    ///
    /// Resolution and authorization failures are errors. Failures inside the
    /// tool itself are logged and returned as an `{"error": ...}` value so the
    /// calling agent can see them.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
        caller: AgentRole,
        executor: AgentRole,
    ) -> Result<serde_json::Value> {
        let entry = self.resolve(name)?;
        if entry.caller != caller {
            return Err(JournalistError::UnauthorizedCaller {
                tool: name.to_string(),
                caller,
                expected: entry.caller,
            });
        }
        if entry.executor != executor {
            return Err(JournalistError::UnauthorizedExecutor {
                tool: name.to_string(),
                executor,
                expected: entry.executor,
            });
        }

        let ctx = ToolExecutionContext { caller, executor };
        let args = ToolArguments::new(arguments);
        match entry.tool.execute(&args, &ctx).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                Ok(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }

    /// Definitions of the tools `agent` lists and is the registered caller of.
    pub fn definitions_for(&self, agent: &Agent) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter(|(name, entry)| entry.caller == agent.role && agent.tools.contains(*name))
            .map(|(name, entry)| ToolDefinition {
                name: name.clone(),
                ..entry.tool.definition()
            })
            .collect()
    }
}
