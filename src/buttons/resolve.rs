//! Command template resolution.

/// Placeholder token replaced with the workspace root at execution time.
pub const WORKSPACE_TOKEN: &str = "${workspaceFolder}";

/// Runtime context a command template is resolved against.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// First root of the open workspace, if any.
    pub workspace_root: Option<String>,
}

impl ResolveContext {
    pub fn new(workspace_root: Option<String>) -> Self {
        Self { workspace_root }
    }
}

/// Substitute every occurrence of [`WORKSPACE_TOKEN`] in `template`.
///
/// Without a workspace root the template passes through untouched,
/// placeholder included; running such a command is the caller's risk.
pub fn resolve(template: &str, ctx: &ResolveContext) -> String {
    match &ctx.workspace_root {
        Some(root) => template.replace(WORKSPACE_TOKEN, root),
        None => template.to_string(),
    }
}
