// Prompt text that teaches the agent how to call `run_dify_workflow`

use crate::config::DifyConfig;

/// Usage notes appended after the configured custom prompt
pub const USAGE_DOC: &str = r#"## Dify workflows

You can run a Dify workflow with the `run_dify_workflow` tool. The call blocks until the workflow finishes and returns a text summary of the workflow outputs.

Parameters:
- `inputs` (object, required): workflow input variables as key/value pairs. Use exactly the variable names the workflow defines.
- `user` (string, optional): user identity reported to Dify. Leave it out to use the configured default user.

If the result starts with "Workflow execution failed:", tell the user what went wrong instead of retrying with the same inputs.

Example 1, a workflow that takes a single `query` variable:
run_dify_workflow({"inputs": {"query": "Summarize today's AI news"}})

Example 2, several variables and an explicit user:
run_dify_workflow({"inputs": {"city": "Hangzhou", "days": 3}, "user": "alice"})"#;

/// Custom prompt (if any), a blank line, then the usage notes
pub fn build_prompt_fragment(config: &DifyConfig) -> String {
    let custom = config.custom_prompt.trim();
    if custom.is_empty() {
        return USAGE_DOC.to_string();
    }
    format!("{}\n\n{}", custom, USAGE_DOC)
}
