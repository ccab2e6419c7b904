// src/prompts.rs

pub const COMMIT_SYSTEM_PROMPT: &str = "You are a helpful assistant that writes Git commit messages.";

pub const COMMIT_USER_PROMPT: &str = r#"You are an expert software engineer and a helpful assistant that writes clear and concise Git commit messages following the Conventional Commits specification.

Please analyze the following Git diff and summarize the changes in a commit message.

Requirements:
- detect a scope: it usually is a module name (directory only), or empty
- The commit message must be in the format: <type>[optional scope]: <description>
- Use one of the following types: feat, fix, docs, style, refactor, test, chore, perf, ci, build.
- If applicable, include a scope in parentheses after the type.
- The description should be brief (max 72 characters) and in the imperative mood.
- Only generate the commit title, not the body.
- the output must be on a single line in plain text

Use these rules to determine the commit type:
- feat: A new feature
- fix: A bug fix
- chore: Code changes that aren't related to a feature or bug fix
- docs: Documentation changes
- style: Code style changes
- refactor: A change that doesn't add or remove functionality

Diff:
{diff}"#;

pub fn commit_user_prompt(diff: &str) -> String {
    COMMIT_USER_PROMPT.replace("{diff}", diff)
}
