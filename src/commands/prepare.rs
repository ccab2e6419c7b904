// src/commands/prepare.rs
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::client::LlmClient;
use crate::config::ResolvedConfig;
use crate::error::ConfigError;
use crate::generate::generate_commit_message;
use crate::git::{truncate_diff, DiffSource};

/// Commit sources for which the hook leaves the message alone.
pub const SKIP_SOURCES: &[&str] = &["merge", "commit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// git passed a source from [`SKIP_SOURCES`].
    SkippedSource(String),
    /// Nothing staged; also what a rebase looks like.
    NothingStaged,
    Written(String),
}

/// Run the hook once: read the staged diff, generate a title, write it.
///
/// `resolve` is only called once there is something to generate, so a bad
/// provider setting never blocks merges or empty commits.
pub async fn cmd_prepare(
    commit_msg_file: Option<&Path>,
    source: Option<&str>,
    diffs: &dyn DiffSource,
    resolve: impl FnOnce() -> Result<ResolvedConfig, ConfigError>,
) -> Result<Outcome> {
    let Some(commit_msg_file) = commit_msg_file else {
        bail!("Expected commit message file path as argument");
    };

    if let Some(source) = source.filter(|s| SKIP_SOURCES.contains(s)) {
        debug!(source, "skipping commit source");
        return Ok(Outcome::SkippedSource(source.to_string()));
    }

    let diff = diffs.staged_diff().context("Failed to read staged changes")?;
    if diff.is_empty() {
        debug!("no staged changes");
        return Ok(Outcome::NothingStaged);
    }

    let config = resolve()?;
    let client = LlmClient::new(&config)?;
    let diff = truncate_diff(diff, config.max_diff_chars);

    let message = generate_commit_message(&client, &diff)
        .await
        .context("Failed to generate commit message.")?;

    if !commit_msg_file.exists() {
        bail!("Commit message file {} does not exist", commit_msg_file.display());
    }

    fs::write(commit_msg_file, &message)
        .with_context(|| format!("Failed to write {}", commit_msg_file.display()))?;
    info!(path = %commit_msg_file.display(), "wrote commit message");

    Ok(Outcome::Written(message))
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Provider, DEFAULT_MAX_DIFF_CHARS};
    use crate::error::GenerateError;
    use anyhow::anyhow;
    use serde_json::json;
    use std::cell::Cell;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FakeDiff {
        diff: Result<String, String>,
        reads: Cell<usize>,
    }

    impl FakeDiff {
        fn new(diff: &str) -> Self {
            Self { diff: Ok(diff.to_string()), reads: Cell::new(0) }
        }

        fn failing(reason: &str) -> Self {
            Self { diff: Err(reason.to_string()), reads: Cell::new(0) }
        }
    }

    impl DiffSource for FakeDiff {
        fn staged_diff(&self) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            self.diff.clone().map_err(|e| anyhow!(e))
        }
    }

    fn config_for(server: &MockServer) -> ResolvedConfig {
        ResolvedConfig {
            provider: Provider::OpenAi,
            api_key: Some("sk-test".into()),
            model: "gpt-4o".into(),
            max_tokens: 150,
            temperature: 0.5,
            base_url: server.uri(),
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            request_timeout: None,
            proxy: None,
        }
    }

    async fn provider_replying(content: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .mount(&server)
            .await;
        server
    }

    async fn provider_failing() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "API Error"}
            })))
            .mount(&server)
            .await;
        server
    }

    fn message_file(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();
        file
    }

    #[tokio::test]
    async fn writes_trimmed_provider_response() {
        let server = provider_replying("feat(auth): add user authentication\n").await;
        let file = message_file("");
        let diffs = FakeDiff::new("diff --git a/auth.py b/auth.py\n+def authenticate_user():");

        let outcome = cmd_prepare(Some(file.path()), None, &diffs, || Ok(config_for(&server)))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Written("feat(auth): add user authentication".into()));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "feat(auth): add user authentication");
    }

    #[tokio::test]
    async fn non_skipped_sources_still_generate() {
        let server = provider_replying("docs: fix typo").await;
        for source in ["message", "template", "squash"] {
            let file = message_file("# Please enter the commit message");
            let outcome = cmd_prepare(Some(file.path()), Some(source), &FakeDiff::new("some diff"), || {
                Ok(config_for(&server))
            })
            .await
            .unwrap();
            assert_eq!(outcome, Outcome::Written("docs: fix typo".into()), "source {}", source);
        }
    }

    #[tokio::test]
    async fn skip_sources_never_read_the_diff() {
        for source in SKIP_SOURCES {
            let file = message_file("Merge branch 'feature'");
            let diffs = FakeDiff::new("some diff");

            let outcome = cmd_prepare(Some(file.path()), Some(*source), &diffs, || {
                panic!("config must not be resolved for {}", source)
            })
            .await
            .unwrap();

            assert_eq!(outcome, Outcome::SkippedSource(source.to_string()));
            assert_eq!(diffs.reads.get(), 0);
            assert_eq!(fs::read_to_string(file.path()).unwrap(), "Merge branch 'feature'");
        }
    }

    #[tokio::test]
    async fn empty_diff_is_a_no_op() {
        let diffs = FakeDiff::new("");
        let outcome = cmd_prepare(Some(Path::new("dummy_file")), None, &diffs, || {
            panic!("config must not be resolved without a diff")
        })
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::NothingStaged);
        assert_eq!(diffs.reads.get(), 1);
        assert!(!Path::new("dummy_file").exists());
    }

    #[tokio::test]
    async fn whitespace_only_diff_still_generates() {
        let server = provider_replying("style: strip trailing blank line").await;
        let file = message_file("");

        let outcome = cmd_prepare(Some(file.path()), None, &FakeDiff::new("\n"), || Ok(config_for(&server)))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Written("style: strip trailing blank line".into()));
    }

    #[tokio::test]
    async fn missing_file_argument_fails() {
        let diffs = FakeDiff::new("some diff");
        let err = cmd_prepare(None, None, &diffs, || panic!("unreachable"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Expected commit message file path"));
        assert_eq!(diffs.reads.get(), 0);
    }

    #[tokio::test]
    async fn provider_failure_leaves_file_unchanged() {
        let server = provider_failing().await;
        let file = message_file("original");

        let err = cmd_prepare(Some(file.path()), None, &FakeDiff::new("some diff"), || {
            Ok(config_for(&server))
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate commit message.");
        assert!(err.downcast_ref::<GenerateError>().is_some());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "original");
    }

    #[tokio::test]
    async fn nonexistent_message_file_fails_after_generation() {
        let server = provider_replying("feat(auth): add user authentication").await;
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nonexistent").join("COMMIT_EDITMSG");

        let err = cmd_prepare(Some(missing.as_path()), None, &FakeDiff::new("some diff"), || Ok(config_for(&server)))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn unsupported_provider_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let file = message_file("original");
        let uri = server.uri();

        let err = cmd_prepare(Some(file.path()), None, &FakeDiff::new("some diff"), || {
            ResolvedConfig::new(Some("bard"), None, Some(uri.as_str()), &Config::default(), |_| None)
        })
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnsupportedProvider("bard".into()))
        );
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "original");
    }

    #[tokio::test]
    async fn diff_read_failure_is_fatal() {
        let file = message_file("original");
        let err = cmd_prepare(Some(file.path()), None, &FakeDiff::failing("git not found"), || {
            panic!("unreachable")
        })
        .await
        .unwrap_err();

        assert!(format!("{:#}", err).contains("git not found"));
    }

    #[tokio::test]
    async fn oversized_diff_is_truncated_before_prompting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("[... truncated ...]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "chore: regenerate fixtures"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let file = message_file("");
        let diff = format!("diff --git a/big.json b/big.json\n{}", "+x\n".repeat(1000));

        let outcome = cmd_prepare(Some(file.path()), None, &FakeDiff::new(&diff), || {
            Ok(ResolvedConfig { max_diff_chars: 200, ..config_for(&server) })
        })
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::Written("chore: regenerate fixtures".into()));
    }
}
