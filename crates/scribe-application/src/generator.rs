//! Content generation orchestration.
//!
//! One request flows validate → search → three concurrent completions →
//! all-or-nothing record assembly → whole-history persistence. The
//! per-kind completions are the only concurrent step; search and
//! persistence are strictly sequential around them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::task::JoinSet;

use scribe_core::completion::CompletionBackend;
use scribe_core::content::{ContentKind, ContentRecord, GenerationRequest, HistoryRepository};
use scribe_core::error::{Result, ScribeError};
use scribe_core::prompt;
use scribe_core::search::{SearchFinding, SearchProvider};

/// Orchestrates one content-generation request end to end.
pub struct ContentGenerator {
    search: Arc<dyn SearchProvider>,
    backend: Arc<dyn CompletionBackend>,
    history: Arc<dyn HistoryRepository>,
}

impl ContentGenerator {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        backend: Arc<dyn CompletionBackend>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            search,
            backend,
            history,
        }
    }

    /// Runs the full pipeline for one request.
    ///
    /// The three per-kind completions run concurrently and are all
    /// awaited even when one fails; a failure discards the other results
    /// and nothing partial is persisted. No retry and no timeout exist at
    /// this layer.
    pub async fn generate(&self, request: GenerationRequest) -> Result<ContentRecord> {
        request.validate()?;
        tracing::info!(
            subject = %request.content_subject,
            campaign = %request.campaign,
            "generating content"
        );

        let findings = self.search.search(&request.content_subject).await?;
        tracing::debug!(count = findings.len(), "retrieved search findings");
        let article_content = compose_article(&findings);

        let mut tasks = JoinSet::new();
        for kind in ContentKind::ALL {
            let spec = prompt::resolve(kind);
            let user_message =
                prompt::render_user_prompt(spec, &article_content, &request.target_audience)?;
            let backend = Arc::clone(&self.backend);
            tasks.spawn(async move {
                let result = backend.complete(spec.system_message, &user_message).await;
                (kind, result)
            });
        }

        // Drain every task before acting on failures: in-flight siblings
        // are not cancelled, their results are simply discarded.
        let mut outputs: HashMap<ContentKind, String> = HashMap::new();
        let mut first_error: Option<ScribeError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((kind, Ok(text))) => {
                    if text.trim().is_empty() {
                        // An empty completion counts as a failure.
                        let err = ScribeError::generation(format!(
                            "{kind} completion returned empty content"
                        ));
                        tracing::error!(kind = %kind, error = %err, "completion failed");
                        first_error.get_or_insert(err);
                    } else {
                        outputs.insert(kind, text);
                    }
                }
                Ok((kind, Err(err))) => {
                    tracing::error!(kind = %kind, error = %err, "completion failed");
                    first_error.get_or_insert(err);
                }
                Err(err) => {
                    first_error
                        .get_or_insert(ScribeError::internal(format!("completion task died: {err}")));
                }
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        let mut history = self.history.load().await?;
        let now = Local::now();
        let record = ContentRecord {
            id: derive_id(now, &history),
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            campaign: request.campaign,
            content_subject: request.content_subject,
            target_audience: request.target_audience,
            blog_content: take_output(&mut outputs, ContentKind::Blog)?,
            linkedin_content: take_output(&mut outputs, ContentKind::LinkedIn)?,
            x_content: take_output(&mut outputs, ContentKind::X)?,
        };

        history.push(record.clone());
        self.history.save(&history).await?;
        tracing::info!(id = %record.id, total = history.len(), "content generation completed");

        Ok(record)
    }
}

fn take_output(outputs: &mut HashMap<ContentKind, String>, kind: ContentKind) -> Result<String> {
    outputs
        .remove(&kind)
        .ok_or_else(|| ScribeError::internal(format!("missing {kind} output after join")))
}

/// Flattens findings into the composed text block shared by all three
/// kinds. No per-kind filtering happens here.
fn compose_article(findings: &[SearchFinding]) -> String {
    findings
        .iter()
        .map(|finding| format!("{}\n{}", finding.title, finding.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Derives a timestamp identifier, unique within `existing`.
///
/// Second-resolution timestamps collide when two requests finish within
/// the same second; a `-N` suffix keeps ids unique while still sorting
/// between the bare second and the next one.
fn derive_id(now: DateTime<Local>, existing: &[ContentRecord]) -> String {
    let base = now.format("%Y%m%d%H%M%S").to_string();
    if !existing.iter().any(|record| record.id == base) {
        return base;
    }

    let mut suffix = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !existing.iter().any(|record| record.id == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
