//! Prompt specs and the per-kind template registry.
//!
//! One spec exists per [`ContentKind`], defined at process start and
//! immutable for the process lifetime. The three kinds share a single user
//! template and differ only in their system message.

mod templates;

use minijinja::{Environment, context};

use crate::content::ContentKind;
use crate::error::{Result, ScribeError};

/// A (system message, user template) pair for one content kind.
#[derive(Debug, Clone, Copy)]
pub struct PromptSpec {
    pub kind: ContentKind,
    pub system_message: &'static str,
    /// minijinja template with `article_content` and `target_audience`
    /// placeholders.
    pub user_template: &'static str,
}

static BLOG: PromptSpec = PromptSpec {
    kind: ContentKind::Blog,
    system_message: templates::BLOG_SYSTEM_MESSAGE,
    user_template: templates::USER_TEMPLATE,
};

static LINKEDIN: PromptSpec = PromptSpec {
    kind: ContentKind::LinkedIn,
    system_message: templates::LINKEDIN_SYSTEM_MESSAGE,
    user_template: templates::USER_TEMPLATE,
};

static X: PromptSpec = PromptSpec {
    kind: ContentKind::X,
    system_message: templates::X_SYSTEM_MESSAGE,
    user_template: templates::USER_TEMPLATE,
};

/// Returns the prompt spec for `kind`.
///
/// The enum is closed and every variant has a spec, so lookup cannot fail.
pub fn resolve(kind: ContentKind) -> &'static PromptSpec {
    match kind {
        ContentKind::Blog => &BLOG,
        ContentKind::LinkedIn => &LINKEDIN,
        ContentKind::X => &X,
    }
}

/// Renders the user message for a spec from the composed search text and
/// the audience of the request.
pub fn render_user_prompt(
    spec: &PromptSpec,
    article_content: &str,
    target_audience: &str,
) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("user", spec.user_template)
        .map_err(|e| ScribeError::internal(format!("invalid user template: {e}")))?;
    let template = env
        .get_template("user")
        .map_err(|e| ScribeError::internal(format!("user template not registered: {e}")))?;
    template
        .render(context! { article_content, target_audience })
        .map_err(|e| ScribeError::internal(format!("failed to render user prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_matching_spec_for_every_kind() {
        for kind in ContentKind::ALL {
            let spec = resolve(kind);
            assert_eq!(spec.kind, kind);
            assert!(!spec.system_message.trim().is_empty());
            assert!(spec.user_template.contains("article_content"));
        }
    }

    #[test]
    fn system_messages_differ_per_kind() {
        assert_ne!(
            resolve(ContentKind::Blog).system_message,
            resolve(ContentKind::LinkedIn).system_message
        );
        assert_ne!(
            resolve(ContentKind::LinkedIn).system_message,
            resolve(ContentKind::X).system_message
        );
    }

    #[test]
    fn render_fills_both_placeholders() {
        let rendered = render_user_prompt(
            resolve(ContentKind::Blog),
            "e-bike sales doubled",
            "urban commuters",
        )
        .unwrap();
        assert!(rendered.contains("Article Content: e-bike sales doubled"));
        assert!(rendered.contains("Target Audience: urban commuters"));
    }
}
