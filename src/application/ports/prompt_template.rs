use async_trait::async_trait;

pub const CONTEXT_PLACEHOLDER: &str = "{context}";
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Instruction template with `{context}` and `{question}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    body: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Result<Self, TemplateError> {
        let name = name.into();
        let body = body.into();
        for placeholder in [CONTEXT_PLACEHOLDER, QUESTION_PLACEHOLDER] {
            if !body.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    template: name,
                    placeholder,
                });
            }
        }
        Ok(Self { name, body })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Substitutes both placeholders in a single pass so that placeholder-like
    /// text inside the context or question is left alone.
    pub fn render(&self, context: &str, question: &str) -> String {
        let mut out = String::with_capacity(self.body.len() + context.len() + question.len());
        let mut rest = self.body.as_str();

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix(CONTEXT_PLACEHOLDER) {
                out.push_str(context);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(QUESTION_PLACEHOLDER) {
                out.push_str(question);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

#[async_trait]
pub trait PromptTemplateSource: Send + Sync {
    async fn fetch(&self) -> Result<PromptTemplate, TemplateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template {template} is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
    #[error("template fetch failed: {0}")]
    FetchFailed(String),
}
