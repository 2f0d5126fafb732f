mod bundled_template_source;
mod fallback_template_source;
mod remote_template_source;

pub use bundled_template_source::{BundledTemplateSource, RAG_PROMPT, RAG_PROMPT_NAME};
pub use fallback_template_source::FallbackTemplateSource;
pub use remote_template_source::RemoteTemplateSource;
