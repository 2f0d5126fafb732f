use serde::Deserialize;

use crate::domain::Embedding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Cosine,
    DotProduct,
}

impl DistanceMetric {
    pub fn score(&self, a: &Embedding, b: &Embedding) -> f32 {
        match self {
            DistanceMetric::Cosine => a.cosine_similarity(b),
            DistanceMetric::DotProduct => a.dot_product(b),
        }
    }
}
