use std::collections::HashSet;

use crate::domain::{Article, ArticleId};

/// Article ids already placed in an earlier section.
pub type ClaimSet = HashSet<ArticleId>;

/// Collect the ids of `articles` into `claims`.
pub fn claim_ids<'a>(claims: &mut ClaimSet, articles: impl IntoIterator<Item = &'a Article>) {
    claims.extend(articles.into_iter().map(|a| a.id.clone()));
}

/// Drop every candidate whose id is already claimed, keeping the original order.
pub fn exclude_claimed(candidates: Vec<Article>, claims: &ClaimSet) -> Vec<Article> {
    if claims.is_empty() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|a| !claims.contains(&a.id))
        .collect()
}

/// Keep only the first occurrence of each article id, in order.
pub fn dedup_by_id(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = ClaimSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.id.clone()))
        .collect()
}
