use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Article;

/// A source list cut at a section limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub taken: Vec<Article>,
    pub overflow: Vec<Article>,
}

/// Take the first `limit` articles; everything after becomes overflow, in order.
pub fn split_at_limit(mut articles: Vec<Article>, limit: usize) -> Split {
    if articles.len() <= limit {
        return Split {
            taken: articles,
            overflow: Vec::new(),
        };
    }

    let overflow = articles.split_off(limit);
    Split {
        taken: articles,
        overflow,
    }
}

/// Top up an under-filled Other section from the Following overflow pool.
///
/// Pool articles are appended in pool order until `limit` is reached, then
/// the combined list is shuffled and truncated. A full section is returned
/// untouched.
pub fn backfill_other<R: Rng + ?Sized>(
    mut other: Vec<Article>,
    pool: &[Article],
    limit: usize,
    rng: &mut R,
) -> Vec<Article> {
    if other.len() >= limit {
        other.truncate(limit);
        return other;
    }

    let mut seen: HashSet<&str> = other.iter().map(|a| a.id.as_str()).collect();
    let mut extra = Vec::new();
    for article in pool {
        if other.len() + extra.len() >= limit {
            break;
        }
        if seen.insert(article.id.as_str()) {
            extra.push(article.clone());
        }
    }

    other.extend(extra);
    other.shuffle(rng);
    other.truncate(limit);
    other
}
