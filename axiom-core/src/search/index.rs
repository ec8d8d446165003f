//! Inverted index over the loaded email set

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::tokenizer::tokenize;
use crate::document::Document;

/// Token -> document positions
///
/// Keys are kept ordered so that every key sharing a prefix is one
/// contiguous range.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeSet<usize>>,
    document_count: usize,
}

impl InvertedIndex {
    /// Build an index over subject, from and body of every document
    pub fn build(documents: &[Document]) -> Self {
        let mut postings: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();

        for (position, document) in documents.iter().enumerate() {
            for token in tokenize(&document.searchable_text()) {
                postings.entry(token).or_default().insert(position);
            }
        }

        Self {
            postings,
            document_count: documents.len(),
        }
    }

    /// Number of documents the index was built over
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Positions of documents containing exactly `token`
    pub fn positions(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.postings.get(token)
    }

    /// Union of the position sets of every token starting with `prefix`
    pub fn prefix_positions(&self, prefix: &str) -> BTreeSet<usize> {
        self.postings
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(token, _)| token.starts_with(prefix))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect()
    }

    /// Positions matching every word of `query` as a token prefix.
    ///
    /// A blank query matches every document.
    pub fn search(&self, query: &str) -> BTreeSet<usize> {
        let words = tokenize(query);
        if words.is_empty() {
            return (0..self.document_count).collect();
        }

        let mut words = words.iter();
        let mut matched = match words.next() {
            Some(first) => self.prefix_positions(first),
            None => return BTreeSet::new(),
        };

        for word in words {
            if matched.is_empty() {
                break;
            }
            let candidates = self.prefix_positions(word);
            matched.retain(|position| candidates.contains(position));
        }

        matched
    }
}
