use std::collections::HashMap;

use super::{ArticleId, CategoryId, TypeId};

/// A category vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parents: Vec<CategoryId>,
    pub children: Vec<CategoryId>,
    /// Articles tagged directly to this category.
    pub articles: Vec<ArticleId>,
}

impl Category {
    pub(crate) fn new(id: CategoryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            parents: Vec::new(),
            children: Vec::new(),
            articles: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An article vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    /// Article id from the source dump.
    pub original_id: u64,
    pub title: String,
    pub type_id: Option<TypeId>,
    pub categories: Vec<CategoryId>,
}

/// Immutable category DAG with dense ids.
///
/// `categories[i].id == i` and `articles[i].id == i` hold for every instance;
/// both enumerations are gap-free. Cloning produces an independent deep copy.
#[derive(Debug, Clone)]
pub struct CategoryGraph {
    pub(crate) categories: Vec<Category>,
    pub(crate) articles: Vec<Article>,
    pub(crate) type_labels: Vec<String>,
    pub(crate) category_index: HashMap<String, CategoryId>,
    pub(crate) article_index: HashMap<u64, ArticleId>,
}

impl CategoryGraph {
    /// Build the lookup indices from already-dense vectors.
    pub(crate) fn from_parts(
        categories: Vec<Category>,
        articles: Vec<Article>,
        type_labels: Vec<String>,
    ) -> Self {
        let category_index = categories
            .iter()
            .map(|c| (c.name.clone(), c.id))
            .collect();
        let article_index = articles.iter().map(|a| (a.original_id, a.id)).collect();

        Self {
            categories,
            articles,
            type_labels,
            category_index,
            article_index,
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id as usize)
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(id as usize)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.category_index.get(name).copied()
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.category_id(name).and_then(|id| self.category(id))
    }

    pub fn article_by_original(&self, original_id: u64) -> Option<&Article> {
        self.article_index
            .get(&original_id)
            .and_then(|&id| self.article(id))
    }

    /// Type label of an article, if one was assigned.
    pub fn article_type(&self, id: ArticleId) -> Option<&str> {
        self.article(id)
            .and_then(|a| a.type_id)
            .and_then(|t| self.type_labels.get(t as usize))
            .map(String::as_str)
    }

    /// Distinct type labels seen during import.
    pub fn type_labels(&self) -> &[String] {
        &self.type_labels
    }

    /// Categories without children; they are ready for evaluation at start.
    pub fn leaves(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories
            .iter()
            .filter(|c| c.is_leaf())
            .map(|c| c.id)
    }
}
