use std::collections::{HashMap, HashSet};

use crate::error::GraphError;

use super::model::{Article, Category, CategoryGraph};
use super::{ArticleId, CategoryId, TypeId};

/// Mutable construction phase of a [`CategoryGraph`].
///
/// Vertices are created on first reference. Every method takes `&mut self`,
/// so construction is race-free; a builder can be moved into a loader thread
/// and frozen there.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    categories: Vec<Category>,
    articles: Vec<Article>,
    category_index: HashMap<String, CategoryId>,
    article_index: HashMap<u64, ArticleId>,
    edges: HashSet<(CategoryId, CategoryId)>,
    type_labels: Vec<String>,
    type_index: HashMap<String, TypeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.category_index.get(name).copied()
    }

    /// Get a category by name, creating it if this is the first reference.
    pub fn get_or_create_category(&mut self, name: &str) -> CategoryId {
        if let Some(&id) = self.category_index.get(name) {
            return id;
        }
        let id = self.categories.len() as CategoryId;
        self.categories.push(Category::new(id, name));
        self.category_index.insert(name.to_string(), id);
        id
    }

    /// Record `child -> parent`. Returns `false` for an edge seen before.
    pub fn add_edge(&mut self, child: CategoryId, parent: CategoryId) -> bool {
        if !self.edges.insert((child, parent)) {
            return false;
        }
        self.categories[parent as usize].children.push(child);
        self.categories[child as usize].parents.push(parent);
        true
    }

    /// Name-based variant of [`add_edge`](Self::add_edge) creating both ends.
    pub fn add_edge_named(&mut self, child: &str, parent: &str) -> bool {
        let parent = self.get_or_create_category(parent);
        let child = self.get_or_create_category(child);
        self.add_edge(child, parent)
    }

    /// Get an article by its original id. The title is only set on creation.
    pub fn get_or_create_article(&mut self, original_id: u64, title: &str) -> ArticleId {
        if let Some(&id) = self.article_index.get(&original_id) {
            return id;
        }
        let id = self.articles.len() as ArticleId;
        self.articles.push(Article {
            id,
            original_id,
            title: title.to_string(),
            type_id: None,
            categories: Vec::new(),
        });
        self.article_index.insert(original_id, id);
        id
    }

    /// Tag an article to a category. Returns `false` if the tag already exists.
    pub fn tag_article(&mut self, article: ArticleId, category: CategoryId) -> bool {
        let entry = &mut self.articles[article as usize];
        if entry.categories.contains(&category) {
            return false;
        }
        entry.categories.push(category);
        self.categories[category as usize].articles.push(article);
        true
    }

    /// Assign a type label to a known article. Unknown articles are skipped
    /// and reported with `false`; a later assignment overwrites an earlier one.
    pub fn set_article_type(&mut self, original_id: u64, label: &str) -> bool {
        let Some(&article) = self.article_index.get(&original_id) else {
            return false;
        };
        let type_id = match self.type_index.get(label) {
            Some(&t) => t,
            None => {
                let t = self.type_labels.len() as TypeId;
                self.type_labels.push(label.to_string());
                self.type_index.insert(label.to_string(), t);
                t
            }
        };
        self.articles[article as usize].type_id = Some(type_id);
        true
    }

    /// Freeze the topology.
    ///
    /// Dense ids are the creation order of each vertex kind, so the
    /// enumeration is 0-based and gap-free. Fails with
    /// [`GraphError::Cycle`] when the edges are not acyclic.
    pub fn freeze(self) -> Result<CategoryGraph, GraphError> {
        if let Some(path) = find_cycle(&self.categories) {
            return Err(GraphError::Cycle { path });
        }

        tracing::debug!(
            categories = self.categories.len(),
            articles = self.articles.len(),
            edges = self.edges.len(),
            types = self.type_labels.len(),
            "category graph frozen"
        );

        Ok(CategoryGraph::from_parts(
            self.categories,
            self.articles,
            self.type_labels,
        ))
    }
}

/// Leaf-up elimination (Kahn's algorithm on child counts).
///
/// Every category left over has at least one unresolved child, so following
/// unresolved children from any leftover must revisit a category. The
/// revisited stretch is the reported cycle.
///
/// O(V + E), iterative, so deep hierarchies cannot overflow the stack.
fn find_cycle(categories: &[Category]) -> Option<Vec<String>> {
    let mut unresolved: Vec<usize> = categories.iter().map(|c| c.children.len()).collect();
    let mut stack: Vec<CategoryId> = categories
        .iter()
        .filter(|c| c.is_leaf())
        .map(|c| c.id)
        .collect();
    let mut resolved = 0usize;

    while let Some(id) = stack.pop() {
        resolved += 1;
        for &parent in &categories[id as usize].parents {
            let remaining = &mut unresolved[parent as usize];
            *remaining -= 1;
            if *remaining == 0 {
                stack.push(parent);
            }
        }
    }

    if resolved == categories.len() {
        return None;
    }

    let start = unresolved.iter().position(|&n| n > 0)?;
    let mut path: Vec<CategoryId> = Vec::new();
    let mut position: HashMap<CategoryId, usize> = HashMap::new();
    let mut current = start as CategoryId;

    loop {
        if let Some(&pos) = position.get(&current) {
            let mut names: Vec<String> = path[pos..]
                .iter()
                .map(|&id| categories[id as usize].name.clone())
                .collect();
            names.push(categories[current as usize].name.clone());
            return Some(names);
        }
        position.insert(current, path.len());
        path.push(current);
        current = *categories[current as usize]
            .children
            .iter()
            .find(|&&child| unresolved[child as usize] > 0)?;
    }
}
