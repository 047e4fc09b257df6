use super::model::{Article, Category, CategoryGraph};

impl CategoryGraph {
    /// Re-apply the dense id assignment of `reference`.
    ///
    /// Categories are matched by name and articles by original id. Matched
    /// entities take the reference id when it fits in this graph's id space;
    /// the rest fill the remaining ids in ascending order, so the result stays
    /// gap-free. Topology and type labels are unchanged.
    pub fn relabel_like(&self, reference: &CategoryGraph) -> CategoryGraph {
        let category_ids = assign_ids(
            self.categories
                .iter()
                .map(|c| reference.category_id(&c.name)),
            self.categories.len(),
        );
        let article_ids = assign_ids(
            self.articles
                .iter()
                .map(|a| reference.article_by_original(a.original_id).map(|r| r.id)),
            self.articles.len(),
        );

        let remap_categories =
            |ids: &[u32]| -> Vec<u32> { ids.iter().map(|&c| category_ids[c as usize]).collect() };
        let remap_articles =
            |ids: &[u32]| -> Vec<u32> { ids.iter().map(|&a| article_ids[a as usize]).collect() };

        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .map(|c| Category {
                id: category_ids[c.id as usize],
                name: c.name.clone(),
                parents: remap_categories(&c.parents),
                children: remap_categories(&c.children),
                articles: remap_articles(&c.articles),
            })
            .collect();
        categories.sort_unstable_by_key(|c| c.id);

        let mut articles: Vec<Article> = self
            .articles
            .iter()
            .map(|a| Article {
                id: article_ids[a.id as usize],
                original_id: a.original_id,
                title: a.title.clone(),
                type_id: a.type_id,
                categories: remap_categories(&a.categories),
            })
            .collect();
        articles.sort_unstable_by_key(|a| a.id);

        CategoryGraph::from_parts(categories, articles, self.type_labels.clone())
    }
}

/// Build an old-id -> new-id table from optional preferred ids.
fn assign_ids(preferred: impl Iterator<Item = Option<u32>>, len: usize) -> Vec<u32> {
    let mut taken = vec![false; len];
    let mut assigned: Vec<Option<u32>> = preferred
        .map(|p| match p {
            Some(id) if (id as usize) < len && !taken[id as usize] => {
                taken[id as usize] = true;
                Some(id)
            }
            _ => None,
        })
        .collect();

    let mut cursor = 0usize;
    for slot in assigned.iter_mut().filter(|s| s.is_none()) {
        while taken[cursor] {
            cursor += 1;
        }
        taken[cursor] = true;
        *slot = Some(cursor as u32);
    }

    assigned.into_iter().flatten().collect()
}
