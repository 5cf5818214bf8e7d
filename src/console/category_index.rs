use std::collections::HashMap;

use uuid::Uuid;

use crate::features::categories::dtos::{
    parent_links, sort_siblings, tree_parent, CategoryResponseDto, CategoryTreeDto,
};

/// Flat category store indexed by id, with children grouped under their parent
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_id: HashMap<Uuid, CategoryResponseDto>,
    top_level: Vec<Uuid>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<CategoryResponseDto>) -> Self {
        let by_id: HashMap<Uuid, CategoryResponseDto> =
            categories.iter().map(|c| (c.id, c.clone())).collect();

        let parents = parent_links(&categories);

        let mut roots = Vec::new();
        let mut grouped: HashMap<Uuid, Vec<CategoryResponseDto>> = HashMap::new();
        for category in categories {
            match tree_parent(category.id, &parents) {
                Some(parent_id) => grouped.entry(parent_id).or_default().push(category),
                None => roots.push(category),
            }
        }

        sort_siblings(&mut roots);
        let children = grouped
            .into_iter()
            .map(|(parent_id, mut siblings)| {
                sort_siblings(&mut siblings);
                (parent_id, siblings.into_iter().map(|c| c.id).collect())
            })
            .collect();

        Self {
            by_id,
            top_level: roots.into_iter().map(|c| c.id).collect(),
            children,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&CategoryResponseDto> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Categories without a (known) parent, in sibling order
    pub fn top_level(&self) -> Vec<&CategoryResponseDto> {
        self.resolve(&self.top_level)
    }

    pub fn is_top_level(&self, id: Uuid) -> bool {
        self.top_level.contains(&id)
    }

    pub fn children_of(&self, parent_id: Uuid) -> Vec<&CategoryResponseDto> {
        self.children
            .get(&parent_id)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    pub fn has_children(&self, id: Uuid) -> bool {
        self.children.get(&id).is_some_and(|ids| !ids.is_empty())
    }

    /// Nested view for display
    pub fn tree(&self) -> Vec<CategoryTreeDto> {
        CategoryTreeDto::build_tree(self.by_id.values().cloned().collect())
    }

    fn resolve(&self, ids: &[Uuid]) -> Vec<&CategoryResponseDto> {
        ids.iter().filter_map(|id| self.by_id.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_category;

    #[test]
    fn test_groups_children_and_orders_siblings() {
        let text = sample_category("Text", None, 2);
        let image = sample_category("Image", None, 1);
        let writing = sample_category("Writing", Some(text.id), 2);
        let chat = sample_category("Chat", Some(text.id), 1);
        let coding = sample_category("Coding", Some(text.id), 1);

        let index = CategoryIndex::new(vec![
            writing.clone(),
            text.clone(),
            chat.clone(),
            image.clone(),
            coding.clone(),
        ]);

        let top: Vec<&str> = index.top_level().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(top, ["Image", "Text"]);

        let children: Vec<&str> = index
            .children_of(text.id)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(children, ["Chat", "Coding", "Writing"]);

        assert!(index.has_children(text.id));
        assert!(!index.has_children(image.id));
        assert!(index.is_top_level(image.id));
        assert!(!index.is_top_level(chat.id));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_orphan_is_top_level() {
        let orphan = sample_category("Orphan", Some(Uuid::new_v4()), 1);
        let index = CategoryIndex::new(vec![orphan.clone()]);

        assert!(index.is_top_level(orphan.id));
        assert_eq!(index.tree().len(), 1);
    }

    #[test]
    fn test_parent_cycle_stays_reachable() {
        let mut a = sample_category("A", None, 1);
        let mut b = sample_category("B", None, 2);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);

        let index = CategoryIndex::new(vec![a.clone(), b.clone()]);

        let top: Vec<&str> = index.top_level().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(top, ["A", "B"]);
        assert!(!index.has_children(a.id));
        assert_eq!(index.tree().len(), 2);
    }
}
