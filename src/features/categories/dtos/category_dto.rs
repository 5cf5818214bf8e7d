use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::types::RecordStatus;

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,

    /// Only return categories with this status (default: all)
    pub status: Option<RecordStatus>,
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub status: RecordStatus,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            display_order: c.display_order,
            status: c.status,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub status: RecordStatus,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories.
    ///
    /// Children are grouped under their parent id; categories whose parent is
    /// missing from the list, or that sit on a parent cycle, are treated as
    /// roots. Siblings are ordered by `display_order`, then `name`.
    pub fn build_tree(categories: Vec<CategoryResponseDto>) -> Vec<CategoryTreeDto> {
        let parents = parent_links(&categories);

        let mut roots = Vec::new();
        let mut children_by_parent: HashMap<Uuid, Vec<CategoryResponseDto>> = HashMap::new();
        for category in categories {
            match tree_parent(category.id, &parents) {
                Some(parent_id) => {
                    children_by_parent
                        .entry(parent_id)
                        .or_default()
                        .push(category);
                }
                None => roots.push(category),
            }
        }

        sort_siblings(&mut roots);
        roots
            .into_iter()
            .map(|root| Self::build_node(root, &mut children_by_parent))
            .collect()
    }

    fn build_node(
        category: CategoryResponseDto,
        children_by_parent: &mut HashMap<Uuid, Vec<CategoryResponseDto>>,
    ) -> CategoryTreeDto {
        // Removing the entry means a parent cycle can never be visited twice
        let mut children = children_by_parent.remove(&category.id).unwrap_or_default();
        sort_siblings(&mut children);

        let children = children
            .into_iter()
            .map(|child| Self::build_node(child, children_by_parent))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name,
            description: category.description,
            icon: category.icon,
            display_order: category.display_order,
            status: category.status,
            children,
        }
    }
}

/// Parent id of every category in the list
pub fn parent_links(categories: &[CategoryResponseDto]) -> HashMap<Uuid, Option<Uuid>> {
    categories.iter().map(|c| (c.id, c.parent_id)).collect()
}

/// Parent a category hangs under in a tree view.
///
/// `None` when the category has no parent in `parents` or when following
/// parent links leads back to it.
pub fn tree_parent(id: Uuid, parents: &HashMap<Uuid, Option<Uuid>>) -> Option<Uuid> {
    let parent_id = parents.get(&id).copied().flatten()?;
    if !parents.contains_key(&parent_id) {
        return None;
    }

    let mut seen = HashSet::new();
    let mut current = Some(parent_id);
    while let Some(ancestor) = current {
        if ancestor == id {
            return None;
        }
        if !seen.insert(ancestor) {
            // Joins a cycle this category is not part of
            break;
        }
        current = parents.get(&ancestor).copied().flatten();
    }

    Some(parent_id)
}

/// Order siblings by `display_order`, then `name`
pub fn sort_siblings(categories: &mut [CategoryResponseDto]) {
    categories.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    /// Parent category; omit for a top-level category
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default)]
    pub status: RecordStatus,
}

/// Request DTO for updating a category (full replacement of editable fields)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default)]
    pub status: RecordStatus,
}
