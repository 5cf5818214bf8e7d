use uuid::Uuid;

use crate::features::ai_services::dtos::{CategoryAssignmentDto, ServiceCategoryDto};
use crate::features::categories::dtos::CategoryResponseDto;

/// A category chosen for the service being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCategory {
    pub category_id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
}

impl From<&CategoryResponseDto> for SelectedCategory {
    fn from(c: &CategoryResponseDto) -> Self {
        Self {
            category_id: c.id,
            name: c.name.clone(),
            parent_id: c.parent_id,
        }
    }
}

/// Ordered category assignments with a single designated main entry.
///
/// `main` is `None` exactly when the selection is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    entries: Vec<SelectedCategory>,
    main: Option<usize>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from assignments as stored on a service.
    ///
    /// The first flagged entry becomes main; if none is flagged the first entry is.
    pub fn from_assignments(assignments: &[ServiceCategoryDto]) -> Self {
        let mut selection = Self::new();
        for assignment in assignments {
            selection.add(SelectedCategory {
                category_id: assignment.category_id,
                name: assignment.name.clone(),
                parent_id: assignment.parent_id,
            });
        }

        if let Some(main) = assignments.iter().find(|a| a.is_main_category) {
            selection.set_main(main.category_id);
        }
        selection
    }

    /// Append a category; the first selection becomes main. Returns false if already selected.
    pub fn add(&mut self, category: SelectedCategory) -> bool {
        if self.contains(category.category_id) {
            return false;
        }

        self.entries.push(category);
        if self.main.is_none() {
            self.main = Some(self.entries.len() - 1);
        }
        true
    }

    /// Remove a category. When the main entry goes, the first remaining entry is promoted.
    pub fn remove(&mut self, category_id: Uuid) -> bool {
        let Some(index) = self.position(category_id) else {
            return false;
        };

        self.entries.remove(index);
        self.main = match self.main {
            _ if self.entries.is_empty() => None,
            Some(main) if main == index => Some(0),
            Some(main) if main > index => Some(main - 1),
            other => other,
        };
        true
    }

    /// Make `category_id` the only main entry. Returns false if it is not selected.
    pub fn set_main(&mut self, category_id: Uuid) -> bool {
        match self.position(category_id) {
            Some(index) => {
                self.main = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, category_id: Uuid) -> bool {
        self.position(category_id).is_some()
    }

    pub fn is_main(&self, category_id: Uuid) -> bool {
        self.main.is_some() && self.position(category_id) == self.main
    }

    pub fn main(&self) -> Option<&SelectedCategory> {
        self.main.and_then(|index| self.entries.get(index))
    }

    pub fn entries(&self) -> &[SelectedCategory] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.main = None;
    }

    /// Assignment payload in selection order
    pub fn assignments(&self) -> Vec<CategoryAssignmentDto> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| CategoryAssignmentDto {
                category_id: entry.category_id,
                is_main_category: Some(index) == self.main,
            })
            .collect()
    }

    fn position(&self, category_id: Uuid) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.category_id == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> SelectedCategory {
        SelectedCategory {
            category_id: Uuid::new_v4(),
            name: name.to_string(),
            parent_id: None,
        }
    }

    fn main_count(selection: &CategorySelection) -> usize {
        selection
            .assignments()
            .iter()
            .filter(|a| a.is_main_category)
            .count()
    }

    #[test]
    fn test_first_added_is_main() {
        let mut selection = CategorySelection::new();
        let a = category("A");
        let b = category("B");

        assert!(selection.add(a.clone()));
        assert!(selection.add(b.clone()));
        assert!(selection.is_main(a.category_id));
        assert!(!selection.is_main(b.category_id));
    }

    #[test]
    fn test_add_is_noop_when_already_selected() {
        let mut selection = CategorySelection::new();
        let a = category("A");

        assert!(selection.add(a.clone()));
        assert!(!selection.add(a));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_removing_main_promotes_first_remaining() {
        let mut selection = CategorySelection::new();
        let a = category("A");
        let b = category("B");
        let c = category("C");
        selection.add(a.clone());
        selection.add(b.clone());
        selection.add(c.clone());

        selection.set_main(c.category_id);
        assert!(selection.remove(c.category_id));
        assert!(selection.is_main(a.category_id));

        assert!(selection.remove(a.category_id));
        assert!(selection.is_main(b.category_id));

        assert!(selection.remove(b.category_id));
        assert!(selection.main().is_none());
        assert!(selection.assignments().is_empty());
    }

    #[test]
    fn test_removing_non_main_keeps_main() {
        let mut selection = CategorySelection::new();
        let a = category("A");
        let b = category("B");
        let c = category("C");
        selection.add(a.clone());
        selection.add(b.clone());
        selection.add(c.clone());
        selection.set_main(c.category_id);

        selection.remove(a.category_id);
        assert!(selection.is_main(c.category_id));
        assert!(!selection.remove(a.category_id));
    }

    #[test]
    fn test_set_main_clears_others() {
        let mut selection = CategorySelection::new();
        let a = category("A");
        let b = category("B");
        selection.add(a.clone());
        selection.add(b.clone());

        assert!(selection.set_main(b.category_id));
        let assignments = selection.assignments();
        assert!(!assignments[0].is_main_category);
        assert!(assignments[1].is_main_category);

        assert!(!selection.set_main(Uuid::new_v4()));
        assert!(selection.is_main(b.category_id));
    }

    #[test]
    fn test_main_invariant_over_mixed_operations() {
        let pool: Vec<SelectedCategory> = (0..6).map(|i| category(&format!("C{}", i))).collect();
        let mut selection = CategorySelection::new();

        // Deterministic walk mixing every operation
        for step in 0..60usize {
            let target = &pool[(step * 7 + step / 3) % pool.len()];
            match step % 4 {
                0 | 1 => {
                    selection.add(target.clone());
                }
                2 => {
                    selection.remove(target.category_id);
                }
                _ => {
                    selection.set_main(target.category_id);
                }
            }

            let expected = usize::from(!selection.is_empty());
            assert_eq!(main_count(&selection), expected, "step {}", step);
        }
    }

    #[test]
    fn test_from_assignments_keeps_flagged_main() {
        let stored = vec![
            ServiceCategoryDto {
                category_id: Uuid::new_v4(),
                name: "A".to_string(),
                parent_id: None,
                is_main_category: false,
            },
            ServiceCategoryDto {
                category_id: Uuid::new_v4(),
                name: "B".to_string(),
                parent_id: None,
                is_main_category: true,
            },
        ];

        let selection = CategorySelection::from_assignments(&stored);
        assert_eq!(selection.main().unwrap().name, "B");

        let unflagged: Vec<ServiceCategoryDto> = stored
            .into_iter()
            .map(|mut a| {
                a.is_main_category = false;
                a
            })
            .collect();
        let selection = CategorySelection::from_assignments(&unflagged);
        assert_eq!(selection.main().unwrap().name, "A");
    }
}
