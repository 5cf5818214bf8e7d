use uuid::Uuid;

use crate::console::client::AdminApi;
use crate::console::error::ConsoleResult;
use crate::console::selection::CategorySelection;
use crate::features::ai_services::dtos::{
    AiServiceResponseDto, CategoryAssignmentDto, CreateServiceContentDto,
    ServiceContentResponseDto, UpsertAiServiceDto,
};
use crate::features::ai_services::models::{ContentType, DifficultyLevel, PricingModel, ServiceType};
use crate::shared::types::RecordStatus;

/// Editable fields of a service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub website: String,
    pub logo: Option<String>,
    pub pricing_model: PricingModel,
    pub pricing_info: Option<String>,
    pub difficulty_level: DifficultyLevel,
    pub status: RecordStatus,
    pub is_visible: bool,
    pub is_step_pick: bool,
    pub nationality: String,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            service_type: ServiceType::Llm,
            website: String::new(),
            logo: None,
            pricing_model: PricingModel::default(),
            pricing_info: None,
            difficulty_level: DifficultyLevel::default(),
            status: RecordStatus::default(),
            is_visible: true,
            is_step_pick: false,
            nationality: String::new(),
        }
    }
}

impl From<&AiServiceResponseDto> for ServiceForm {
    fn from(s: &AiServiceResponseDto) -> Self {
        Self {
            name: s.name.clone(),
            description: s.description.clone(),
            service_type: s.service_type,
            website: s.website.clone(),
            logo: s.logo.clone(),
            pricing_model: s.pricing_model,
            pricing_info: s.pricing_info.clone(),
            difficulty_level: s.difficulty_level,
            status: s.status,
            is_visible: s.is_visible,
            is_step_pick: s.is_step_pick,
            nationality: s.nationality.clone(),
        }
    }
}

impl ServiceForm {
    pub fn to_payload(&self, categories: Vec<CategoryAssignmentDto>) -> UpsertAiServiceDto {
        UpsertAiServiceDto {
            name: self.name.clone(),
            description: self.description.clone(),
            service_type: self.service_type,
            website: self.website.clone(),
            logo: self.logo.clone(),
            pricing_model: self.pricing_model,
            pricing_info: self.pricing_info.clone(),
            difficulty_level: self.difficulty_level,
            status: self.status,
            is_visible: self.is_visible,
            is_step_pick: self.is_step_pick,
            nationality: self.nationality.clone(),
            categories,
        }
    }
}

/// One free-text section of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub display_order: i32,
}

impl ContentDraft {
    pub fn placeholder(content_type: ContentType) -> Self {
        Self {
            content_type,
            title: content_type.default_title().to_string(),
            body: String::new(),
            display_order: content_type.default_order(),
        }
    }

    /// Whitespace-only bodies count as empty
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    pub fn to_dto(&self) -> CreateServiceContentDto {
        CreateServiceContentDto {
            content_type: self.content_type,
            title: self.title.clone(),
            body: self.body.clone(),
            display_order: self.display_order,
        }
    }
}

fn placeholders() -> Vec<ContentDraft> {
    ContentType::ALL
        .into_iter()
        .map(ContentDraft::placeholder)
        .collect()
}

/// Create/edit form for a service with its categories and content sections
#[derive(Debug, Clone)]
pub struct ServiceEditor {
    pub form: ServiceForm,
    pub selection: CategorySelection,
    contents: Vec<ContentDraft>,
    editing_id: Option<Uuid>,
}

impl Default for ServiceEditor {
    fn default() -> Self {
        Self {
            form: ServiceForm::default(),
            selection: CategorySelection::new(),
            contents: placeholders(),
            editing_id: None,
        }
    }
}

impl ServiceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field, drop the edited id and reseed the content placeholders
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Id of the service being edited, `None` when creating
    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing_id
    }

    pub fn contents(&self) -> &[ContentDraft] {
        &self.contents
    }

    pub fn content_mut(&mut self, content_type: ContentType) -> Option<&mut ContentDraft> {
        self.contents
            .iter_mut()
            .find(|d| d.content_type == content_type)
    }

    pub fn set_content_body(&mut self, content_type: ContentType, body: impl Into<String>) {
        if let Some(draft) = self.content_mut(content_type) {
            draft.body = body.into();
        }
    }

    /// Load an existing service, then merge its saved content blocks.
    ///
    /// A failed content fetch is logged and leaves the placeholders empty.
    pub async fn load_for_edit(&mut self, api: &dyn AdminApi, service: &AiServiceResponseDto) {
        self.reset();
        self.editing_id = Some(service.id);
        self.form = ServiceForm::from(service);
        self.selection =
            CategorySelection::from_assignments(service.categories.as_deref().unwrap_or_default());

        match api.list_contents(service.id).await {
            Ok(saved) => self.merge_contents(saved),
            Err(e) => tracing::warn!(
                "Failed to load contents for service {}: {}",
                service.id,
                e
            ),
        }
    }

    /// Fill placeholders from saved blocks, matched by content type
    pub fn merge_contents(&mut self, saved: Vec<ServiceContentResponseDto>) {
        for block in saved {
            if let Some(draft) = self.content_mut(block.content_type) {
                draft.title = block.title;
                draft.body = block.body;
                draft.display_order = block.display_order;
            }
        }
    }

    /// Save the service (PUT when editing, POST otherwise), then each non-empty content block.
    ///
    /// Content failures are logged and do not fail the submit; the service write stands.
    pub async fn submit(&self, api: &dyn AdminApi) -> ConsoleResult<AiServiceResponseDto> {
        let payload = self.form.to_payload(self.selection.assignments());

        let saved = match self.editing_id {
            Some(id) => api.update_service(id, &payload).await?,
            None => api.create_service(&payload).await?,
        };

        let mut failed = 0;
        for draft in self.contents.iter().filter(|d| d.has_body()) {
            if let Err(e) = api.create_content(saved.id, &draft.to_dto()).await {
                failed += 1;
                tracing::warn!(
                    "Failed to save {} content for service {}: {}",
                    draft.content_type,
                    saved.id,
                    e
                );
            }
        }

        if failed > 0 {
            tracing::warn!(
                "Service {} saved with {} content block(s) not persisted",
                saved.id,
                failed
            );
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_service, MockAdminApi, MockCall};

    fn filled_editor() -> ServiceEditor {
        let mut editor = ServiceEditor::new();
        editor.form.name = "Claude".to_string();
        editor.form.description = "Assistant".to_string();
        editor.form.website = "https://claude.ai".to_string();
        editor.form.nationality = "US".to_string();
        editor
    }

    #[test]
    fn test_new_editor_has_three_empty_placeholders() {
        let editor = ServiceEditor::new();
        let types: Vec<ContentType> = editor.contents().iter().map(|d| d.content_type).collect();

        assert_eq!(types, ContentType::ALL);
        assert!(editor.contents().iter().all(|d| !d.has_body()));
        assert!(editor.editing_id().is_none());
    }

    #[tokio::test]
    async fn test_submit_without_id_creates_and_sends_only_non_empty_contents() {
        let api = MockAdminApi::default();
        let mut editor = filled_editor();
        editor.set_content_body(ContentType::TargetUsers, "Developers");
        editor.set_content_body(ContentType::UseCases, "   \n");

        let saved = editor.submit(&api).await.unwrap();

        let calls = api.calls();
        assert!(matches!(calls[0], MockCall::CreateService(_)));
        let sent: Vec<&MockCall> = calls
            .iter()
            .filter(|c| matches!(c, MockCall::CreateContent(..)))
            .collect();
        assert_eq!(sent.len(), 1);
        match sent[0] {
            MockCall::CreateContent(service_id, dto) => {
                assert_eq!(*service_id, saved.id);
                assert_eq!(dto.content_type, ContentType::TargetUsers);
                assert_eq!(dto.body, "Developers");
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_with_id_updates() {
        let api = MockAdminApi::default();
        let service = sample_service(Uuid::new_v4());
        let mut editor = ServiceEditor::new();
        editor.load_for_edit(&api, &service).await;

        editor.submit(&api).await.unwrap();

        let updates: Vec<MockCall> = api
            .calls()
            .into_iter()
            .filter(|c| matches!(c, MockCall::UpdateService(..) | MockCall::CreateService(_)))
            .collect();
        assert_eq!(updates.len(), 1);
        assert!(matches!(&updates[0], MockCall::UpdateService(id, _) if *id == service.id));
    }

    #[tokio::test]
    async fn test_failed_service_write_sends_no_contents() {
        let api = MockAdminApi::default();
        api.fail("create_service");
        let mut editor = filled_editor();
        editor.set_content_body(ContentType::MainFeatures, "Reasoning");

        assert!(editor.submit(&api).await.is_err());
        assert!(!api
            .calls()
            .iter()
            .any(|c| matches!(c, MockCall::CreateContent(..))));
    }

    #[tokio::test]
    async fn test_content_failure_keeps_saving_remaining_blocks() {
        let api = MockAdminApi::default();
        api.fail("create_content");
        let mut editor = filled_editor();
        editor.set_content_body(ContentType::TargetUsers, "Teams");
        editor.set_content_body(ContentType::MainFeatures, "Search");

        assert!(editor.submit(&api).await.is_ok());
        let attempts = api
            .calls()
            .iter()
            .filter(|c| matches!(c, MockCall::CreateContent(..)))
            .count();
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_load_for_edit_merges_by_content_type() {
        let api = MockAdminApi::default();
        let service = sample_service(Uuid::new_v4());
        api.set_contents(vec![ServiceContentResponseDto {
            id: Uuid::new_v4(),
            service_id: service.id,
            content_type: ContentType::UseCases,
            title: "When to use".to_string(),
            body: "Drafting".to_string(),
            display_order: 7,
        }]);

        let mut editor = ServiceEditor::new();
        editor.load_for_edit(&api, &service).await;

        assert_eq!(editor.editing_id(), Some(service.id));
        assert_eq!(editor.form.name, service.name);

        let use_cases = editor.content_mut(ContentType::UseCases).unwrap().clone();
        assert_eq!(use_cases.title, "When to use");
        assert_eq!(use_cases.body, "Drafting");
        assert_eq!(use_cases.display_order, 7);

        let target_users = editor.content_mut(ContentType::TargetUsers).unwrap();
        assert!(!target_users.has_body());
        assert_eq!(target_users.title, "Target Users");
    }

    #[tokio::test]
    async fn test_failed_content_fetch_leaves_placeholders_empty() {
        let api = MockAdminApi::default();
        api.fail("list_contents");
        let service = sample_service(Uuid::new_v4());

        let mut editor = ServiceEditor::new();
        editor.load_for_edit(&api, &service).await;

        assert_eq!(editor.editing_id(), Some(service.id));
        assert!(editor.contents().iter().all(|d| !d.has_body()));
    }

    #[tokio::test]
    async fn test_reset_clears_edit_state() {
        let api = MockAdminApi::default();
        let service = sample_service(Uuid::new_v4());
        let mut editor = ServiceEditor::new();
        editor.load_for_edit(&api, &service).await;
        editor.set_content_body(ContentType::TargetUsers, "Anyone");

        editor.reset();

        assert!(editor.editing_id().is_none());
        assert!(editor.selection.is_empty());
        assert_eq!(editor.form, ServiceForm::default());
        assert!(editor.contents().iter().all(|d| !d.has_body()));
    }
}
