//! Admin console core.
//!
//! Holds the session state of the directory admin UI (categories, services,
//! dashboard counts, the service editor and its category picker) and drives every
//! operation through an [`AdminApi`]. Failures are logged and leave the state as it
//! was before the call.

pub mod category_index;
pub mod client;
pub mod editor;
pub mod error;
pub mod picker;
pub mod selection;

pub use category_index::CategoryIndex;
pub use client::{AdminApi, HttpAdminApi};
pub use editor::{ContentDraft, ServiceEditor, ServiceForm};
pub use error::{ConsoleError, ConsoleResult};
pub use picker::{CategoryPicker, PickOutcome, PickerState};
pub use selection::{CategorySelection, SelectedCategory};

use uuid::Uuid;

use crate::features::ai_services::dtos::AiServiceResponseDto;
use crate::features::dashboard::dtos::DashboardStatsDto;

pub struct AdminConsole<A: AdminApi> {
    api: A,
    categories: CategoryIndex,
    services: Vec<AiServiceResponseDto>,
    stats: DashboardStatsDto,
    pub editor: ServiceEditor,
    pub picker: CategoryPicker,
}

impl<A: AdminApi> AdminConsole<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            categories: CategoryIndex::default(),
            services: Vec::new(),
            stats: DashboardStatsDto::default(),
            editor: ServiceEditor::new(),
            picker: CategoryPicker::new(),
        }
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn services(&self) -> &[AiServiceResponseDto] {
        &self.services
    }

    pub fn stats(&self) -> DashboardStatsDto {
        self.stats
    }

    /// Initial fetch of everything the console shows
    pub async fn load(&mut self) {
        self.refresh_categories().await;
        self.refresh_services().await;
        self.refresh_stats().await;
    }

    pub async fn refresh_categories(&mut self) {
        match self.api.list_categories().await {
            Ok(categories) => {
                tracing::debug!("Loaded {} categories", categories.len());
                self.categories = CategoryIndex::new(categories);
            }
            Err(e) => tracing::error!("Failed to load categories: {}", e),
        }
    }

    pub async fn refresh_services(&mut self) {
        match self.api.list_services().await {
            Ok(services) => {
                tracing::debug!("Loaded {} services", services.len());
                self.services = services;
            }
            Err(e) => tracing::error!("Failed to load services: {}", e),
        }
    }

    pub async fn refresh_stats(&mut self) {
        match self.api.dashboard_stats().await {
            Ok(stats) => self.stats = stats,
            Err(e) => tracing::error!("Failed to load dashboard stats: {}", e),
        }
    }

    /// Blank form for a new service
    pub fn open_new(&mut self) {
        self.editor.reset();
        self.picker.close();
    }

    /// Load a listed service into the form. Returns false if it is not in the list.
    pub async fn open_edit(&mut self, id: Uuid) -> bool {
        let Some(service) = self.services.iter().find(|s| s.id == id) else {
            tracing::warn!("Service {} is not in the current list", id);
            return false;
        };

        self.picker.close();
        self.editor.load_for_edit(&self.api, service).await;
        true
    }

    pub fn open_picker(&mut self) {
        self.picker.open();
    }

    pub fn pick_top_level(&mut self, category_id: Uuid) -> PickOutcome {
        self.picker
            .choose_top_level(&self.categories, &mut self.editor.selection, category_id)
    }

    pub fn pick_parent_only(&mut self) -> PickOutcome {
        self.picker
            .choose_parent_only(&self.categories, &mut self.editor.selection)
    }

    pub fn pick_child(&mut self, child_id: Uuid) -> PickOutcome {
        self.picker
            .choose_child(&self.categories, &mut self.editor.selection, child_id)
    }

    pub fn remove_category(&mut self, category_id: Uuid) -> bool {
        self.editor.selection.remove(category_id)
    }

    pub fn set_main_category(&mut self, category_id: Uuid) -> bool {
        self.editor.selection.set_main(category_id)
    }

    /// Submit the editor. On success the lists are refreshed and the form reset.
    pub async fn save(&mut self) -> bool {
        match self.editor.submit(&self.api).await {
            Ok(saved) => {
                tracing::info!("Service saved: id={}, name={}", saved.id, saved.name);
                self.refresh_services().await;
                self.refresh_stats().await;
                self.editor.reset();
                true
            }
            Err(e) => {
                tracing::error!("Failed to save service: {}", e);
                false
            }
        }
    }

    /// Delete a service once `confirm` approves it (receives the service name).
    ///
    /// The list and stats are refreshed whether or not the delete succeeded.
    pub async fn delete_service(&mut self, id: Uuid, confirm: impl FnOnce(&str) -> bool) -> bool {
        let label = self
            .services
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string());

        if !confirm(&label) {
            return false;
        }

        let deleted = match self.api.delete_service(id).await {
            Ok(()) => {
                tracing::info!("Service deleted: id={}", id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete service {}: {}", id, e);
                false
            }
        };

        self.refresh_services().await;
        self.refresh_stats().await;
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ai_services::models::ContentType;
    use crate::shared::test_helpers::{sample_category, sample_service, MockAdminApi, MockCall};

    fn console_with(api: MockAdminApi) -> AdminConsole<MockAdminApi> {
        AdminConsole::new(api)
    }

    #[tokio::test]
    async fn test_load_populates_state() {
        let api = MockAdminApi::default();
        let parent = sample_category("Text", None, 1);
        api.set_categories(vec![parent.clone(), sample_category("Chat", Some(parent.id), 1)]);
        api.set_services(vec![sample_service(Uuid::new_v4())]);
        api.set_stats(DashboardStatsDto {
            total_services: 1,
            ..Default::default()
        });

        let mut console = console_with(api);
        console.load().await;

        assert_eq!(console.categories().len(), 2);
        assert!(console.categories().has_children(parent.id));
        assert_eq!(console.services().len(), 1);
        assert_eq!(console.stats().total_services, 1);
        assert_eq!(console.stats().total_views, 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_state() {
        let api = MockAdminApi::default();
        api.set_services(vec![sample_service(Uuid::new_v4())]);
        let mut console = console_with(api);
        console.load().await;

        console.api.fail("list_services");
        console.api.set_services(Vec::new());
        console.refresh_services().await;

        assert_eq!(console.services().len(), 1);
    }

    #[tokio::test]
    async fn test_picker_flow_through_console() {
        let api = MockAdminApi::default();
        let a = sample_category("A", None, 1);
        let b = sample_category("B", None, 2);
        api.set_categories(vec![a.clone(), b.clone(), sample_category("B1", Some(b.id), 1)]);
        let mut console = console_with(api);
        console.load().await;
        console.open_new();

        console.open_picker();
        assert_eq!(console.pick_top_level(a.id), PickOutcome::Added);
        console.open_picker();
        assert_eq!(console.pick_top_level(b.id), PickOutcome::Descended);
        assert_eq!(console.pick_parent_only(), PickOutcome::Added);

        assert!(console.remove_category(a.id));
        assert!(console.editor.selection.is_main(b.id));
    }

    #[tokio::test]
    async fn test_save_refreshes_and_resets_form() {
        let api = MockAdminApi::default();
        let mut console = console_with(api);
        console.open_new();
        console.editor.form.name = "Perplexity".to_string();
        console
            .editor
            .set_content_body(ContentType::MainFeatures, "Cited answers");

        assert!(console.save().await);

        let calls = console.api.calls();
        assert!(matches!(calls[0], MockCall::CreateService(_)));
        assert!(matches!(calls[1], MockCall::CreateContent(..)));
        assert!(matches!(calls[2], MockCall::ListServices));
        assert!(matches!(calls[3], MockCall::DashboardStats));
        assert_eq!(console.editor.form.name, "");
        assert!(console.editor.editing_id().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form() {
        let api = MockAdminApi::default();
        api.fail("create_service");
        let mut console = console_with(api);
        console.editor.form.name = "Draft".to_string();

        assert!(!console.save().await);
        assert_eq!(console.editor.form.name, "Draft");
        assert_eq!(console.api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_open_edit_then_save_updates() {
        let api = MockAdminApi::default();
        let service = sample_service(Uuid::new_v4());
        api.set_services(vec![service.clone()]);
        let mut console = console_with(api);
        console.refresh_services().await;

        assert!(console.open_edit(service.id).await);
        assert!(!console.open_edit(Uuid::new_v4()).await);
        assert!(console.save().await);

        assert!(console
            .api
            .calls()
            .iter()
            .any(|c| matches!(c, MockCall::UpdateService(id, _) if *id == service.id)));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let api = MockAdminApi::default();
        let service = sample_service(Uuid::new_v4());
        api.set_services(vec![service.clone()]);
        let mut console = console_with(api);
        console.refresh_services().await;

        let mut asked = String::new();
        let deleted = console
            .delete_service(service.id, |name| {
                asked = name.to_string();
                false
            })
            .await;

        assert!(!deleted);
        assert_eq!(asked, service.name);
        assert!(!console
            .api
            .calls()
            .iter()
            .any(|c| matches!(c, MockCall::DeleteService(_))));
    }

    #[tokio::test]
    async fn test_delete_refreshes_even_on_failure() {
        let api = MockAdminApi::default();
        api.fail("delete_service");
        let mut console = console_with(api);

        assert!(!console.delete_service(Uuid::new_v4(), |_| true).await);

        let calls = console.api.calls();
        assert!(matches!(calls[0], MockCall::DeleteService(_)));
        assert!(matches!(calls[1], MockCall::ListServices));
        assert!(matches!(calls[2], MockCall::DashboardStats));
    }
}
