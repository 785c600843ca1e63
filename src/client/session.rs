use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    client::{
        api::PortfolioClient,
        error::ClientError,
        filter::{filter_projects, filter_skills, skill_categories},
        mirror::Mirror,
    },
    entities::{
        project::{NewProject, Project, UpdateProjectRequest},
        skill::{NewSkill, Skill, UpdateSkillRequest},
    },
    settings::ClientConfig,
};

/// How the skills mirror follows a successful create or update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillSyncMode {
    /// Patch the mirror with the returned record.
    #[default]
    PatchLocal,
    /// Re-fetch the whole Skills collection.
    Refetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub query: String,
    pub category: Option<String>,
}

/// Clears its flag when dropped, on success and failure alike.
struct FlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        FlagGuard { flag }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Client-side state: both mirrors, the view filter, the busy flag, one
/// loading flag per collection and queued notifications. Lock guards are
/// never held across an `.await`.
pub struct SyncSession {
    client: PortfolioClient,
    projects: RwLock<Mirror<Project>>,
    skills: RwLock<Mirror<Skill>>,
    filter: RwLock<ViewFilter>,
    busy: AtomicBool,
    loading_projects: AtomicBool,
    loading_skills: AtomicBool,
    notifications: Mutex<VecDeque<Notification>>,
    skill_sync: SkillSyncMode,
}

impl SyncSession {
    pub fn new(client: PortfolioClient) -> Self {
        SyncSession {
            client,
            projects: RwLock::new(Mirror::new()),
            skills: RwLock::new(Mirror::new()),
            filter: RwLock::new(ViewFilter::default()),
            busy: AtomicBool::new(false),
            loading_projects: AtomicBool::new(false),
            loading_skills: AtomicBool::new(false),
            notifications: Mutex::new(VecDeque::new()),
            skill_sync: SkillSyncMode::default(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(PortfolioClient::new(&config.api_url)?))
    }

    pub fn with_skill_sync(mut self, mode: SkillSyncMode) -> Self {
        self.skill_sync = mode;
        self
    }

    pub fn skill_sync_mode(&self) -> SkillSyncMode {
        self.skill_sync
    }

    // ───── Loading ──────────────────────────────────────────────────

    /// Fetches both collections concurrently. A failed fetch empties its
    /// mirror and queues an error notification; nothing is retried.
    pub async fn load(&self) {
        tokio::join!(self.fetch_projects(), self.fetch_skills());
    }

    async fn fetch_projects(&self) {
        let _loading = FlagGuard::raise(&self.loading_projects);
        let projects = self.client.list_projects().await;
        self.apply_projects_fetch(projects);
    }

    async fn fetch_skills(&self) {
        let _loading = FlagGuard::raise(&self.loading_skills);
        let skills = self.client.list_skills().await;
        self.apply_skills_fetch(skills);
    }

    fn apply_projects_fetch(&self, result: Result<Vec<Project>, ClientError>) {
        match result {
            Ok(projects) => self.projects.write().replace_all(projects),
            Err(e) => {
                tracing::warn!("Failed to load projects: {}", e);
                self.projects.write().clear();
                self.notify(NotificationKind::Error, "Failed to load projects");
            }
        }
    }

    fn apply_skills_fetch(&self, result: Result<Vec<Skill>, ClientError>) {
        match result {
            Ok(skills) => self.skills.write().replace_all(skills),
            Err(e) => {
                tracing::warn!("Failed to load skills: {}", e);
                self.skills.write().clear();
                self.notify(NotificationKind::Error, "Failed to load skills");
            }
        }
    }

    // ───── Project mutations ────────────────────────────────────────

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        let _guard = self.begin_action()?;

        let created = self.report(self.client.create_project(project).await, "Project created")?;
        self.projects.write().upsert_one(created.clone());
        Ok(created)
    }

    pub async fn update_project(
        &self,
        id: &Uuid,
        changes: &UpdateProjectRequest,
    ) -> Result<Project, ClientError> {
        let _guard = self.begin_action()?;

        let updated = self.report(
            self.client.update_project(&id.to_string(), changes).await,
            "Project updated",
        )?;
        self.projects.write().upsert_one(updated.clone());
        Ok(updated)
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<(), ClientError> {
        let _guard = self.begin_action()?;

        self.report(self.client.delete_project(&id.to_string()).await, "Project deleted")?;
        self.projects.write().remove_one(id);
        Ok(())
    }

    // ───── Skill mutations ──────────────────────────────────────────

    pub async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, ClientError> {
        let _guard = self.begin_action()?;

        let created = self.report(self.client.create_skill(skill).await, "Skill created")?;
        self.sync_skill(created.clone()).await;
        Ok(created)
    }

    pub async fn update_skill(
        &self,
        id: &Uuid,
        changes: &UpdateSkillRequest,
    ) -> Result<Skill, ClientError> {
        let _guard = self.begin_action()?;

        let updated = self.report(
            self.client.update_skill(&id.to_string(), changes).await,
            "Skill updated",
        )?;
        self.sync_skill(updated.clone()).await;
        Ok(updated)
    }

    pub async fn delete_skill(&self, id: &Uuid) -> Result<(), ClientError> {
        let _guard = self.begin_action()?;

        self.report(self.client.delete_skill(&id.to_string()).await, "Skill deleted")?;
        self.skills.write().remove_one(id);
        Ok(())
    }

    async fn sync_skill(&self, skill: Skill) {
        match self.skill_sync {
            SkillSyncMode::PatchLocal => self.skills.write().upsert_one(skill),
            SkillSyncMode::Refetch => self.fetch_skills().await,
        }
    }

    // ───── Busy flag & notifications ────────────────────────────────

    fn begin_action(&self) -> Result<FlagGuard<'_>, ClientError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::ActionInProgress)?;

        Ok(FlagGuard { flag: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn is_loading_projects(&self) -> bool {
        self.loading_projects.load(Ordering::Acquire)
    }

    pub fn is_loading_skills(&self) -> bool {
        self.loading_skills.load(Ordering::Acquire)
    }

    /// True while either collection is being fetched.
    pub fn is_loading(&self) -> bool {
        self.is_loading_projects() || self.is_loading_skills()
    }

    /// Queues the outcome of a mutation.
    fn report<T>(&self, result: Result<T, ClientError>, success: &str) -> Result<T, ClientError> {
        match &result {
            Ok(_) => self.notify(NotificationKind::Success, success),
            Err(e) => {
                tracing::warn!("Action failed: {}", e);
                self.notify(NotificationKind::Error, &e.to_string());
            }
        }
        result
    }

    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications.lock().push_back(Notification {
            kind,
            message: message.to_string(),
        });
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().drain(..).collect()
    }

    // ───── Views ────────────────────────────────────────────────────

    pub fn set_query(&self, query: &str) {
        self.filter.write().query = query.to_string();
    }

    pub fn set_category(&self, category: Option<&str>) {
        self.filter.write().category = category.map(String::from);
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter.read().clone()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().as_slice().to_vec()
    }

    pub fn skills(&self) -> Vec<Skill> {
        self.skills.read().as_slice().to_vec()
    }

    pub fn filtered_projects(&self) -> Vec<Project> {
        let filter = self.filter();
        let projects = self.projects.read();

        filter_projects(projects.as_slice(), &filter.query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn filtered_skills(&self) -> Vec<Skill> {
        let filter = self.filter();
        let skills = self.skills.read();

        filter_skills(skills.as_slice(), &filter.query, filter.category.as_deref())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Categories present in the skills mirror, for filter chips.
    pub fn categories(&self) -> Vec<String> {
        skill_categories(self.skills.read().as_slice())
    }

    pub fn project(&self, id: &Uuid) -> Option<Project> {
        self.projects.read().get(id).cloned()
    }

    pub fn skill(&self, id: &Uuid) -> Option<Skill> {
        self.skills.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_session() -> SyncSession {
        // Port 9 (discard) is never served in tests; only local state is exercised here.
        SyncSession::new(PortfolioClient::new("http://127.0.0.1:9").unwrap())
    }

    #[test]
    fn second_action_is_rejected_while_busy() {
        let session = offline_session();

        let guard = session.begin_action().unwrap();
        assert!(session.is_busy());
        assert!(matches!(session.begin_action(), Err(ClientError::ActionInProgress)));

        drop(guard);
        assert!(!session.is_busy());
        assert!(session.begin_action().is_ok());
    }

    #[test]
    fn loading_flags_are_independent_of_busy() {
        let session = offline_session();
        assert!(!session.is_loading());

        let loading = FlagGuard::raise(&session.loading_skills);
        assert!(session.is_loading());
        assert!(session.is_loading_skills());
        assert!(!session.is_loading_projects());
        assert!(!session.is_busy());

        drop(loading);
        assert!(!session.is_loading());
    }

    #[test]
    fn notifications_drain_in_order() {
        let session = offline_session();
        session.notify(NotificationKind::Success, "first");
        session.notify(NotificationKind::Error, "second");

        let drained = session.take_notifications();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].kind, NotificationKind::Error);
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn view_filter_is_stored() {
        let session = offline_session();
        session.set_query("rust");
        session.set_category(Some("Backend"));

        assert_eq!(
            session.filter(),
            ViewFilter { query: "rust".into(), category: Some("Backend".into()) }
        );

        session.set_category(None);
        assert_eq!(session.filter().category, None);
    }

    #[test]
    fn default_mode_patches_locally() {
        let session = offline_session();
        assert_eq!(session.skill_sync_mode(), SkillSyncMode::PatchLocal);

        let session = session.with_skill_sync(SkillSyncMode::Refetch);
        assert_eq!(session.skill_sync_mode(), SkillSyncMode::Refetch);
    }
}
