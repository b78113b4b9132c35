// Editor service - Owns editing sessions and talks to the persistence service
use crate::application::dashboard_repository::DashboardRepository;
use crate::application::editor_session::{CanvasLimits, EditorSession, SessionView};
use crate::application::error::EditorError;
use crate::application::template_catalog::TemplateCatalog;
use crate::domain::dashboard::Dashboard;
use crate::domain::widget::WidgetTemplate;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

struct SessionEntry {
    session: EditorSession,
    last_touched: Instant,
}

#[derive(Clone)]
pub struct EditorService {
    repository: Arc<dyn DashboardRepository>,
    catalog: TemplateCatalog,
    limits: CanvasLimits,
    idle_ttl: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl EditorService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        catalog: TemplateCatalog,
        limits: CanvasLimits,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            catalog,
            limits,
            idle_ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn templates(&self) -> &[WidgetTemplate] {
        self.catalog.templates()
    }

    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>, EditorError> {
        self.repository.list().await.map_err(EditorError::Persistence)
    }

    pub async fn get_dashboard(&self, id: i64) -> Result<Dashboard, EditorError> {
        self.repository
            .get(id)
            .await
            .map_err(EditorError::Persistence)?
            .ok_or(EditorError::DashboardNotFound(id))
    }

    /// Begin editing an existing dashboard, or a new one when `dashboard_id`
    /// is `None`.
    pub async fn open_session(&self, dashboard_id: Option<i64>) -> Result<SessionView, EditorError> {
        let dashboard = match dashboard_id {
            Some(id) => Some(self.get_dashboard(id).await?),
            None => None,
        };

        let id = Uuid::new_v4();
        let session = EditorSession::open(id, self.catalog.clone(), self.limits, dashboard.as_ref());
        let view = session.view();
        {
            let mut sessions = self.sessions.lock().await;
            let now = Instant::now();
            evict_idle(&mut sessions, now, self.idle_ttl);
            sessions.insert(
                id,
                SessionEntry {
                    session,
                    last_touched: now,
                },
            );
        }

        tracing::info!(
            session_id = %id,
            dashboard_id = ?dashboard_id,
            widgets = view.widget_count,
            "Editor session opened"
        );
        Ok(view)
    }

    /// Run one state transition against a session and mark it as active.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut EditorSession) -> Result<R, EditorError>,
    ) -> Result<R, EditorError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id).ok_or(EditorError::SessionNotFound(id))?;
        entry.last_touched = Instant::now();
        f(&mut entry.session)
    }

    /// Drop sessions idle for longer than the configured TTL. Returns how
    /// many were evicted.
    pub async fn evict_idle_sessions(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        evict_idle(&mut sessions, Instant::now(), self.idle_ttl)
    }

    /// Sweep idle sessions every `every` until the runtime shuts down.
    pub fn spawn_idle_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                service.evict_idle_sessions().await;
            }
        })
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, EditorError> {
        self.with_session(id, |session| Ok(session.view())).await
    }

    /// Throw the working set away without touching the persistence service.
    pub async fn discard_session(&self, id: Uuid) -> Result<(), EditorError> {
        if self.sessions.lock().await.remove(&id).is_none() {
            return Err(EditorError::SessionNotFound(id));
        }
        tracing::info!(session_id = %id, "Editor session discarded");
        Ok(())
    }

    /// Persist the session's working set. On failure the session is left
    /// as it was so the save can be retried.
    pub async fn save(&self, id: Uuid) -> Result<Dashboard, EditorError> {
        let (dashboard_id, draft) = self
            .with_session(id, |session| Ok((session.dashboard_id(), session.save_request()?)))
            .await?;
        let widget_count = draft.configuration.widget_count();

        let saved = match dashboard_id {
            Some(dashboard_id) => self
                .repository
                .update(dashboard_id, draft)
                .await
                .map_err(EditorError::Persistence)?
                .ok_or(EditorError::DashboardNotFound(dashboard_id))?,
            None => self
                .repository
                .create(draft)
                .await
                .map_err(EditorError::Persistence)?,
        };

        // The session may have been discarded while the save was in flight.
        if let Some(entry) = self.sessions.lock().await.get_mut(&id) {
            entry.session.mark_saved(&saved);
        }

        tracing::info!(
            session_id = %id,
            dashboard_id = saved.id,
            widgets = widget_count,
            "Dashboard saved"
        );
        Ok(saved)
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant, idle_ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|id, entry| {
        let keep = now.duration_since(entry.last_touched) < idle_ttl;
        if !keep {
            tracing::info!(session_id = %id, "Evicting idle editor session");
        }
        keep
    });
    before - sessions.len()
}
