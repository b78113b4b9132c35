// In-memory dashboard persistence service
use crate::application::dashboard_repository::DashboardRepository;
use crate::domain::dashboard::{Dashboard, DashboardDraft};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    dashboards: BTreeMap<i64, Dashboard>,
}

/// Dashboards kept for the lifetime of the process, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryDashboardRepository {
    inner: RwLock<Inner>,
}

impl InMemoryDashboardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardRepository {
    async fn list(&self) -> Result<Vec<Dashboard>> {
        Ok(self.inner.read().await.dashboards.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Dashboard>> {
        Ok(self.inner.read().await.dashboards.get(&id).cloned())
    }

    async fn create(&self, draft: DashboardDraft) -> Result<Dashboard> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let dashboard = Dashboard::new(inner.next_id, draft, Utc::now());
        inner.dashboards.insert(dashboard.id, dashboard.clone());
        Ok(dashboard)
    }

    async fn update(&self, id: i64, draft: DashboardDraft) -> Result<Option<Dashboard>> {
        let mut inner = self.inner.write().await;
        Ok(inner.dashboards.get_mut(&id).map(|dashboard| {
            dashboard.apply(draft, Utc::now());
            dashboard.clone()
        }))
    }
}
