// Repository trait for the dashboard persistence service
use crate::domain::dashboard::{Dashboard, DashboardDraft};
use async_trait::async_trait;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// List all saved dashboards
    async fn list(&self) -> anyhow::Result<Vec<Dashboard>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Dashboard>>;

    /// Store a new dashboard; the service assigns id and timestamps
    async fn create(&self, draft: DashboardDraft) -> anyhow::Result<Dashboard>;

    /// Replace an existing dashboard. `Ok(None)` when the id is unknown.
    async fn update(&self, id: i64, draft: DashboardDraft) -> anyhow::Result<Option<Dashboard>>;
}
