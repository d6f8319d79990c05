use crate::{PostgresMarketplace, db_error};
use async_trait::async_trait;
use marketplace_core::repository::{HealthProbe, StoreResult};

#[async_trait]
impl HealthProbe for PostgresMarketplace {
    fn component(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
