use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::education::EducationRecord,
    errors::AppError,
    repositories::{memory::MemoryRepo, sqlx_repo::SqlxRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EducationRepository: Send + Sync {
    /// Every record in store order
    async fn list_education(&self) -> Result<Vec<EducationRecord>, AppError>;
}

#[async_trait]
impl<T> EducationRepository for Arc<T>
where
    T: EducationRepository + ?Sized,
{
    async fn list_education(&self) -> Result<Vec<EducationRecord>, AppError> {
        (**self).list_education().await
    }
}

#[async_trait]
impl EducationRepository for SqlxRepo {
    async fn list_education(&self) -> Result<Vec<EducationRecord>, AppError> {
        let sql = format!(
            "SELECT id, degree, institution, year, description FROM {}",
            self.tables.education
        );

        let records = sqlx::query_as::<_, EducationRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

#[async_trait]
impl EducationRepository for MemoryRepo {
    async fn list_education(&self) -> Result<Vec<EducationRecord>, AppError> {
        Ok(self.education.as_ref().clone())
    }
}
