use crate::{
    entities::education::EducationListResponse,
    errors::AppError,
    repositories::education::EducationRepository,
};

pub struct EducationHandler<R>
where
    R: EducationRepository,
{
    pub education_repo: R,
}

impl<R> EducationHandler<R>
where
    R: EducationRepository,
{
    pub fn new(education_repo: R) -> Self {
        EducationHandler { education_repo }
    }

    /// Lists every education record; an empty set is reported as not found
    pub async fn list_education(&self) -> Result<EducationListResponse, AppError> {
        let records = self.education_repo.list_education().await?;

        if records.is_empty() {
            return Err(AppError::NotFound("No education records found".to_string()));
        }

        Ok(EducationListResponse {
            success: true,
            data: records,
        })
    }
}
