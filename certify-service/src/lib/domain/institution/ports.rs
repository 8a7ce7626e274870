use async_trait::async_trait;

use super::errors::InstitutionError;
use super::models::CreateInstitutionCommand;
use super::models::Institution;
use super::models::InstitutionId;
use super::models::InstitutionPage;
use super::models::UpdateInstitutionCommand;

/// Institution use cases exposed to inbound adapters.
#[async_trait]
pub trait InstitutionServicePort: Send + Sync + 'static {
    async fn create(&self, cmd: CreateInstitutionCommand) -> Result<Institution, InstitutionError>;

    async fn get(&self, id: &InstitutionId) -> Result<Institution, InstitutionError>;

    async fn list(&self, page: u64, limit: u64) -> Result<InstitutionPage, InstitutionError>;

    async fn update(
        &self,
        id: &InstitutionId,
        cmd: UpdateInstitutionCommand,
    ) -> Result<Institution, InstitutionError>;

    async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError>;
}

/// Persistence port for institution records.
#[async_trait]
pub trait InstitutionRepository: Send + Sync + 'static {
    /// Insert a new institution.
    ///
    /// # Errors
    /// * `DuplicateSlug` - Another institution already owns the slug
    async fn create(&self, institution: &Institution) -> Result<(), InstitutionError>;

    async fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<Institution>, InstitutionError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Institution>, InstitutionError>;

    async fn list(&self, offset: u64, limit: u64) -> Result<InstitutionPage, InstitutionError>;

    async fn update(&self, institution: &Institution) -> Result<(), InstitutionError>;

    async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError>;
}
