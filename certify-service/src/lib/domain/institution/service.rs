use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::InstitutionError;
use super::models::CreateInstitutionCommand;
use super::models::Institution;
use super::models::InstitutionId;
use super::models::InstitutionPage;
use super::models::InstitutionStatus;
use super::models::UpdateInstitutionCommand;
use super::ports::InstitutionRepository;
use super::ports::InstitutionServicePort;

/// Institution registry use cases.
pub struct InstitutionService<IR: InstitutionRepository> {
    repository: Arc<IR>,
}

impl<IR: InstitutionRepository> InstitutionService<IR> {
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR: InstitutionRepository> InstitutionServicePort for InstitutionService<IR> {
    async fn create(&self, cmd: CreateInstitutionCommand) -> Result<Institution, InstitutionError> {
        if cmd.name.trim().is_empty() {
            return Err(InstitutionError::Validation(
                "Institution name must not be blank".to_string(),
            ));
        }
        if self
            .repository
            .find_by_slug(cmd.slug.as_str())
            .await?
            .is_some()
        {
            return Err(InstitutionError::DuplicateSlug);
        }

        let now = Utc::now();
        let institution = Institution {
            id: InstitutionId::new(),
            slug: cmd.slug,
            name: cmd.name,
            registration_number: cmd.registration_number,
            contact_email: cmd.contact_email,
            website: cmd.website,
            city: cmd.city,
            country: cmd.country,
            status: InstitutionStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.repository.create(&institution).await?;

        tracing::info!(institution_id = %institution.id, slug = %institution.slug, "institution created");

        Ok(institution)
    }

    async fn get(&self, id: &InstitutionId) -> Result<Institution, InstitutionError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(InstitutionError::NotFound)
    }

    async fn list(&self, page: u64, limit: u64) -> Result<InstitutionPage, InstitutionError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;
        self.repository.list(offset, limit).await
    }

    async fn update(
        &self,
        id: &InstitutionId,
        cmd: UpdateInstitutionCommand,
    ) -> Result<Institution, InstitutionError> {
        let mut institution = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(InstitutionError::NotFound)?;

        if let Some(slug) = cmd.slug {
            if slug != institution.slug {
                if self.repository.find_by_slug(slug.as_str()).await?.is_some() {
                    return Err(InstitutionError::DuplicateSlug);
                }
                institution.slug = slug;
            }
        }
        if let Some(name) = cmd.name {
            if name.trim().is_empty() {
                return Err(InstitutionError::Validation(
                    "Institution name must not be blank".to_string(),
                ));
            }
            institution.name = name;
        }
        if let Some(registration_number) = cmd.registration_number {
            institution.registration_number = Some(registration_number);
        }
        if let Some(contact_email) = cmd.contact_email {
            institution.contact_email = Some(contact_email);
        }
        if let Some(website) = cmd.website {
            institution.website = Some(website);
        }
        if let Some(city) = cmd.city {
            institution.city = Some(city);
        }
        if let Some(country) = cmd.country {
            institution.country = Some(country);
        }
        if let Some(status) = cmd.status {
            institution.status = status;
        }
        institution.updated_at = Utc::now();

        self.repository.update(&institution).await?;

        Ok(institution)
    }

    async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(InstitutionError::NotFound)?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::super::models::Slug;
    use super::*;

    mock! {
        pub TestInstitutionRepository {}

        #[async_trait]
        impl InstitutionRepository for TestInstitutionRepository {
            async fn create(&self, institution: &Institution) -> Result<(), InstitutionError>;
            async fn find_by_id(
                &self,
                id: &InstitutionId,
            ) -> Result<Option<Institution>, InstitutionError>;
            async fn find_by_slug(
                &self,
                slug: &str,
            ) -> Result<Option<Institution>, InstitutionError>;
            async fn list(
                &self,
                offset: u64,
                limit: u64,
            ) -> Result<InstitutionPage, InstitutionError>;
            async fn update(&self, institution: &Institution) -> Result<(), InstitutionError>;
            async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError>;
        }
    }

    fn create_command(slug: &str, name: &str) -> CreateInstitutionCommand {
        CreateInstitutionCommand {
            slug: Slug::new(slug.to_string()).unwrap(),
            name: name.to_string(),
            registration_number: None,
            contact_email: None,
            website: None,
            city: None,
            country: None,
        }
    }

    fn sample_institution() -> Institution {
        let now = Utc::now();
        Institution {
            id: InstitutionId::new(),
            slug: Slug::new("dada-devs".to_string()).unwrap(),
            name: "Dada Devs".to_string(),
            registration_number: None,
            contact_email: None,
            website: None,
            city: None,
            country: None,
            status: InstitutionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_slug()
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|_| Ok(()));

        let service = InstitutionService::new(Arc::new(repository));
        let institution = service
            .create(create_command("dada-devs", "Dada Devs"))
            .await
            .unwrap();

        assert_eq!(institution.status, InstitutionStatus::Pending);
        assert_eq!(institution.slug.as_str(), "dada-devs");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_slug()
            .returning(|_| Ok(Some(sample_institution())));
        repository.expect_create().never();

        let service = InstitutionService::new(Arc::new(repository));
        let result = service.create(create_command("dada-devs", "Dada Devs")).await;

        assert!(matches!(result, Err(InstitutionError::DuplicateSlug)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mut repository = MockTestInstitutionRepository::new();
        repository.expect_create().never();

        let service = InstitutionService::new(Arc::new(repository));
        let result = service.create(create_command("dada-devs", "   ")).await;

        assert!(matches!(result, Err(InstitutionError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let service = InstitutionService::new(Arc::new(repository));
        let result = service.get(&InstitutionId::new()).await;

        assert!(matches!(result, Err(InstitutionError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_changes_status_and_bumps_timestamp() {
        let existing = sample_institution();
        let created_at = existing.created_at;
        let id = existing.id;

        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .returning(|_| Ok(()));

        let service = InstitutionService::new(Arc::new(repository));
        let updated = service
            .update(
                &id,
                UpdateInstitutionCommand {
                    status: Some(InstitutionStatus::Verified),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, InstitutionStatus::Verified);
        assert!(updated.updated_at > created_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_slug_is_rejected() {
        let existing = sample_institution();
        let id = existing.id;

        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_find_by_slug()
            .returning(|_| Ok(Some(sample_institution())));
        repository.expect_update().never();

        let service = InstitutionService::new(Arc::new(repository));
        let result = service
            .update(
                &id,
                UpdateInstitutionCommand {
                    slug: Some(Slug::new("other-slug".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(InstitutionError::DuplicateSlug)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repository = MockTestInstitutionRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(None));
        repository.expect_delete().never();

        let service = InstitutionService::new(Arc::new(repository));
        let result = service.delete(&InstitutionId::new()).await;

        assert!(matches!(result, Err(InstitutionError::NotFound)));
    }
}
