use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIdentity;
use auth::TokenIssuer;
use auth::TokenTtls;
use certify_service::domain::audit::models::AuthEvent;
use certify_service::domain::audit::models::AuthEventQuery;
use certify_service::domain::audit::ports::AuditLog;
use certify_service::domain::audit::ports::AuditLogError;
use certify_service::domain::auth::errors::AuthError;
use certify_service::domain::auth::models::EmailAddress;
use certify_service::domain::auth::models::InstitutionSummary;
use certify_service::domain::auth::models::User;
use certify_service::domain::auth::models::UserId;
use certify_service::domain::auth::ports::UserRepository;
use certify_service::domain::auth::service::AuthService;
use certify_service::domain::certificate::errors::CertificateError;
use certify_service::domain::certificate::models::CertificateData;
use certify_service::domain::certificate::models::CertificateId;
use certify_service::domain::certificate::ports::BlockchainClient;
use certify_service::domain::certificate::ports::CertificateStore;
use certify_service::domain::certificate::service::CertificateService;
use certify_service::domain::institution::errors::InstitutionError;
use certify_service::domain::institution::models::Institution;
use certify_service::domain::institution::models::InstitutionId;
use certify_service::domain::institution::models::InstitutionPage;
use certify_service::domain::institution::ports::InstitutionRepository;
use certify_service::domain::institution::service::InstitutionService;
use certify_service::inbound::http::router::create_router;
use certify_service::inbound::http::router::AppState;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user store standing in for Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    institutions: Mutex<Vec<Institution>>,
}

impl InMemoryUserRepository {
    pub async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().await.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AuthError::UserNotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn institution_summary(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<InstitutionSummary>, AuthError> {
        Ok(self
            .institutions
            .lock()
            .await
            .iter()
            .find(|i| i.id == *id)
            .map(|i| InstitutionSummary {
                id: i.id,
                slug: i.slug.as_str().to_string(),
                name: i.name.clone(),
            }))
    }
}

/// In-memory append-only audit trail.
#[derive(Default)]
pub struct InMemoryAuditLog {
    events: Mutex<Vec<AuthEvent>>,
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(&self, event: AuthEvent) -> Result<(), AuditLogError> {
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn query(
        &self,
        query: AuthEventQuery,
    ) -> Result<(Vec<AuthEvent>, u64), AuditLogError> {
        let events = self.events.lock().await;
        let mut matching: Vec<AuthEvent> = events
            .iter()
            .filter(|e| query.kind.map_or(true, |k| e.kind == k))
            .filter(|e| query.user_id.map_or(true, |id| e.user_id == Some(id)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let limit = query.limit.max(1) as usize;
        let offset = (query.page.max(1) as usize - 1) * limit;
        let page = matching.into_iter().skip(offset).take(limit).collect();

        Ok((page, total))
    }
}

/// In-memory institution registry.
#[derive(Default)]
pub struct InMemoryInstitutionRepository {
    institutions: Mutex<Vec<Institution>>,
}

#[async_trait]
impl InstitutionRepository for InMemoryInstitutionRepository {
    async fn create(&self, institution: &Institution) -> Result<(), InstitutionError> {
        let mut institutions = self.institutions.lock().await;
        if institutions.iter().any(|i| i.slug == institution.slug) {
            return Err(InstitutionError::DuplicateSlug);
        }
        institutions.push(institution.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<Institution>, InstitutionError> {
        Ok(self
            .institutions
            .lock()
            .await
            .iter()
            .find(|i| i.id == *id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Institution>, InstitutionError> {
        Ok(self
            .institutions
            .lock()
            .await
            .iter()
            .find(|i| i.slug.as_str() == slug)
            .cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<InstitutionPage, InstitutionError> {
        let institutions = self.institutions.lock().await;
        let total = institutions.len() as u64;
        let page = institutions
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(InstitutionPage {
            institutions: page,
            total,
        })
    }

    async fn update(&self, institution: &Institution) -> Result<(), InstitutionError> {
        let mut institutions = self.institutions.lock().await;
        let slot = institutions
            .iter_mut()
            .find(|i| i.id == institution.id)
            .ok_or(InstitutionError::NotFound)?;
        *slot = institution.clone();
        Ok(())
    }

    async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError> {
        let mut institutions = self.institutions.lock().await;
        let before = institutions.len();
        institutions.retain(|i| i.id != *id);
        if institutions.len() == before {
            return Err(InstitutionError::NotFound);
        }
        Ok(())
    }
}

/// In-memory certificate store with a test-only tamper hook.
#[derive(Default)]
pub struct InMemoryCertificateStore {
    entries: Mutex<HashMap<String, (String, CertificateData)>>,
}

impl InMemoryCertificateStore {
    /// Corrupt a stored snapshot without touching its digest.
    pub async fn tamper(&self, id: &str) {
        if let Some((_, data)) = self.entries.lock().await.get_mut(id) {
            data.student_name = format!("{} (altered)", data.student_name);
        }
    }
}

#[async_trait]
impl CertificateStore for InMemoryCertificateStore {
    async fn put(
        &self,
        id: &CertificateId,
        signature: &str,
        data: &CertificateData,
    ) -> Result<(), CertificateError> {
        self.entries
            .lock()
            .await
            .insert(id.as_str().to_string(), (signature.to_string(), data.clone()));
        Ok(())
    }

    async fn get(
        &self,
        id: &CertificateId,
    ) -> Result<Option<(String, CertificateData)>, CertificateError> {
        Ok(self.entries.lock().await.get(id.as_str()).cloned())
    }
}

/// Ledger fake: rejects any subject whose name contains "FAIL".
pub struct ScriptedLedger;

#[async_trait]
impl BlockchainClient for ScriptedLedger {
    async fn issue_certificate(&self, data: &CertificateData) -> Result<String, CertificateError> {
        if data.student_name.contains("FAIL") {
            return Err(CertificateError::Ledger("Transaction rejected".to_string()));
        }
        Ok(format!("test-tx-{}", Uuid::new_v4()))
    }
}

/// Test application with the full router running on a random local port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: Arc<TokenIssuer>,
    pub users: Arc<InMemoryUserRepository>,
    pub certificates: Arc<InMemoryCertificateStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let token_issuer = Arc::new(TokenIssuer::new(TEST_JWT_SECRET, TokenTtls::default()));

        let users = Arc::new(InMemoryUserRepository::default());
        let audit_log = Arc::new(InMemoryAuditLog::default());
        let institutions = Arc::new(InMemoryInstitutionRepository::default());
        let certificates = Arc::new(InMemoryCertificateStore::default());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&audit_log),
            Arc::clone(&token_issuer),
        ));
        let institution_service = Arc::new(InstitutionService::new(Arc::clone(&institutions)));
        let certificate_service = Arc::new(CertificateService::new(
            Arc::clone(&certificates),
            Arc::new(ScriptedLedger),
            "Dada Devs".to_string(),
        ));

        let state = AppState {
            auth_service,
            institution_service,
            certificate_service,
            audit_log,
            token_issuer: Arc::clone(&token_issuer),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer,
            users,
            certificates,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Mint an access token with the admin role, bypassing signup.
    pub fn admin_token(&self) -> String {
        self.token_issuer
            .issue_pair(&TokenIdentity {
                user_id: Uuid::new_v4().to_string(),
                email: "admin@example.com".to_string(),
                role: "ADMIN".to_string(),
                institution_id: None,
            })
            .expect("Failed to issue admin token")
            .access_token
    }

    /// Sign a user up and return (access token, user id).
    pub async fn signup_user(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/auth/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute signup");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse signup body");
        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }
}
