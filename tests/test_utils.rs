#![allow(dead_code)]

use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contact_backend::{
    entities::{
        contact::{ContactInsert, ContactSubmission},
        education::EducationRecord,
    },
    errors::{AppError, MailError},
    mail::notifier::Notifier,
    repositories::{
        contact::ContactRepository, education::EducationRepository, memory::MemoryRepo,
    },
    routes::configure_routes,
    use_cases::{contact::ContactHandler, education::EducationHandler},
    AppState,
};
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub store: MemoryRepo,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MemoryRepo::new(), RecordingNotifier::default()).await
    }

    pub async fn spawn_with(store: MemoryRepo, notifier: RecordingNotifier) -> Self {
        let notifier = Arc::new(notifier);
        let repo = Arc::new(store.clone());

        let contacts: Arc<dyn ContactRepository> = repo.clone();
        let education: Arc<dyn EducationRepository> = repo;
        let alerts: Arc<dyn Notifier> = notifier.clone();

        let address = serve(AppState {
            contact_handler: ContactHandler::new(contacts, alerts),
            education_handler: EducationHandler::new(education),
            trust_x_forwarded_for: false,
        })
        .await;

        Self {
            address,
            client: Client::new(),
            store,
            notifier,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/contact"))
            .header(reqwest::header::USER_AGENT, "contact-tests/1.0")
            .json(body)
            .send()
            .await
            .expect("Failed to submit contact form")
    }

    /// Posts a url-encoded body, the way a plain HTML form does.
    pub async fn submit_form(&self, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/contact"))
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to submit url-encoded form")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request")
    }

    /// Writes straight to the store with a chosen timestamp.
    pub async fn insert_contact(&self, name: &str, created_at: DateTime<Utc>) -> ContactSubmission {
        self.store
            .create_contact(&ContactInsert {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                subject: "Hello".to_string(),
                message: "Seeded message".to_string(),
                created_at,
                ip_address: None,
                user_agent: None,
            })
            .await
            .expect("Failed to seed contact")
    }
}

/// Runs the routes on an ephemeral port and waits until the server answers.
pub async fn serve(state: AppState) -> String {
    let state = web::Data::new(state);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .configure(configure_routes)
    })
    .listen(listener)
    .expect("Failed to bind server")
    .workers(1)
    .disable_signals()
    .run();

    tokio::spawn(server);

    let client = Client::new();
    while client.get(format!("{}/api/health", address)).send().await.is_err() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    address
}

pub fn valid_submission() -> Value {
    serde_json::json!({
        "name": "Ada Lovelace",
        "email": "Ada@Example.com ",
        "subject": "Hello there",
        "message": "I enjoyed your portfolio."
    })
}

pub fn education_record(degree: &str) -> EducationRecord {
    EducationRecord {
        id: Uuid::new_v4(),
        degree: degree.to_string(),
        institution: "University of Nigeria".to_string(),
        year: Some("2019".to_string()),
        description: None,
    }
}

/// Notifier double that records what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<ContactSubmission>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        RecordingNotifier {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_new_contact(&self, contact: &ContactSubmission) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Rejected(502));
        }
        self.sent.lock().unwrap().push(contact.clone());
        Ok(())
    }
}

/// Store whose every call fails, standing in for an unreachable database.
pub struct UnavailableStore;

fn unavailable() -> AppError {
    AppError::DependencyError("Database error: connection refused (10.1.2.3:5432)".into())
}

#[async_trait]
impl ContactRepository for UnavailableStore {
    async fn create_contact(&self, _contact: &ContactInsert) -> Result<ContactSubmission, AppError> {
        Err(unavailable())
    }

    async fn get_contact_by_id(&self, _id: &Uuid) -> Result<ContactSubmission, AppError> {
        Err(unavailable())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        Err(unavailable())
    }

    async fn delete_contact(&self, _id: &Uuid) -> Result<(), AppError> {
        Err(unavailable())
    }
}

#[async_trait]
impl EducationRepository for UnavailableStore {
    async fn list_education(&self) -> Result<Vec<EducationRecord>, AppError> {
        Err(unavailable())
    }
}
