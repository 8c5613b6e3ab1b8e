use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{cors, db, mail, utils};

use db::Storage;
use mail::notifier::Notifier;
use repositories::{contact::ContactRepository, education::EducationRepository};
use use_cases::{contact::ContactHandler, education::EducationHandler};

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub education_handler: AppEducationHandler,
    pub trust_x_forwarded_for: bool,
}

pub type AppContactHandler = ContactHandler<Arc<dyn ContactRepository>, Arc<dyn Notifier>>;
pub type AppEducationHandler = EducationHandler<Arc<dyn EducationRepository>>;

impl AppState {
    pub fn new(config: &settings::AppConfig, storage: &Storage, notifier: Arc<dyn Notifier>) -> Self {
        let contact_handler = ContactHandler::new(storage.contacts.clone(), notifier);
        let education_handler = EducationHandler::new(storage.education.clone());

        AppState {
            contact_handler,
            education_handler,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
