use crate::{
    entities::contact::{
        ContactCreatedResponse, ContactDeletedResponse, ContactForm, ContactListResponse,
        ContactResponse, ContactSubmission, ContactSummary, NewContact, RequestProvenance,
    },
    errors::{AppError, MailError},
    mail::notifier::Notifier,
    repositories::contact::ContactRepository,
    utils::valid_uuid::valid_uuid,
};
use validator::Validate;

const CONTACT_NOT_FOUND: &str = "Contact not found";

/// What happened to the operator alert for a saved submission.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    Sent,
    Skipped,
    Failed(String),
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent)
    }
}

pub struct ContactHandler<R, N>
where
    R: ContactRepository,
    N: Notifier,
{
    pub contact_repo: R,
    pub notifier: N,
}

impl<R, N> ContactHandler<R, N>
where
    R: ContactRepository,
    N: Notifier,
{
    pub fn new(contact_repo: R, notifier: N) -> Self {
        ContactHandler { contact_repo, notifier }
    }

    /// Validates and stores a submission, then alerts the operator.
    /// The alert outcome is reported but never fails the submission.
    pub async fn submit_contact(
        &self,
        form: ContactForm,
        provenance: RequestProvenance,
    ) -> Result<ContactCreatedResponse, AppError> {
        let new_contact = NewContact::from(form);
        new_contact.validate()?;

        let insert = new_contact.prepare_for_insert(provenance);
        let saved = self.contact_repo.create_contact(&insert).await?;
        tracing::info!(contact_id = %saved.id, "Contact submission saved");

        let outcome = self.notify_operator(&saved).await;
        match &outcome {
            NotificationOutcome::Sent => {
                tracing::info!(contact_id = %saved.id, "Operator notified");
            }
            NotificationOutcome::Skipped => {
                tracing::debug!(contact_id = %saved.id, "No mail relay; operator notification skipped");
            }
            NotificationOutcome::Failed(reason) => {
                tracing::warn!(contact_id = %saved.id, reason = %reason, "Operator notification failed");
            }
        }

        Ok(ContactCreatedResponse {
            success: true,
            message: "Message sent successfully!".to_string(),
            data: ContactSummary::from(&saved),
            email_sent: outcome.is_sent(),
        })
    }

    async fn notify_operator(&self, saved: &ContactSubmission) -> NotificationOutcome {
        match self.notifier.notify_new_contact(saved).await {
            Ok(()) => NotificationOutcome::Sent,
            Err(MailError::NotConfigured) => NotificationOutcome::Skipped,
            Err(e) => NotificationOutcome::Failed(e.to_string()),
        }
    }

    pub async fn list_contacts(&self) -> Result<ContactListResponse, AppError> {
        let contacts = self.contact_repo.list_contacts().await?;

        Ok(ContactListResponse {
            success: true,
            count: contacts.len(),
            data: contacts,
        })
    }

    pub async fn get_contact_by_id(&self, id: &str) -> Result<ContactResponse, AppError> {
        let valid_id = valid_uuid(id, CONTACT_NOT_FOUND)?;

        let contact = self.contact_repo.get_contact_by_id(&valid_id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(CONTACT_NOT_FOUND.to_string()),
                _ => e,
            })?;

        Ok(ContactResponse {
            success: true,
            data: contact,
        })
    }

    pub async fn delete_contact(&self, id: &str) -> Result<ContactDeletedResponse, AppError> {
        let valid_id = valid_uuid(id, CONTACT_NOT_FOUND)?;

        self.contact_repo.delete_contact(&valid_id).await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(CONTACT_NOT_FOUND.to_string()),
                _ => e,
            })?;
        tracing::info!(contact_id = %valid_id, "Contact deleted");

        Ok(ContactDeletedResponse {
            success: true,
            message: "Contact deleted successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::contact::ContactInsert,
        errors::{INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE},
        mail::notifier::MockNotifier,
        repositories::contact::MockContactRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }

    fn saved_from(insert: &ContactInsert) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::new_v4(),
            name: insert.name.clone(),
            email: insert.email.clone(),
            subject: insert.subject.clone(),
            message: insert.message.clone(),
            created_at: insert.created_at,
            ip_address: insert.ip_address.clone(),
            user_agent: insert.user_agent.clone(),
        }
    }

    fn storing_repo() -> MockContactRepository {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact()
            .times(1)
            .returning(|insert| Ok(saved_from(insert)));
        repo
    }

    #[tokio::test]
    async fn stores_normalized_email_and_reports_sent_notification() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact()
            .times(1)
            .returning(|_| Ok(()));

        let handler = ContactHandler::new(storing_repo(), notifier);
        let response = handler
            .submit_contact(form("A", "A@X.com ", "hi", "hello"), RequestProvenance::default())
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.data.email, "a@x.com");
        assert!(response.email_sent);
    }

    #[tokio::test]
    async fn empty_field_is_rejected_without_a_write() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact().never();

        let handler = ContactHandler::new(repo, notifier);
        let result = handler
            .submit_contact(form("", "a@x.com", "s", "m"), RequestProvenance::default())
            .await;

        match result {
            Err(AppError::ValidationError { message, .. }) => assert_eq!(message, MISSING_FIELDS_MESSAGE),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_without_a_write() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact().never();

        let handler = ContactHandler::new(repo, MockNotifier::new());
        let result = handler
            .submit_contact(form("A", "a@x", "s", "m"), RequestProvenance::default())
            .await;

        match result {
            Err(AppError::ValidationError { message, .. }) => assert_eq!(message, INVALID_EMAIL_MESSAGE),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_notification_keeps_the_submission() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact()
            .times(1)
            .returning(|_| Err(MailError::Rejected(503)));

        let handler = ContactHandler::new(storing_repo(), notifier);
        let response = handler
            .submit_contact(form("A", "a@x.com", "s", "m"), RequestProvenance::default())
            .await
            .unwrap();

        assert!(response.success);
        assert!(!response.email_sent);
    }

    #[tokio::test]
    async fn unconfigured_relay_is_skipped() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact()
            .returning(|_| Err(MailError::NotConfigured));

        let handler = ContactHandler::new(MockContactRepository::new(), notifier);
        let contact = saved_from(&NewContact::from(form("A", "a@x.com", "s", "m"))
            .prepare_for_insert(RequestProvenance::default()));

        assert_eq!(handler.notify_operator(&contact).await, NotificationOutcome::Skipped);
    }

    #[tokio::test]
    async fn failed_relay_outcome_carries_the_reason() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact()
            .returning(|_| Err(MailError::Rejected(503)));

        let handler = ContactHandler::new(MockContactRepository::new(), notifier);
        let contact = saved_from(&NewContact::from(form("A", "a@x.com", "s", "m"))
            .prepare_for_insert(RequestProvenance::default()));

        match handler.notify_operator(&contact).await {
            NotificationOutcome::Failed(reason) => assert!(reason.contains("503"), "reason: {reason}"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn storage_failure_is_a_dependency_error() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact()
            .returning(|_| Err(AppError::DependencyError("Database error: pool timed out".into())));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_new_contact().never();

        let handler = ContactHandler::new(repo, notifier);
        let result = handler
            .submit_contact(form("A", "a@x.com", "s", "m"), RequestProvenance::default())
            .await;

        assert!(matches!(result, Err(AppError::DependencyError(_))));
    }

    #[tokio::test]
    async fn malformed_id_is_not_found_without_a_lookup() {
        let mut repo = MockContactRepository::new();
        repo.expect_get_contact_by_id().never();
        repo.expect_delete_contact().never();

        let handler = ContactHandler::new(repo, MockNotifier::new());

        assert!(matches!(handler.get_contact_by_id("42").await, Err(AppError::NotFound(_))));
        assert!(matches!(handler.delete_contact("42").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_an_absent_contact_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_delete_contact()
            .with(eq(id))
            .times(1)
            .returning(|_| Err(AppError::NotFound("Record not found".into())));

        let handler = ContactHandler::new(repo, MockNotifier::new());
        let result = handler.delete_contact(&id.to_string()).await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, CONTACT_NOT_FOUND),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_reports_count() {
        let mut repo = MockContactRepository::new();
        repo.expect_list_contacts().returning(|| {
            let insert = NewContact::from(form("A", "a@x.com", "s", "m"))
                .prepare_for_insert(RequestProvenance::default());
            Ok(vec![saved_from(&insert), saved_from(&insert)])
        });

        let handler = ContactHandler::new(repo, MockNotifier::new());
        let response = handler.list_contacts().await.unwrap();

        assert_eq!(response.count, 2);
        assert!(response.data.iter().all(|c| c.created_at <= Utc::now()));
    }
}
