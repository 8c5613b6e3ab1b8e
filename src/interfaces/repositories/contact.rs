use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact::{ContactInsert, ContactSubmission},
    errors::AppError,
    repositories::{memory::MemoryRepo, sqlx_repo::SqlxRepo},
};

const CONTACT_COLUMNS: &str =
    "id, name, email, subject, message, created_at, ip_address, user_agent";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Stores a submission; the store assigns the id
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactSubmission, AppError>;

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<ContactSubmission, AppError>;

    /// All submissions, most recent first
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError>;

    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError>;
}

#[async_trait]
impl<T> ContactRepository for Arc<T>
where
    T: ContactRepository + ?Sized,
{
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactSubmission, AppError> {
        (**self).create_contact(contact).await
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<ContactSubmission, AppError> {
        (**self).get_contact_by_id(id).await
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        (**self).list_contacts().await
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_contact(id).await
    }
}

#[async_trait]
impl ContactRepository for SqlxRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactSubmission, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (name, email, subject, message, created_at, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONTACT_COLUMNS}
            "#,
            self.tables.contacts
        );

        let saved = sqlx::query_as::<_, ContactSubmission>(&sql)
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.subject)
            .bind(&contact.message)
            .bind(contact.created_at)
            .bind(&contact.ip_address)
            .bind(&contact.user_agent)
            .fetch_one(&self.pool)
            .await?;

        Ok(saved)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<ContactSubmission, AppError> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM {} WHERE id = $1",
            self.tables.contacts
        );

        sqlx::query_as::<_, ContactSubmission>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM {} ORDER BY created_at DESC",
            self.tables.contacts
        );

        let contacts = sqlx::query_as::<_, ContactSubmission>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.tables.contacts);

        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| {
                if result.rows_affected() == 0 {
                    Err(AppError::NotFound("Contact not found".into()))
                } else {
                    Ok(())
                }
            })?
    }
}

#[async_trait]
impl ContactRepository for MemoryRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactSubmission, AppError> {
        let saved = ContactSubmission {
            id: Uuid::new_v4(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            subject: contact.subject.clone(),
            message: contact.message.clone(),
            created_at: contact.created_at,
            ip_address: contact.ip_address.clone(),
            user_agent: contact.user_agent.clone(),
        };
        self.contacts.insert(saved.id, saved.clone());

        Ok(saved)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<ContactSubmission, AppError> {
        self.contacts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, AppError> {
        let mut contacts: Vec<ContactSubmission> = self
            .contacts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(contacts)
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError> {
        self.contacts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }
}
