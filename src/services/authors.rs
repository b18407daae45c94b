//! Author lifecycle service

use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorForm, AuthorFormInitial},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Initial values of the creation form
    pub fn create_form(&self) -> AuthorFormInitial {
        AuthorFormInitial::default()
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Author> {
        form.validate()?;
        let author = self.repository.authors.create(&form).await?;
        tracing::info!("Author created: id={} ({})", author.id, author);
        Ok(author)
    }

    pub async fn update(&self, id: i32, form: AuthorForm) -> AppResult<Author> {
        form.validate()?;
        let author = self.repository.authors.update(id, &form).await?;
        tracing::info!("Author updated: id={} ({})", author.id, author);
        Ok(author)
    }

    /// Delete an author; their books remain with no author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Author deleted: id={}", id);
        Ok(())
    }
}
