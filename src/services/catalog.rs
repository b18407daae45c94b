//! Catalog read views and administrative edits

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDetails},
        book::{display_genre, Book, BookDetails, CreateBook},
        book_instance::{BookInstance, CreateBookInstance, UpdateBookInstance},
        genre::{CreateGenre, Genre},
        language::{CreateLanguage, Language},
        pagination::Pagination,
    },
    repository::{book_instances::BookInstanceStore, Repository},
};

/// Only this many authors are ever listed
pub const AUTHOR_LIST_CAP: i64 = 100;
pub const AUTHORS_PER_PAGE: i64 = 10;

/// Informational string attached to the book and author lists
pub const SOME_DATA: &str = "This is just some data";

/// Page over the first [`AUTHOR_LIST_CAP`] authors, as `(pagination, limit, offset)`
pub fn author_window(page: Option<i64>, total: i64) -> AppResult<(Pagination, i64, i64)> {
    let capped = total.min(AUTHOR_LIST_CAP);
    let pagination = Pagination::new(page, AUTHORS_PER_PAGE, capped)?;
    let offset = pagination.offset();
    let limit = pagination.limit().min(capped - offset).max(0);
    Ok((pagination, limit, offset))
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// List all books, one page at a time
    pub async fn list_books(&self, page: Option<i64>) -> AppResult<(Vec<Book>, Pagination)> {
        let total = self.repository.books.count().await?;
        let pagination = Pagination::new(page, self.config.books_per_page, total)?;
        let books = self
            .repository
            .books
            .list(pagination.limit(), pagination.offset())
            .await?;
        Ok((books, pagination))
    }

    /// Book with author, language, genres and copies
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => Some(self.repository.authors.get_by_id(author_id).await?),
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => Some(self.repository.languages.get_by_id(language_id).await?),
            None => None,
        };
        let genres = self.repository.genres.list_for_book(book.id).await?;
        let instances = self.repository.book_instances.list_for_book(book.id).await?;

        Ok(BookDetails {
            display_genre: display_genre(&genres),
            book,
            author,
            language,
            genres,
            instances,
        })
    }

    /// Author with their books
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(author.id).await?;
        Ok(AuthorDetails { author, books })
    }

    /// List the first authors in name order, ten per page
    pub async fn list_authors(&self, page: Option<i64>) -> AppResult<(Vec<Author>, Pagination)> {
        let total = self.repository.authors.count().await?;
        let (pagination, limit, offset) = author_window(page, total)?;
        let authors = self.repository.authors.list(limit, offset).await?;
        Ok((authors, pagination))
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn create_genre(&self, data: CreateGenre) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.repository.genres.create(&data).await?;
        tracing::info!("Genre created: id={} name={}", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    pub async fn create_language(&self, data: CreateLanguage) -> AppResult<Language> {
        data.validate()?;
        let language = self.repository.languages.create(&data).await?;
        tracing::info!("Language created: id={} name={}", language.id, language.name);
        Ok(language)
    }

    /// Create a book after checking every referenced record exists
    pub async fn create_book(&self, mut data: CreateBook) -> AppResult<Book> {
        data.validate()?;

        if let Some(author_id) = data.author_id {
            if !self.repository.authors.exists(author_id).await? {
                return Err(AppError::Validation(format!("author_id: no author {}", author_id)));
            }
        }
        if let Some(language_id) = data.language_id {
            match self.repository.languages.get_by_id(language_id).await {
                Ok(_) => {}
                Err(AppError::NotFound(_)) => {
                    return Err(AppError::Validation(format!(
                        "language_id: no language {}",
                        language_id
                    )));
                }
                Err(e) => return Err(e),
            }
        }

        data.genre_ids.sort_unstable();
        data.genre_ids.dedup();
        if !data.genre_ids.is_empty() {
            let found = self.repository.genres.count_existing(&data.genre_ids).await?;
            if found != data.genre_ids.len() as i64 {
                return Err(AppError::Validation("genre_ids: unknown genre".to_string()));
            }
        }

        let book = self.repository.books.create(&data).await?;
        tracing::info!("Book created: id={} title={}", book.id, book.title);
        Ok(book)
    }

    /// Add a physical copy to a book
    pub async fn create_instance(&self, book_id: i32, data: CreateBookInstance) -> AppResult<BookInstance> {
        data.validate()?;
        self.repository.books.get_by_id(book_id).await?;
        let instance = self
            .repository
            .book_instances
            .create(book_id, &data.imprint)
            .await?;
        tracing::info!("Book instance created: {}", instance);
        Ok(instance)
    }

    /// Administrative edit of status, borrower and due date
    pub async fn update_instance(&self, id: Uuid, data: UpdateBookInstance) -> AppResult<BookInstance> {
        if let Some(borrower_id) = data.borrower_id {
            if !self.repository.users.exists(borrower_id).await? {
                return Err(AppError::Validation(format!(
                    "borrower_id: no user {}",
                    borrower_id
                )));
            }
        }

        let instance = self.repository.book_instances.update(id, &data).await?;
        tracing::info!(
            "Book instance {} updated: status={} borrower={:?} due_back={:?}",
            id,
            instance.status,
            instance.borrower_id,
            instance.due_back
        );
        Ok(instance)
    }

    /// Instance lookup shared with the admin views
    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_window_caps_at_one_hundred() {
        let (pagination, limit, offset) = author_window(Some(10), 250).unwrap();
        assert_eq!(pagination.num_pages(), 10);
        assert_eq!(limit, 10);
        assert_eq!(offset, 90);
        assert!(author_window(Some(11), 250).is_err());
    }

    #[test]
    fn test_author_window_partial_last_page() {
        let (pagination, limit, offset) = author_window(Some(3), 25).unwrap();
        assert_eq!(pagination.num_pages(), 3);
        assert_eq!(limit, 5);
        assert_eq!(offset, 20);
    }

    #[test]
    fn test_author_window_empty() {
        let (_, limit, offset) = author_window(None, 0).unwrap();
        assert_eq!(limit, 0);
        assert_eq!(offset, 0);
    }
}
