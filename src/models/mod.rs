//! Data models for Locallib

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod loan;
pub mod pagination;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetails, AuthorForm};
pub use book::{Book, BookDetails, BookShort};
pub use book_instance::{BookInstance, LoanStatus};
pub use genre::Genre;
pub use language::Language;
pub use pagination::{PageQuery, Pagination};
pub use session::SessionState;
pub use user::{Capability, User, UserClaims};
