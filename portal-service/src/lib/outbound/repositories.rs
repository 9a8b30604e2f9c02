pub mod page;
pub mod user;

pub use page::PostgresPageRepository;
pub use user::PostgresUserRepository;
