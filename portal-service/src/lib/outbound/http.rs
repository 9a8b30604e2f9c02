pub mod posts;

pub use posts::HttpPostSource;
