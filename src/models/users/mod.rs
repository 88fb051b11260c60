pub mod entities;

pub use entities::{Affiliation, User, UserRole};
