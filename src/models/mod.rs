pub mod common;

pub mod affiliations;
pub mod assignments;
pub mod auth;
pub mod chats;
pub mod remarks;
pub mod students;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;
pub use common::AppStartTime;
