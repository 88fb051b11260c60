pub mod assignments;

pub mod auth;

pub mod chats;

pub mod remarks;

pub mod students;

pub mod submissions;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use chats::configure_chat_routes;
pub use remarks::configure_remark_routes;
pub use students::configure_student_routes;
pub use submissions::configure_submission_routes;
