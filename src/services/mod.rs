pub mod assignments;
pub mod auth;
pub mod chats;
pub mod remarks;
pub mod students;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use chats::ChatService;
pub use remarks::RemarkService;
pub use students::StudentService;
pub use submissions::SubmissionService;
