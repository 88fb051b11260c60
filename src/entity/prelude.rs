pub use super::assignments::Entity as Assignments;
pub use super::chat_groups::Entity as ChatGroups;
pub use super::chat_messages::Entity as ChatMessages;
pub use super::classes::Entity as Classes;
pub use super::colleges::Entity as Colleges;
pub use super::courses::Entity as Courses;
pub use super::faculties::Entity as Faculties;
pub use super::remarks::Entity as Remarks;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
