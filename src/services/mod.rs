pub mod messages;
pub mod users;

pub use messages::MessageService;
pub use users::UserService;
