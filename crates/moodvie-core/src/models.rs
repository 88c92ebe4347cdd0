mod caller;
mod movie;
mod user;

pub use caller::{ActionLayout, CallerOrigin};
pub use movie::{MovieDetails, StoredMovie};
pub use user::UserContext;
