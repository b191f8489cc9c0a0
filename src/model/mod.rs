mod command;
mod entities;
mod error;
mod request;
mod response;

pub use command::*;
pub use entities::*;
pub use error::*;
pub use request::*;
pub use response::*;
