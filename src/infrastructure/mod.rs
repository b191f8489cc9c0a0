mod controller_form;
mod gateway_http;
mod gateway_retrier;
mod runner_once;
mod shell_terminal;
mod view_terminal;

pub use controller_form::*;
pub use gateway_http::*;
pub use gateway_retrier::*;
pub use runner_once::*;
pub use shell_terminal::*;
pub use view_terminal::*;
