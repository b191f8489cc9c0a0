mod controller;
mod gateway;
mod view;

pub use controller::*;
pub use gateway::*;
pub use view::*;
