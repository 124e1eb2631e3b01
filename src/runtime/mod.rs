//! Effect execution: the bridge between pure controllers and the world.
//!
//! [`Driver`] executes [`Effect`](crate::app::Effect)s and emits
//! [`AppEvent`]s; an application's event loop drains the channel and routes
//! each event to the controller whose tag it carries.

pub mod driver;
pub mod events;

pub use driver::Driver;
pub use events::AppEvent;
