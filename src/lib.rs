mod api;
mod auth;
mod bindings;
mod cart;
mod cart_component;
mod checkout;
mod components;
mod config;
mod enroll_component;
mod enrollment;
mod error;
mod interop;
pub mod logging;
mod models;
mod notice;
mod price;
mod session;
mod snap;

#[cfg(test)]
mod testing;

pub use api::*;
pub use auth::*;
pub use bindings::*;
pub use cart::*;
pub use cart_component::*;
pub use checkout::*;
pub use components::*;
pub use config::*;
pub use enroll_component::*;
pub use enrollment::*;
pub use error::*;
pub use interop::*;
pub use models::*;
pub use notice::*;
pub use price::*;
pub use session::*;
pub use snap::*;
