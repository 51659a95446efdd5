//! Core wire types for lectern.

pub mod message;
pub mod request;
pub mod response;

pub use message::*;
pub use request::*;
pub use response::*;
