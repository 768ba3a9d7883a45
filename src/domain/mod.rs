pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Cart, Order};
pub use errors::{CheckoutError, CheckoutResult};
pub use value_objects::{is_settled, OrderStatus};
