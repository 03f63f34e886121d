//! Domain types shared by the Petal mini-apps.

pub mod category;
pub mod employee;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod telegram;

pub use category::Category;
pub use employee::{EmployeeIdentity, EmployeeRole};
pub use id::{OrderId, ProductId, TelegramUserId};
pub use order::{ContactInfo, Order, OrderLine, OrderStatus, StatusChange};
pub use price::Price;
pub use product::Product;
pub use telegram::TelegramUser;
