pub mod broker_convert;
pub mod extract;
pub mod fubon;
pub mod normalize;
pub mod pages;
pub mod registry;
pub mod yahoo;

pub use fubon::{DateRange, FubonClient};
pub use registry::{BrokerRegistry, CompanyRegistry};
pub use yahoo::YahooClient;
