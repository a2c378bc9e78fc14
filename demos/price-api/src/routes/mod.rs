pub mod debug;
pub mod price;
pub mod profit;
