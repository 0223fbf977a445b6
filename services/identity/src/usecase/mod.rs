pub mod assignment;
pub mod employee;
pub mod resolve;
pub mod role;
pub mod stats;
