pub mod ports;
pub mod retry;
pub mod services;
