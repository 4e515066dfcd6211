//! External provider integrations

pub mod openweathermap;
