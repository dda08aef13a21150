//! Input drivers.

pub mod gpio_keys;
