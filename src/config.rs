//! Application-level configuration constants.

// UI Behavior
pub const DEBOUNCE_MS: u32 = 300;

// Text
pub const HEADER_TEXT: &str = "Car Tool";
pub const COMPANY_NAME: &str = "A Cool Company, Inc.";
pub const ADD_BUTTON_TEXT: &str = "Add Car";

// Min/Max limits for input fields
pub const MIN_YEAR: u32 = 1886;
pub const MAX_YEAR: u32 = 2100;
pub const MAX_PRICE: u32 = 10_000_000;
pub const MAX_TEXT_LEN: usize = 50;

// Seed data shown on first load
pub const SEED_CSV: &str = include_str!("cars.csv");
