pub mod csrf;
pub mod health;
pub mod nodes;
