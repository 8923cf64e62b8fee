pub mod character;
pub mod film;
pub mod populate;
pub mod starship;
