pub mod association;
pub mod character;
pub mod film;
pub mod starship;
