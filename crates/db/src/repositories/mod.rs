//! Repository layer: one zero-sized struct per table group, each exposing
//! associated async functions that take a pool or an open transaction.

pub mod association_repo;
pub mod character_repo;
pub mod film_repo;
pub mod starship_repo;

pub use association_repo::AssociationRepo;
pub use character_repo::CharacterRepo;
pub use film_repo::FilmRepo;
pub use starship_repo::StarshipRepo;

/// Prefix every column in a comma-separated list with a table alias.
pub(crate) fn qualify(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
