//! Repository ports (interfaces) grouped by resource.
//!
//! Domain services and handlers depend on these traits only; the Postgres
//! implementations live under [`crate::database::postgres`].

pub mod complaints;
pub mod items;
pub mod media;
pub mod notices;
pub mod payments;

pub use complaints::ComplaintsRepository;
pub use items::ItemsRepository;
pub use media::{MediaResourceRepository, PropertiesRepository};
pub use notices::NoticesRepository;
pub use payments::PaymentsRepository;
