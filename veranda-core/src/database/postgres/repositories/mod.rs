pub mod complaints;
pub mod events;
pub mod items;
pub mod notices;
pub mod payments;
pub mod properties;

pub use complaints::PostgresComplaintsRepository;
pub use events::PostgresEventsRepository;
pub use items::PostgresItemsRepository;
pub use notices::PostgresNoticesRepository;
pub use payments::PostgresPaymentsRepository;
pub use properties::PostgresPropertiesRepository;
