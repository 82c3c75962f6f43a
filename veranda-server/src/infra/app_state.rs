use std::{fmt, sync::Arc};

use veranda_core::database::ports::{
    ComplaintsRepository, ItemsRepository, MediaResourceRepository, NoticesRepository,
    PaymentsRepository, PropertiesRepository,
};
use veranda_core::domain::media::MediaResourceStore;
use veranda_core::gateway::PaymentGateway;
use veranda_model::Event;

use crate::infra::config::Config;

/// Media store over any events repository implementation.
pub type EventsStore = MediaResourceStore<dyn MediaResourceRepository<Resource = Event>>;
/// Media store over any properties repository implementation.
pub type PropertiesStore = MediaResourceStore<dyn PropertiesRepository>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub events: Arc<EventsStore>,
    pub properties: Arc<PropertiesStore>,
    pub payments: Arc<dyn PaymentsRepository>,
    pub complaints: Arc<dyn ComplaintsRepository>,
    pub notices: Arc<dyn NoticesRepository>,
    pub items: Arc<dyn ItemsRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
