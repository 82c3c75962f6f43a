//! In-memory repositories and a stub payment gateway for HTTP-level tests.
//! The handlers only see the ports, so these doubles exercise the full
//! request path without a live database.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use tokio::sync::Mutex;
use uuid::Uuid;

use veranda_core::database::ports::{
    ComplaintsRepository, ItemsRepository, MediaResourceRepository, NoticesRepository,
    PaymentsRepository, PropertiesRepository,
};
use veranda_core::domain::media::MediaResourceStore;
use veranda_core::gateway::{GatewayOrder, PaymentGateway};
use veranda_core::{CoreError, Result};
use veranda_model::{Complaint, Event, Item, Notice, NoticeFilter, Payment, Property};

use veranda_server::{AppState, Config, create_app};

#[derive(Debug, Default)]
pub struct InMemoryEventsRepository {
    rows: Mutex<Vec<Event>>,
}

#[async_trait]
impl MediaResourceRepository for InMemoryEventsRepository {
    type Resource = Event;

    async fn insert(&self, resource: &Event) -> Result<()> {
        self.rows.lock().await.push(resource.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Event>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Event>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|event| event.id == id).cloned())
    }

    async fn replace(&self, resource: &Event) -> Result<()> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|event| event.id == resource.id) {
            Some(slot) => {
                *slot = resource.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound("Event".to_string())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|event| event.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPropertiesRepository {
    rows: Mutex<Vec<Property>>,
}

#[async_trait]
impl MediaResourceRepository for InMemoryPropertiesRepository {
    type Resource = Property;

    async fn insert(&self, resource: &Property) -> Result<()> {
        self.rows.lock().await.push(resource.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Property>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Property>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|property| property.id == id).cloned())
    }

    async fn replace(&self, resource: &Property) -> Result<()> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|property| property.id == resource.id) {
            Some(slot) => {
                *slot = resource.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound("Property".to_string())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|property| property.id != id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl PropertiesRepository for InMemoryPropertiesRepository {
    async fn fetch_by_mobile(&self, mobile_number: &str) -> Result<Vec<Property>> {
        let mut rows: Vec<Property> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|property| property.mobile_number == mobile_number)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPaymentsRepository {
    rows: Mutex<Vec<Payment>>,
}

#[async_trait]
impl PaymentsRepository for InMemoryPaymentsRepository {
    async fn insert(&self, payment: &Payment) -> Result<()> {
        self.rows.lock().await.push(payment.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Payment>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|payment| payment.id == id).cloned())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|payment| payment.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryComplaintsRepository {
    rows: Mutex<Vec<Complaint>>,
}

#[async_trait]
impl ComplaintsRepository for InMemoryComplaintsRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<()> {
        self.rows.lock().await.push(complaint.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Complaint>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Complaint>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|complaint| complaint.id == id).cloned())
    }

    async fn replace(&self, complaint: &Complaint) -> Result<()> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|row| row.id == complaint.id) {
            Some(slot) => {
                *slot = complaint.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound("Complaint".to_string())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|complaint| complaint.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryNoticesRepository {
    rows: Mutex<Vec<Notice>>,
}

#[async_trait]
impl NoticesRepository for InMemoryNoticesRepository {
    async fn insert(&self, notice: &Notice) -> Result<()> {
        self.rows.lock().await.push(notice.clone());
        Ok(())
    }

    async fn fetch_filtered(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        let mut rows: Vec<Notice> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|notice| filter.matches(notice))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.posted_at.cmp(&a.posted_at))
        });
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Notice>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|notice| notice.id == id).cloned())
    }

    async fn replace(&self, notice: &Notice) -> Result<()> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|row| row.id == notice.id) {
            Some(slot) => {
                *slot = notice.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound("Notice".to_string())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|notice| notice.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryItemsRepository {
    rows: Mutex<Vec<Item>>,
}

#[async_trait]
impl ItemsRepository for InMemoryItemsRepository {
    async fn insert(&self, item: &Item) -> Result<()> {
        self.rows.lock().await.push(item.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Item>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Item>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|item| item.id == id).cloned())
    }

    async fn replace(&self, item: &Item) -> Result<()> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|row| row.id == item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(())
            }
            None => Err(CoreError::NotFound("Item".to_string())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|item| item.id != id);
        Ok(rows.len() < before)
    }
}

/// Gateway double: echoes the requested order back, or fails the way the
/// real adapter does on an upstream rejection.
#[derive(Debug)]
pub struct StubGateway {
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder> {
        if self.fail {
            return Err(CoreError::External(
                "Payment gateway returned 401: authentication failed".to_string(),
            ));
        }
        Ok(GatewayOrder {
            id: "order_test_1".to_string(),
            amount,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
            status: "created".to_string(),
        })
    }
}

pub fn build_state_with_gateway(gateway: Arc<dyn PaymentGateway>) -> AppState {
    let config = Arc::new(Config::default());
    let limits = config.upload_limits();

    let events_repo: Arc<dyn MediaResourceRepository<Resource = Event>> =
        Arc::new(InMemoryEventsRepository::default());
    let properties_repo: Arc<dyn PropertiesRepository> =
        Arc::new(InMemoryPropertiesRepository::default());

    AppState {
        config,
        events: Arc::new(MediaResourceStore::new(events_repo).with_limits(limits)),
        properties: Arc::new(MediaResourceStore::new(properties_repo).with_limits(limits)),
        payments: Arc::new(InMemoryPaymentsRepository::default()),
        complaints: Arc::new(InMemoryComplaintsRepository::default()),
        notices: Arc::new(InMemoryNoticesRepository::default()),
        items: Arc::new(InMemoryItemsRepository::default()),
        gateway,
    }
}

pub fn build_server() -> TestServer {
    build_server_with_gateway(Arc::new(StubGateway { fail: false }))
}

pub fn build_server_with_gateway(gateway: Arc<dyn PaymentGateway>) -> TestServer {
    TestServer::new(create_app(build_state_with_gateway(gateway)))
        .expect("failed to start test server")
}
