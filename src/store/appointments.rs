use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::store::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts a new record and returns its id.
    async fn create(&self, appointment: NewAppointment) -> Result<Uuid, StoreError>;

    /// All appointments for a patient. Ordering is not guaranteed.
    async fn list_for_patient(&self, patient: Uuid) -> Result<Vec<Appointment>, StoreError>;

    /// Full listing for dashboards.
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError>;
}

/// In-memory appointment store over a concurrent map. A single insert is
/// atomic, which is all the booking workflow needs (each booking creates a
/// new, independent record).
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: DashMap<Uuid, Appointment>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(&self, appointment: NewAppointment) -> Result<Uuid, StoreError> {
        if appointment.patient.is_nil() {
            return Err(StoreError::Validation("missing patient reference".into()));
        }
        if appointment.doctor.is_nil() {
            return Err(StoreError::Validation("missing doctor reference".into()));
        }

        let id = Uuid::new_v4();
        let record = Appointment {
            id,
            patient: appointment.patient,
            doctor: appointment.doctor,
            time: appointment.time,
            reason: appointment.reason,
            status: AppointmentStatus::Pending,
            payment_id: appointment.payment_id,
            payment_status: appointment.payment_status,
            fee_cents: appointment.fee_cents,
            notifications: Vec::new(),
        };
        self.appointments.insert(id, record);
        Ok(id)
    }

    async fn list_for_patient(&self, patient: Uuid) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .filter(|entry| entry.patient == patient)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::PaymentStatus;
    use chrono::{Duration, Utc};

    fn new_appointment(patient: Uuid, doctor: Uuid) -> NewAppointment {
        NewAppointment {
            patient,
            doctor,
            time: Utc::now() + Duration::days(1),
            reason: Some("checkup".to_string()),
            payment_id: Some("pi_test".to_string()),
            payment_status: PaymentStatus::Completed,
            fee_cents: 10000,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_for_patient() {
        let store = InMemoryAppointmentStore::new();
        let patient = Uuid::new_v4();
        let doctor = Uuid::new_v4();

        let id = store.create(new_appointment(patient, doctor)).await.unwrap();

        let listed = store.list_for_patient(patient).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].status, AppointmentStatus::Pending);
        assert_eq!(listed[0].fee_cents, 10000);

        let other = store.list_for_patient(Uuid::new_v4()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_nil_references() {
        let store = InMemoryAppointmentStore::new();

        let err = store
            .create(new_appointment(Uuid::nil(), Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store
            .create(new_appointment(Uuid::new_v4(), Uuid::nil()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_all_spans_patients() {
        let store = InMemoryAppointmentStore::new();
        let doctor = Uuid::new_v4();
        store
            .create(new_appointment(Uuid::new_v4(), doctor))
            .await
            .unwrap();
        store
            .create(new_appointment(Uuid::new_v4(), doctor))
            .await
            .unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }
}
