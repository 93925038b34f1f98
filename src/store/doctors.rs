use crate::models::doctor::Doctor;
use crate::store::StoreError;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<Doctor>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;

    /// Registers a doctor account. The clinic runs with a single doctor, so
    /// registration fails once one exists.
    async fn register(&self, name: String, email: String) -> Result<Doctor, StoreError>;
}

#[derive(Default)]
pub struct InMemoryDoctorDirectory {
    doctors: RwLock<Vec<Doctor>>,
}

impl InMemoryDoctorDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn list(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.doctors.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(self
            .doctors
            .read()
            .await
            .iter()
            .find(|doctor| doctor.id == id)
            .cloned())
    }

    async fn register(&self, name: String, email: String) -> Result<Doctor, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation("doctor name is required".into()));
        }
        if email.trim().is_empty() {
            return Err(StoreError::Validation("doctor email is required".into()));
        }

        let mut doctors = self.doctors.write().await;
        if !doctors.is_empty() {
            return Err(StoreError::DoctorExists);
        }

        let doctor = Doctor {
            id: Uuid::new_v4(),
            name,
            email,
        };
        doctors.push(doctor.clone());
        Ok(doctor)
    }
}
