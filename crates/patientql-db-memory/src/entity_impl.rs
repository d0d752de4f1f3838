//! Implementation of the EntityStorage trait for InMemoryStorage.

use async_trait::async_trait;
use tracing::trace;

use patientql_storage::{
    EntityStorage, NewPatient, NewPost, Patient, PatientChanges, Post, PostChanges, StorageError,
};

use crate::storage::{InMemoryStorage, sorted_by_id};

fn missing_patient(patient_id: i32) -> StorageError {
    StorageError::foreign_key(format!(
        "posts.patient_id {patient_id} does not reference an existing patient"
    ))
}

#[async_trait]
impl EntityStorage for InMemoryStorage {
    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StorageError> {
        let guard = self.patients.pin();
        Ok(guard.get(&id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(sorted_by_id(&self.patients))
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<i32, StorageError> {
        let _write = self.writes.lock().await;
        let id = self.next_patient_id();
        self.patients.pin().insert(id, Patient::created(id, patient));
        trace!(id, "patient inserted");
        Ok(id)
    }

    async fn update_patient(&self, changes: &PatientChanges) -> Result<u64, StorageError> {
        let _write = self.writes.lock().await;
        let guard = self.patients.pin();
        let Some(current) = guard.get(&changes.id) else {
            return Ok(0);
        };
        let updated = Patient {
            id: current.id,
            name: changes.name.clone(),
            email: changes.email.clone(),
            created_at: current.created_at,
        };
        guard.insert(changes.id, updated);
        Ok(1)
    }

    async fn delete_patient(&self, id: i32) -> Result<u64, StorageError> {
        let _write = self.writes.lock().await;
        if self.has_posts_for(id) {
            return Err(StorageError::foreign_key(format!(
                "patient {id} is still referenced from posts"
            )));
        }
        Ok(u64::from(self.patients.pin().remove(&id).is_some()))
    }

    async fn get_post(&self, id: i32) -> Result<Option<Post>, StorageError> {
        let guard = self.posts.pin();
        Ok(guard.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StorageError> {
        Ok(sorted_by_id(&self.posts))
    }

    async fn create_post(&self, post: &NewPost) -> Result<i32, StorageError> {
        let _write = self.writes.lock().await;
        if !self.patients.pin().contains_key(&post.patient_id) {
            return Err(missing_patient(post.patient_id));
        }
        let id = self.next_post_id();
        self.posts.pin().insert(id, Post::created(id, post));
        trace!(id, patient_id = post.patient_id, "post inserted");
        Ok(id)
    }

    async fn update_post(&self, changes: &PostChanges) -> Result<u64, StorageError> {
        let _write = self.writes.lock().await;
        let guard = self.posts.pin();
        let Some(current) = guard.get(&changes.id) else {
            return Ok(0);
        };
        if !self.patients.pin().contains_key(&changes.patient_id) {
            return Err(missing_patient(changes.patient_id));
        }
        let updated = Post {
            id: current.id,
            title: changes.title.clone(),
            content: changes.content.clone(),
            patient_id: changes.patient_id,
            created_at: current.created_at,
        };
        guard.insert(changes.id, updated);
        Ok(1)
    }

    async fn delete_post(&self, id: i32) -> Result<u64, StorageError> {
        let _write = self.writes.lock().await;
        Ok(u64::from(self.posts.pin().remove(&id).is_some()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
