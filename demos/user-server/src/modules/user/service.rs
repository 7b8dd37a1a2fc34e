use super::model::{CreateUserRequest, User, UserNotFound};
use super::repository::UserRepository;
use anyhow::bail;
use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    users_count: AtomicU32,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            repository,
            users_count: AtomicU32::new(0),
        }
    }

    /// A service holding the three sample users
    pub async fn seeded(repository: Arc<dyn UserRepository>) -> anyhow::Result<Self> {
        let service = Self::new(repository);
        for (name, birth_date) in [
            ("Adam", (1990, 1, 15)),
            ("Eve", (1992, 6, 30)),
            ("Jack", (1988, 11, 2)),
        ] {
            let (year, month, day) = birth_date;
            let Some(birth_date) = NaiveDate::from_ymd_opt(year, month, day) else {
                bail!("invalid seed date for {name}");
            };
            service.insert(name.to_string(), birth_date).await?;
        }
        Ok(service)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: u32) -> anyhow::Result<User> {
        let user = self.repository.find_by_id(id).await?.ok_or(UserNotFound(id))?;
        Ok(user)
    }

    pub async fn create(&self, req: CreateUserRequest) -> anyhow::Result<User> {
        let (Some(name), Some(birth_date)) = (req.name, req.birth_date) else {
            bail!("user payload reached the service without validation");
        };
        self.insert(name, birth_date).await
    }

    pub async fn delete(&self, id: u32) -> anyhow::Result<User> {
        let user = self
            .repository
            .delete_by_id(id)
            .await?
            .ok_or(UserNotFound(id))?;
        tracing::info!(id, "Deleted user");
        Ok(user)
    }

    async fn insert(&self, name: String, birth_date: NaiveDate) -> anyhow::Result<User> {
        let user = User {
            id: self.users_count.fetch_add(1, Ordering::SeqCst) + 1,
            name,
            birth_date,
        };
        self.repository.save(&user).await?;
        Ok(user)
    }
}
