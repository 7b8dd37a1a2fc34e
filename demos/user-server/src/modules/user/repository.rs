use super::model::User;
use crate::infrastructure::database::Database;
use restfault::async_trait;

const TABLE: &str = "users";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: u32) -> anyhow::Result<Option<User>>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    async fn delete_by_id(&self, id: u32) -> anyhow::Result<Option<User>>;
}

pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepositoryImpl {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: u32) -> anyhow::Result<Option<User>> {
        match self.db.get(TABLE, id)? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        let data = serde_json::to_string(user)?;
        self.db.insert(TABLE, user.id, data)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let mut users = Vec::new();
        for data in self.db.scan(TABLE)? {
            users.push(serde_json::from_str(&data)?);
        }
        Ok(users)
    }

    async fn delete_by_id(&self, id: u32) -> anyhow::Result<Option<User>> {
        match self.db.remove(TABLE, id)? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }
}
