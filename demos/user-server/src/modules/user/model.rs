use chrono::NaiveDate;
use restfault::pipe::builtins::{check_past, check_required};
use restfault::pipe::{BindingResult, Validate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Validate for CreateUserRequest {
    fn object_name() -> String {
        "user".to_string()
    }

    fn validate(&self, result: &mut BindingResult) {
        if let Some(name) = check_required(result, "name", &self.name) {
            if name.chars().count() < 2 {
                result.reject_value("name", name, "Name should have atleast 2 characters");
            }
        }
        if let Some(birth_date) = check_required(result, "birthDate", &self.birth_date) {
            check_past(result, "birthDate", *birth_date);
        }
    }
}

#[derive(Debug, Error)]
#[error("id-{0}")]
pub struct UserNotFound(pub u32);
