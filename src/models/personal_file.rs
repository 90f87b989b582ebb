use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client record that work orders reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalFile {
    pub id: String,
    pub file_number: String,
    pub client_name: String,
    pub birth_date: Option<NaiveDate>,
    pub disability_group: Option<String>,
    pub disability_category: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPersonalFile {
    #[validate(length(min = 1, message = "Укажите номер личного дела"))]
    pub file_number: String,
    #[validate(length(min = 1, message = "Укажите ФИО клиента"))]
    pub client_name: String,
    pub birth_date: Option<NaiveDate>,
    pub disability_group: Option<String>,
    pub disability_category: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 5, max = 20, message = "Некорректный номер телефона"))]
    pub phone: Option<String>,
}
