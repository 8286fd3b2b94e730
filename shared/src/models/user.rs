//! User Model (company employee who orders from canteens)

use serde::{Deserialize, Serialize};

use crate::util::{lenient_f64, lenient_id, lenient_string};

/// Company embedded in a user record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCompany {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
}

/// User entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId", default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phonenumber: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub empid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(rename = "walletBalance", default, deserialize_with = "lenient_f64")]
    pub wallet_balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub companyid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(rename = "Company", default)]
    pub company: Option<UserCompany>,
}

impl User {
    /// `userId` when present, otherwise `id`
    pub fn key(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.id.as_deref())
    }
}

/// Create user payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phonenumber: String,
    pub empid: String,
    pub companyid: String,
    pub address: String,
}

/// Update user profile payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
