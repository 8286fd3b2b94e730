//! Company Model

use serde::{Deserialize, Serialize};

use crate::util::{lenient_i64, lenient_id, lenient_string};

/// Company entity as returned by `/company/getAllCompanies`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    /// Free-form range on the backend ("50-100"), hence a string
    #[serde(default, deserialize_with = "lenient_string")]
    pub no_of_employee: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub no_of_restraunt: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub roleid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updateddate: Option<String>,
}

/// Create company payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub company_code: String,
    pub no_of_employee: String,
    pub no_of_restraunt: String,
    pub address: String,
    pub roleid: String,
}

/// Update company payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
