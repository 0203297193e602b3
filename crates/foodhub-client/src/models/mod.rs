use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Account role as reported by the backend. Unknown roles are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Customer,
    Provider,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Provider => "PROVIDER",
            Role::Admin => "ADMIN",
            Role::Other(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "CUSTOMER" => Role::Customer,
            "PROVIDER" => Role::Provider,
            "ADMIN" => Role::Admin,
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub user: ProviderUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal string; the source of truth for the price.
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category_id: i64,
    pub provider_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Meal {
    /// Parses the decimal price string as a base-10 float.
    pub fn price_value(&self) -> ClientResult<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ClientError::InvalidPrice(self.price.clone()))
    }

    /// Display name of the provider relation, when it was included.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.user.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meal_decodes_camel_case_with_relations() {
        let meal: Meal = serde_json::from_value(json!({
            "id": 1,
            "name": "Margherita",
            "description": "Classic",
            "price": "12.50",
            "imageUrl": "https://img.test/m.png",
            "categoryId": 3,
            "providerId": 9,
            "provider": { "id": 9, "user": { "name": "Luigi's" } },
            "category": { "id": 3, "name": "Pizza" }
        }))
        .unwrap();

        assert_eq!(meal.image_url.as_deref(), Some("https://img.test/m.png"));
        assert_eq!(meal.provider_name(), Some("Luigi's"));
        assert_eq!(meal.category.unwrap().name, "Pizza");
        assert_eq!(meal.price, "12.50");
    }

    #[test]
    fn meal_without_optional_fields() {
        let meal: Meal = serde_json::from_value(json!({
            "id": 2,
            "name": "Soup",
            "price": "4",
            "categoryId": 1,
            "providerId": 1
        }))
        .unwrap();

        assert!(meal.provider.is_none());
        assert!(meal.description.is_empty());
        assert_eq!(meal.price_value().unwrap(), 4.0);
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let mut meal: Meal = serde_json::from_value(json!({
            "id": 2, "name": "Soup", "price": "free", "categoryId": 1, "providerId": 1
        }))
        .unwrap();
        assert!(matches!(meal.price_value(), Err(ClientError::InvalidPrice(_))));

        meal.price = "inf".into();
        assert!(meal.price_value().is_err());
    }

    #[test]
    fn roles_round_trip_including_unknown() {
        let user: User = serde_json::from_value(json!({
            "id": 5, "name": "Ada", "role": "COURIER"
        }))
        .unwrap();
        assert_eq!(user.role, Role::Other("COURIER".into()));
        assert_eq!(serde_json::to_value(&user).unwrap()["role"], "COURIER");

        let admin: Role = serde_json::from_value(json!("ADMIN")).unwrap();
        assert_eq!(admin, Role::Admin);
        assert_eq!(admin.to_string(), "ADMIN");
    }
}
