/**
 * Restaurant Types
 *
 * The restaurant record, its request payload and the validation rules for
 * that payload. Columns are stored under English names; the JSON wire format
 * keeps the Portuguese field names clients already use.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::validation::{Rule, Validator};

/// Restaurant struct representing a row of the `restaurants` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "tipo_cozinha")]
    pub cuisine: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes of a restaurant, used for both create and update
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestaurantInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "tipo_cozinha")]
    pub cuisine: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

impl Restaurant {
    /// Build a fresh record from validated input
    pub fn from_input(input: RestaurantInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            phone: input.phone,
            email: input.email,
            cuisine: input.cuisine,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every attribute with `input` and bump `updated_at`
    pub fn apply(&mut self, input: RestaurantInput) {
        self.name = input.name;
        self.address = input.address;
        self.city = input.city;
        self.postal_code = input.postal_code;
        self.phone = input.phone;
        self.email = input.email;
        self.cuisine = input.cuisine;
        self.description = input.description;
        self.updated_at = Utc::now();
    }
}

/// Rules for a restaurant payload
pub fn restaurant_rules() -> Validator {
    Validator::new()
        .field("nome", [Rule::Required, Rule::String])
        .field("endereco", [Rule::Required, Rule::String])
        .field("cidade", [Rule::Required, Rule::String])
        .field("cep", [Rule::Required, Rule::String])
        .field("telefone", [Rule::Required, Rule::String])
        .field("email", [Rule::Required, Rule::String, Rule::Email])
        .field("tipo_cozinha", [Rule::Required, Rule::String])
        .field("descricao", [Rule::Nullable, Rule::String])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};

    use crate::backend::error::BackendError;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn cantina() -> Map<String, Value> {
        object(json!({
            "nome": " Cantina da Nonna ",
            "endereco": "Rua das Flores, 120",
            "cidade": "Curitiba",
            "cep": "80010-010",
            "telefone": "(41) 3333-4444",
            "email": "contato@cantina.com.br",
            "tipo_cozinha": "Italiana"
        }))
    }

    #[tokio::test]
    async fn test_valid_payload_without_description() {
        let input: RestaurantInput = restaurant_rules().validate_into(&cantina()).await.unwrap();

        assert_eq!(input.name, "Cantina da Nonna");
        assert_eq!(input.cuisine, "Italiana");
        assert_eq!(input.description, None);
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let result = restaurant_rules()
            .validate_into::<RestaurantInput>(&object(json!({ "nome": "Cantina" })))
            .await;

        assert_matches!(result, Err(BackendError::Validation(errors)) => {
            assert_eq!(
                errors.fields().collect::<Vec<_>>(),
                vec!["cep", "cidade", "email", "endereco", "telefone", "tipo_cozinha"]
            );
            assert_eq!(
                errors.messages("tipo_cozinha"),
                Some(&["The tipo cozinha field is required.".to_string()][..])
            );
        });
    }

    #[tokio::test]
    async fn test_bad_email_is_rejected() {
        let mut payload = cantina();
        payload.insert("email".to_string(), json!("contato"));

        let result = restaurant_rules().validate_into::<RestaurantInput>(&payload).await;
        assert_matches!(result, Err(BackendError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.messages("email").is_some());
        });
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let mut restaurant = Restaurant::from_input(RestaurantInput {
            name: "Cantina".to_string(),
            address: "Rua A".to_string(),
            city: "Curitiba".to_string(),
            postal_code: "80010-010".to_string(),
            phone: "4133334444".to_string(),
            email: "c@cantina.com".to_string(),
            cuisine: "Italiana".to_string(),
            description: None,
        });
        restaurant.description = Some("Massas".to_string());

        let json = serde_json::to_value(&restaurant).unwrap();
        assert_eq!(json["nome"], "Cantina");
        assert_eq!(json["endereco"], "Rua A");
        assert_eq!(json["tipo_cozinha"], "Italiana");
        assert_eq!(json["descricao"], "Massas");
        assert!(json.get("name").is_none());
    }
}
