//! Fixture payloads

use serde_json::{json, Value};

/// A valid restaurant payload
pub fn restaurant_payload(name: &str) -> Value {
    json!({
        "nome": name,
        "endereco": "Rua das Flores, 120",
        "cidade": "Curitiba",
        "cep": "80010-010",
        "telefone": "(41) 3333-4444",
        "email": "contato@example.com.br",
        "tipo_cozinha": "Italiana",
        "descricao": "Massas artesanais"
    })
}
