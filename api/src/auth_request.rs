use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct N8nAuthRequest {
    pub usuario: String,
    pub clave: String,
}
