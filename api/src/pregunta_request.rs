use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PreguntaRequest {
    pub usuario: String,
    pub clave: String,
    pub pregunta: String,
}
