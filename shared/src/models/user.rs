//! User models

use serde::{Deserialize, Serialize};

/// The signed-in farmer, as returned by the farm API's login endpoint.
///
/// The API has used several spellings for the same fields over time, so
/// each field accepts all of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(alias = "IdUsuario", alias = "id_usuario")]
    pub id: i64,
    #[serde(alias = "Nombre", alias = "nombre", default)]
    pub name: String,
    #[serde(alias = "Correo", alias = "correo", default)]
    pub email: String,
    #[serde(alias = "Ubicacion", alias = "ubicacion", default)]
    pub location: Option<String>,
}
