/// Clave de localStorage donde vive el bearer token
pub const STORAGE_KEY_TOKEN: &str = "token";

/// Ruta raíz (vista de login)
pub const ROOT_ROUTE: &str = "/";

/// Ruta a la que se navega tras un login correcto
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Endpoint de login del backend
pub const LOGIN_PATH: &str = "/api/v1/login";
