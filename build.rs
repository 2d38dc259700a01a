use std::env;
use std::fs;
use std::path::Path;

/// Variables que el cliente lee con `option_env!` en tiempo de compilación
const KNOWN_KEYS: &[&str] = &[
    "BASE_URL",
    "GMAPS_API_TOKEN",
    "ENABLE_LOGGING",
    "FETCH_ORDERING",
];

fn main() {
    // Cargar variables de entorno desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                // Ignorar comentarios y líneas vacías
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !KNOWN_KEYS.contains(&key) {
                        println!("cargo:warning=.env: variable desconocida {}, ignorada", key);
                        continue;
                    }

                    // El entorno del proceso tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
