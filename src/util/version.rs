pub const APP_NAME: &str = "Immo Estimator";
pub const AGENCY: &str = "LA PRIORITE IMMOBILIERE";
pub const AGENCY_EMAIL: &str = "sbelhmira@gmail.com";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_label() -> String {
    format!("v{APP_VERSION}")
}
