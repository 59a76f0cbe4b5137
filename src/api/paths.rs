//! All Paths are recorded here for use throughout this codebase
pub mod base {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const ABOUT: &str = "/about";
}

pub mod plugin {
    pub const VALIDATE_CREDENTIALS: &str = "/credentials/validate";
    pub const INVOKE_TOOL: &str = "/tools/elasticsearch_rest/invoke";
}
