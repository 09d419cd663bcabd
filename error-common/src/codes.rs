// Error codes carried in API error bodies

pub mod validation {
    pub const MALFORMED_BODY: &str = "VALIDATION_1002";
}

pub mod service {
    pub const NETWORK: &str = "SERVICE_5001";
    pub const SERVER: &str = "SERVICE_5002";
    pub const CONFIGURATION: &str = "SERVICE_5003";
    pub const SCHEMA_NOT_LOADED: &str = "SERVICE_5004";
    pub const INTERNAL: &str = "SERVICE_5099";
}
