pub const API_BASE: &str = "https://api.openai.com/v1";
pub const COMPLETIONS_ENDPOINT: &str = "/completions";
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const ORGANIZATION_ENV_VAR: &str = "OPENAI_ORG_ID";
