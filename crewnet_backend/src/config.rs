use std::env;

#[derive(Debug, Clone)]
pub struct CrewnetConfig {
    pub api_port: u16,
}

impl CrewnetConfig {
    pub fn from_env() -> Self {
        let api_port = env::var("CREWNET_API_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);
        Self { api_port }
    }

    pub fn new(api_port: u16) -> Self {
        Self { api_port }
    }
}
