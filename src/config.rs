/// Default TCP port the server binds when the environment says nothing.
pub const DEFAULT_PORT: u16 = 4488;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
}

impl Config {
    pub fn load() -> Self {
        let port = std::env::var("HEARTH_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}
