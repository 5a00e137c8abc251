use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub address: String,
    pub pubsub_name: String,
    pub topic_name: String,
    pub sidecar_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            address: env_or("ADDRESS", ":8080"),
            pubsub_name: env_or("PUBSUB_NAME", "tweeter-pubsub"),
            topic_name: env_or("TOPIC_NAME", "tweets"),
            sidecar_port: env::var("DAPR_HTTP_PORT")
                .ok()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(3500),
        }
    }

    /// Bind address for the listener. A bare `:port` means all interfaces.
    pub fn listen_addr(&self) -> String {
        if self.address.starts_with(':') {
            format!("0.0.0.0{}", self.address)
        } else {
            self.address.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ":8080".to_string(),
            pubsub_name: "tweeter-pubsub".to_string(),
            topic_name: "tweets".to_string(),
            sidecar_port: 3500,
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    match env::var(key) {
        Ok(val) => val.trim().to_string(),
        Err(_) => fallback.to_string(),
    }
}
