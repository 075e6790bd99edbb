use serde::{Deserialize, Serialize};

/// Naming of the exported counters: `<namespace>_<subsystem>_<name>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_subsystem")]
    pub subsystem: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            subsystem: default_subsystem(),
        }
    }
}

fn default_namespace() -> String {
    "pdns_protobuf".to_string()
}

fn default_subsystem() -> String {
    "rpz".to_string()
}
