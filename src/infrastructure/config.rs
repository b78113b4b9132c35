use crate::application::editor_session::CanvasLimits;
use crate::domain::widget::WidgetTemplate;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub canvas: CanvasLimits,
    #[serde(default)]
    pub sessions: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_templates_path")]
    pub templates_path: String,
}

fn default_templates_path() -> String {
    "config/templates.toml".to_string()
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Editing sessions nobody has touched for `idle_ttl_secs` are evicted.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    pub idle_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_ttl_secs: 1800,
            sweep_interval_secs: 60,
        }
    }
}

impl SessionSettings {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl ServerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_canvas_limits(&self.canvas)?;
        if self.sessions.idle_ttl_secs == 0 || self.sessions.sweep_interval_secs == 0 {
            anyhow::bail!("sessions.idle_ttl_secs and sessions.sweep_interval_secs must be positive");
        }
        Ok(())
    }
}

/// Each axis needs finite bounds with `min <= default <= max`.
pub fn validate_canvas_limits(limits: &CanvasLimits) -> anyhow::Result<()> {
    let axes = [
        ("width", limits.min_width, limits.default_width, limits.max_width),
        ("height", limits.min_height, limits.default_height, limits.max_height),
    ];
    for (axis, min, default, max) in axes {
        if !(min.is_finite() && default.is_finite() && max.is_finite()) {
            anyhow::bail!("canvas {} limits must be finite", axis);
        }
        if !(min <= default && default <= max) {
            anyhow::bail!(
                "canvas {} limits out of order: min {} default {} max {}",
                axis,
                min,
                default,
                max
            );
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub templates: Vec<WidgetTemplate>,
}

/// Server settings from `config/server.*`, overridable through
/// `DESIGNER__SERVER__PORT` style environment variables.
pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(
            config::Environment::with_prefix("DESIGNER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: ServerConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// The widget template library, parsed with `toml`.
pub fn load_templates_config(path: impl AsRef<Path>) -> anyhow::Result<TemplatesConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
    parse_templates(&raw)
}

pub fn parse_templates(raw: &str) -> anyhow::Result<TemplatesConfig> {
    Ok(toml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::widget::WidgetKind;
    use serde_json::json;

    #[test]
    fn test_parse_templates() {
        let raw = r#"
            [[templates]]
            id = "jobs-by-status"
            title = "Jobs by Status"
            type = "chart"
            icon = "PieChart"
            description = "Chart showing job distribution by status"
            defaultConfig = { chartType = "pie" }
            defaultData = { icon = "PieChart", description = "Job status distribution" }
        "#;

        let config = parse_templates(raw).unwrap();
        assert_eq!(config.templates.len(), 1);

        let template = &config.templates[0];
        assert_eq!(template.kind, WidgetKind::Chart);
        assert_eq!(template.default_config, json!({ "chartType": "pie" }));
        assert_eq!(template.default_data["icon"], "PieChart");
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let config = load_templates_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config/templates.toml")).unwrap();
        assert_eq!(config.templates.len(), 8);
        assert!(config.templates.iter().any(|t| t.id == "active-jobs"));
    }

    #[test]
    fn test_bundled_server_config_is_valid() {
        let raw = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config/server.toml")).unwrap();
        let config: ServerConfig = toml::from_str(&raw).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.sessions, SessionSettings::default());
    }

    #[test]
    fn test_inverted_canvas_limits_rejected() {
        let limits = CanvasLimits {
            min_width: 1600.0,
            max_width: 400.0,
            ..CanvasLimits::default()
        };
        let err = validate_canvas_limits(&limits).unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_default_outside_limits_rejected() {
        let limits = CanvasLimits {
            default_height: 2000.0,
            ..CanvasLimits::default()
        };
        assert!(validate_canvas_limits(&limits).is_err());

        let limits = CanvasLimits {
            max_height: f64::NAN,
            ..CanvasLimits::default()
        };
        assert!(validate_canvas_limits(&limits).is_err());
        assert!(validate_canvas_limits(&CanvasLimits::default()).is_ok());
    }

    #[test]
    fn test_zero_idle_ttl_rejected() {
        let config = ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 9000,
                templates_path: default_templates_path(),
            },
            canvas: CanvasLimits::default(),
            sessions: SessionSettings {
                idle_ttl_secs: 0,
                ..SessionSettings::default()
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 9000,
            templates_path: default_templates_path(),
        };
        assert_eq!(settings.socket_addr().unwrap().port(), 9000);
    }
}
