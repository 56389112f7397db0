use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::operations::route::{RouteConfig, DEFAULT_MAX_CHANNEL_WIDTH, DEFAULT_MIN_BUFFER};

use super::LinkKind;

/// Shape configuration of a link, as supplied by the diagram's style sheet.
///
/// Deserializes from a flat JSON object. Keys not listed here are kept in
/// [`LinkStyle::extra`] for the renderer.
///
/// | key               | field               | default    |
/// |-------------------|---------------------|------------|
/// | `type`            | `link_type`         | `"direct"` |
/// | `showGauge`       | `show_gauge`        | `false`    |
/// | `orthogonal`      | `orthogonal`        | `false`    |
/// | `MIN_BUFFER`      | `min_buffer`        | `10`       |
/// | `autoRoute`       | `auto_route`        | `false`    |
/// | `maxChannelWidth` | `max_channel_width` | `100`      |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
    /// Link variant selector; see [`LinkKind`].
    #[serde(rename = "type")]
    pub link_type: String,
    /// Rendering hint, unused by routing.
    #[serde(rename = "showGauge")]
    pub show_gauge: bool,
    /// Rendering hint, unused by routing.
    pub orthogonal: bool,
    /// Minimum stub length at a terminal.
    #[serde(rename = "MIN_BUFFER")]
    pub min_buffer: f64,
    /// Enables obstacle avoidance for Manhattan links.
    #[serde(rename = "autoRoute")]
    pub auto_route: bool,
    /// Cap on the width of free channels used when avoiding obstacles.
    #[serde(rename = "maxChannelWidth")]
    pub max_channel_width: f64,
    /// Unrecognized keys, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            link_type: LinkKind::Direct.as_str().to_owned(),
            show_gauge: false,
            orthogonal: false,
            min_buffer: DEFAULT_MIN_BUFFER,
            auto_route: false,
            max_channel_width: DEFAULT_MAX_CHANNEL_WIDTH,
            extra: Map::new(),
        }
    }
}

impl LinkStyle {
    /// Parses and validates a style from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and the errors of
    /// [`LinkStyle::validate`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let style: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        style.validate()?;
        Ok(style)
    }

    /// Checks the numeric options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `MIN_BUFFER` or
    /// `maxChannelWidth` is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("MIN_BUFFER", self.min_buffer),
            ("maxChannelWidth", self.max_channel_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { key, value }.into());
            }
        }
        Ok(())
    }

    /// Resolves the `type` selector.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownLinkType` for an unsupported selector.
    pub fn kind(&self) -> Result<LinkKind> {
        self.link_type.parse()
    }

    /// Returns the routing parameters carried by this style.
    #[must_use]
    pub fn route_config(&self) -> RouteConfig {
        RouteConfig {
            min_buffer: self.min_buffer,
            max_channel_width: self.max_channel_width,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LinkKind) -> Self {
        kind.as_str().clone_into(&mut self.link_type);
        self
    }

    #[must_use]
    pub fn with_auto_route(mut self, auto_route: bool) -> Self {
        self.auto_route = auto_route;
        self
    }

    #[must_use]
    pub fn with_min_buffer(mut self, min_buffer: f64) -> Self {
        self.min_buffer = min_buffer;
        self
    }

    #[must_use]
    pub fn with_max_channel_width(mut self, max_channel_width: f64) -> Self {
        self.max_channel_width = max_channel_width;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let style = LinkStyle::from_json("{}").unwrap();
        assert_eq!(style, LinkStyle::default());
        assert_eq!(style.kind().unwrap(), LinkKind::Direct);
        assert_relative_eq!(style.min_buffer, 10.0);
        assert_relative_eq!(style.max_channel_width, 100.0);
        assert!(!style.auto_route);
    }

    #[test]
    fn recognized_keys_and_passthrough() {
        let style = LinkStyle::from_json(
            r#"{"type": "manhattan", "MIN_BUFFER": 4, "autoRoute": true,
                "maxChannelWidth": 60, "showGauge": true, "stroke": "red"}"#,
        )
        .unwrap();
        assert_eq!(style.kind().unwrap(), LinkKind::Manhattan);
        assert_relative_eq!(style.min_buffer, 4.0);
        assert_relative_eq!(style.max_channel_width, 60.0);
        assert!(style.auto_route);
        assert!(style.show_gauge);
        assert_eq!(style.extra.get("stroke"), Some(&Value::from("red")));
        assert!(!style.extra.contains_key("autoRoute"));
    }

    #[test]
    fn passthrough_survives_serialization() {
        let style = LinkStyle::from_json(r#"{"type": "bezier", "dash": [4, 2]}"#).unwrap();
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["type"], Value::from("bezier"));
        assert_eq!(json["dash"], serde_json::json!([4, 2]));
    }

    #[test]
    fn rejects_negative_buffer() {
        assert!(LinkStyle::from_json(r#"{"MIN_BUFFER": -1}"#).is_err());
        assert!(LinkStyle::from_json(r#"{"maxChannelWidth": -5}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(LinkStyle::from_json(r#"{"MIN_BUFFER": "#).is_err());
        assert!(LinkStyle::from_json(r#"{"autoRoute": "yes"}"#).is_err());
    }

    #[test]
    fn unknown_type_is_reported_by_kind() {
        let style = LinkStyle::from_json(r#"{"type": "spline"}"#).unwrap();
        assert!(style.kind().is_err());
    }

    #[test]
    fn builders_set_fields() {
        let style = LinkStyle::default()
            .with_kind(LinkKind::Manhattan)
            .with_auto_route(true)
            .with_min_buffer(5.0)
            .with_max_channel_width(40.0);
        assert_eq!(style.link_type, "manhattan");
        assert!(style.auto_route);
        assert_eq!(
            style.route_config(),
            RouteConfig {
                min_buffer: 5.0,
                max_channel_width: 40.0,
            }
        );
    }
}
