//! # Host Environment Discovery
//!
//! The [`Environment`] trait is the configuration surface a tool reads from
//! the host engine at startup: its tool id, the workflow directory, install
//! paths, locale, and whether the run is a metadata-only update pass.
//!
//! [`TestEnvironment`] is an in-process implementation with builder-style
//! options for driving tools in tests without a host.
//!
//! The locale also feeds the field codec: [`decimal_separator_for`] picks the
//! decimal separator used by FixedDecimal text, wired into
//! [`Schema::with_decimal_separator`](crate::schema::Schema::with_decimal_separator).

/// Host-provided runtime context for one tool instance.
pub trait Environment {
    fn tool_id(&self) -> i32;

    /// True when the host runs the tool only to refresh output metadata.
    fn update_only(&self) -> bool;

    fn update_mode(&self) -> &str;

    fn host_version(&self) -> &str;

    fn workflow_dir(&self) -> &str;

    fn install_dir(&self) -> &str;

    fn locale(&self) -> &str;

    /// Pushes an updated tool configuration document back to the host.
    fn update_tool_config(&mut self, config: String);
}

/// Standalone [`Environment`] for tests and host-less development.
#[derive(Debug, Clone, Default)]
pub struct TestEnvironment {
    tool_id: i32,
    update_only: bool,
    update_mode: String,
    workflow_dir: String,
    locale: String,
    tool_config: Option<String>,
}

impl TestEnvironment {
    pub fn new(tool_id: i32) -> Self {
        Self {
            tool_id,
            ..Self::default()
        }
    }

    pub fn with_update_only(mut self, value: bool) -> Self {
        self.update_only = value;
        self
    }

    pub fn with_update_mode(mut self, value: impl Into<String>) -> Self {
        self.update_mode = value.into();
        self
    }

    pub fn with_workflow_dir(mut self, value: impl Into<String>) -> Self {
        self.workflow_dir = value.into();
        self
    }

    pub fn with_locale(mut self, value: impl Into<String>) -> Self {
        self.locale = value.into();
        self
    }

    /// The configuration last pushed through
    /// [`update_tool_config`](Environment::update_tool_config), if any.
    pub fn tool_config(&self) -> Option<&str> {
        self.tool_config.as_deref()
    }
}

impl Environment for TestEnvironment {
    fn tool_id(&self) -> i32 {
        self.tool_id
    }

    fn update_only(&self) -> bool {
        self.update_only
    }

    fn update_mode(&self) -> &str {
        &self.update_mode
    }

    fn host_version(&self) -> &str {
        "TestHarness"
    }

    fn workflow_dir(&self) -> &str {
        &self.workflow_dir
    }

    fn install_dir(&self) -> &str {
        ""
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn update_tool_config(&mut self, config: String) {
        self.tool_config = Some(config);
    }
}

/// Decimal separator for FixedDecimal text in the given locale. Unknown or
/// empty locales fall back to `.`.
pub fn decimal_separator_for(locale: &str) -> char {
    let primary = locale
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match primary.as_str() {
        "de" | "fr" | "es" | "it" | "pt" | "nl" | "ru" | "pl" | "tr" | "sv" | "da" | "fi"
        | "no" | "cs" => ',',
        _ => '.',
    }
}
