use crate::guard::{GuardError, GuardResult};
use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub(crate) const DEFAULT_INPUT_CLASS: &str = "autocomplete__input";
pub(crate) const DEFAULT_ANCESTOR_DEPTH: usize = 3;
pub(crate) const DEFAULT_PAIRING_ATTRIBUTE: &str = "data-select-id";

/// What to do with an autocomplete input whose `<select>` cannot be found.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MissingSelectPolicy {
    /// Drop the widget with a console warning; the rest of the form is still guarded.
    #[default]
    Skip,
    /// Refuse to install the guard at all.
    Fail,
}

/// When the set of widgets is resolved.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResolveMode {
    /// Captured once at install time. Widgets added later are not seen.
    #[default]
    Once,
    /// Re-resolved on every submit, for pages that add pickers dynamically.
    EachSubmit,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GuardConfig {
    #[serde(alias = "inputClass")]
    pub input_class: String,

    /// Levels walked up from the input before searching for a `<select>`.
    #[serde(alias = "ancestorDepth")]
    pub ancestor_depth: usize,

    /// Attribute on the input holding the id of its `<select>`.
    /// Takes precedence over the ancestor walk when present.
    #[serde(alias = "pairingAttribute")]
    pub pairing_attribute: String,

    #[serde(alias = "onMissingSelect")]
    pub on_missing_select: MissingSelectPolicy,

    pub resolve: ResolveMode,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            input_class: DEFAULT_INPUT_CLASS.to_string(),
            ancestor_depth: DEFAULT_ANCESTOR_DEPTH,
            pairing_attribute: DEFAULT_PAIRING_ATTRIBUTE.to_string(),
            on_missing_select: MissingSelectPolicy::default(),
            resolve: ResolveMode::default(),
        }
    }
}

impl GuardConfig {
    /// Load from `window.ENV.COUNTRY_PICKER`, falling back to defaults.
    pub fn new() -> Self {
        let Some(json) = env_config_json() else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("country-picker: ignoring window.ENV config: {e}");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> GuardResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(GuardError::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GuardResult<()> {
        if self.input_class.trim().is_empty() {
            return Err(GuardError::config("input_class must not be empty"));
        }
        if self.ancestor_depth == 0 {
            return Err(GuardError::config("ancestor_depth must be at least 1"));
        }
        Ok(())
    }

    pub fn with_input_class(mut self, class: impl Into<String>) -> Self {
        self.input_class = class.into();
        self
    }

    pub fn with_missing_select(mut self, policy: MissingSelectPolicy) -> Self {
        self.on_missing_select = policy;
        self
    }

    pub fn with_resolve(mut self, resolve: ResolveMode) -> Self {
        self.resolve = resolve;
        self
    }
}

/// Serialized `window.ENV.COUNTRY_PICKER` (or `window.ENV.country_picker`), if set.
fn env_config_json() -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    for key in ["COUNTRY_PICKER", "country_picker"] {
        let Ok(value) = js_sys::Reflect::get(&env, &key.into()) else {
            continue;
        };
        if !value.is_object() {
            continue;
        }
        if let Some(json) = js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()) {
            return Some(json);
        }
    }

    None
}
