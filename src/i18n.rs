use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::{debug, warn};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_INVALID_INPUT: &str = "general.error_invalid_input";
    pub const ERROR_UNEXPECTED: &str = "general.error_unexpected";
    pub const CONFIG_ERROR: &str = "general.config_error";

    pub const BANNER_TITLE: &str = "banner.title";

    pub const PROMPT_VOLTAGE: &str = "prompt.voltage";
    pub const PROMPT_CURRENT: &str = "prompt.current";
    pub const PROMPT_POWER_FACTOR: &str = "prompt.power_factor";
    pub const PROMPT_FREQUENCY: &str = "prompt.frequency";

    pub const RESULTS_HEADING: &str = "results.heading";
    pub const RESULTS_APPARENT: &str = "results.apparent";
    pub const RESULTS_ACTIVE: &str = "results.active";
    pub const RESULTS_REACTIVE: &str = "results.reactive";
    pub const RESULTS_PHASE_ANGLE: &str = "results.phase_angle";
    pub const RESULTS_POWER_FACTOR: &str = "results.power_factor";

    pub const CORRECTION_HEADING: &str = "correction.heading";
    pub const CORRECTION_TARGET: &str = "correction.target";
    pub const CORRECTION_CAPACITOR: &str = "correction.capacitor";
    pub const CORRECTION_CAPACITOR_RATING: &str = "correction.capacitor_rating";
    pub const CORRECTION_OPTIMAL: &str = "correction.optimal";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_VOLTAGE: &str = "gui.voltage";
    pub const GUI_CURRENT: &str = "gui.current";
    pub const GUI_POWER_FACTOR: &str = "gui.power_factor";
    pub const GUI_FREQUENCY: &str = "gui.frequency";
    pub const GUI_CYCLES: &str = "gui.cycles";
    pub const GUI_SHOW_POWER: &str = "gui.show_power";
    pub const GUI_RESULTS: &str = "gui.results";
    pub const GUI_CORRECTION: &str = "gui.correction";
    pub const GUI_AVERAGE_POWER: &str = "gui.average_power";
    pub const GUI_TARGET_PF: &str = "gui.target_pf";
    pub const GUI_SAVE_SETTINGS: &str = "gui.save_settings";
    pub const GUI_SAVED: &str = "gui.saved";
    pub const GUI_THEME_SYSTEM: &str = "gui.theme_system";
    pub const GUI_THEME_LIGHT: &str = "gui.theme_light";
    pub const GUI_THEME_DARK: &str = "gui.theme_dark";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 내장 언어팩으로 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        let lang = Language::from_code(lang_code);
        Self {
            lang,
            strings: built_in_pack(lang).unwrap_or_default(),
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    /// 언어팩 디렉터리(`{dir}/{code}.toml`)가 있으면 내장 문자열 위에 덮어쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let mut tr = Self::new(lang_code);
        if let Some(overrides) = pack_dir.and_then(|dir| load_overrides(dir, tr.lang)) {
            debug!(count = overrides.len(), "language pack overrides loaded");
            tr.strings.extend(overrides);
        }
        tr
    }

    /// 번역을 가져온다. 현재 언어에 없으면 영어, 그마저 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| {
                warn!(key, "missing translation");
                key.to_string()
            })
    }

    /// `{name}` 자리표시자를 채운 번역을 가져온다.
    pub fn fmt(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// 템플릿의 `{name}`을 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn load_overrides(dir: &Path, lang: Language) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{}.toml", lang.as_code()));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

/// TOML 언어팩을 `section.key` 형태의 플랫 맵으로 펼친다.
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => parse_toml_to_map(include_str!("../locales/en.toml")),
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko.toml")),
    }
}
