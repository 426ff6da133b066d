//! Default lint rule groups for generated lint scripts.
//!
//! Rules are flake8/pycodestyle codes, grouped by how the generated
//! `lint_roller.sh` treats them:
//!
//! - **fix**: fixed in place by autopep8 with normal aggressiveness
//! - **belligerent**: fixed by autopep8 with the aggressiveness flag repeated
//! - **warning**: only reported by flake8
//! - **code only warning**: reported for source code but not for tests

/// Codes autopep8 fixes in place.
pub const LINT_FIX_LIST: &[&str] = &[
    "E301", "E303", "E304", "E305", "E306", "E502", "W291", "W293", "W391", "E226", "E225", "E241",
    "E231",
];

/// Codes autopep8 only fixes when run aggressively.
pub const LINT_BELLIGERENT_LIST: &[&str] = &["W292", "E265"];

/// Codes that are reported but never fixed automatically.
pub const LINT_WARN_LIST: &[&str] = &[
    "E101", "E111", "E112", "E113", "E121", "E122", "E125", "E127", "E128", "E129", "E131",
    "E133", "E201", "E202", "E203", "E211", "E222", "E223", "E224", "E225", "E227", "E228",
    "E242", "E251", "E261", "E262", "E271", "E272", "E402", "E703", "E711", "E712", "E713",
    "E714", "E721", "W504", "E302",
    // flake8-2020
    "YTT101", "YTT102", "YTT103", "YTT201", "YTT202", "YTT203", "YTT204", "YTT301", "YTT302",
    "YTT303",
    // flake8-strftime
    "STRFTIME001", "STRFTIME002",
    // flake8-pytest-style
    "PT001", "PT002", "PT003", "PT004", "PT005", "PT006", "PT007", "PT008", "PT009", "PT010",
    "PT011", "PT012", "PT013", "PT014", "PT015", "PT016", "PT017", "PT018", "PT019", "PT020",
    "PT021",
    // flake8-rst-docstrings
    "RST201", "RST202", "RST203", "RST204", "RST205", "RST206", "RST207", "RST208", "RST210",
    "RST211", "RST212", "RST213", "RST214", "RST215", "RST216", "RST217", "RST218", "RST219",
    "RST299", "RST301", "RST302", "RST303", "RST304", "RST305", "RST306", "RST399", "RST401",
    "RST499", "RST900", "RST901", "RST902", "RST903",
    // flake8-quotes
    "Q000", "Q001", "Q002", "Q003",
];

/// pydocstyle codes applied to source code only.
pub const CODE_ONLY_WARNING: &[&str] = &[
    "D100", "D101", "D102", "D103", "D104", "D106", "D107", "D201", "D204", "D207", "D208",
    "D209", "D210", "D211", "D212", "D213", "D214", "D215", "D300", "D301", "D400", "D402",
    "D403", "D404", "D415", "D417",
];

/// A lint rule group with any project-specific additions appended.
///
/// Additions already present in `defaults` are skipped so each code appears
/// once, in first-seen order.
pub fn with_extras(defaults: &[&str], extras: &[String]) -> Vec<String> {
    let mut codes: Vec<String> = defaults.iter().map(|c| c.to_string()).collect();
    for extra in extras {
        if !codes.iter().any(|c| c == extra) {
            codes.push(extra.clone());
        }
    }
    codes
}
