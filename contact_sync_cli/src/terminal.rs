//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY but are never interactive
    if is_ci_environment() {
        return false;
    }

    true
}

/// Check if the terminal supports ANSI escape codes
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    !(term == "dumb" || term.is_empty())
}

/// Whether output should be colored, given the configured preference
///
/// `NO_COLOR` always wins.
pub fn should_use_color(color_enabled: bool) -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    color_enabled && supports_ansi()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD",
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}
