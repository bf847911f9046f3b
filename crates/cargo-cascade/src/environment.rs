use std::io::IsTerminal;

use tracing::debug;

const NO_TTY_VAR: &str = "CARGO_CASCADE_NO_TTY";
const FORCE_TTY_VAR: &str = "CARGO_CASCADE_FORCE_TTY";

const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: &'static str },
    NoTerminal,
}

pub fn is_interactive() -> bool {
    let reason = non_interactive_reason(
        |name| std::env::var_os(name).is_some(),
        std::io::stdin().is_terminal(),
    );
    if let Some(reason) = &reason {
        debug!(?reason, "prompts disabled");
    }
    reason.is_none()
}

/// `NO_TTY` beats `FORCE_TTY`, which beats CI detection and the terminal check.
fn non_interactive_reason(
    is_set: impl Fn(&str) -> bool,
    stdin_is_terminal: bool,
) -> Option<NonInteractiveReason> {
    if is_set(NO_TTY_VAR) {
        return Some(NonInteractiveReason::ExplicitDisable);
    }
    if is_set(FORCE_TTY_VAR) {
        return None;
    }
    if let Some(env_var) = CI_ENV_VARS.iter().copied().find(|var| is_set(var)) {
        return Some(NonInteractiveReason::CiDetected { env_var });
    }
    if !stdin_is_terminal {
        return Some(NonInteractiveReason::NoTerminal);
    }
    None
}
