// Launch Profiles and the Downstream Adapter Invocation

use std::path::{Path, PathBuf};

/// Protocol adapter binary. Translates between the runtime API and the
/// agent's native ACP invocation.
pub const ADAPTER_BIN: &str = "acp2rt";

/// Backing agent binary launched by the adapter.
pub const AGENT_BIN: &str = "codex-acp";

/// Which configuration override set the backing agent is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchProfile {
    /// Provider selection only.
    Minimal,
    /// Never prompt for approval, agent-internal sandbox disabled. The
    /// container boundary is the trusted isolation layer; the agent's own
    /// sandboxing is unreliable inside it and is switched off rather than
    /// layered.
    Autonomous,
}

impl LaunchProfile {
    /// `-c` overrides appended to the agent invocation, in order. Opaque
    /// `key="value"` strings interpreted by the agent's config language;
    /// the bootstrap never parses them.
    pub fn config_overrides(&self) -> &'static [&'static str] {
        match self {
            LaunchProfile::Minimal => &[r#"model_provider="openai""#],
            LaunchProfile::Autonomous => &[
                r#"model_provider="openai""#,
                r#"approval_policy="never""#,
                r#"sandbox_mode="danger-full-access""#,
            ],
        }
    }
}

impl std::fmt::Display for LaunchProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchProfile::Minimal => write!(f, "minimal"),
            LaunchProfile::Autonomous => write!(f, "autonomous"),
        }
    }
}

/// Argument contract to the protocol adapter:
/// `acp2rt --workspace-path <mount> -- <agent> [-c override]...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInvocation {
    pub adapter_bin: PathBuf,
    pub workspace_path: PathBuf,
    pub agent_bin: PathBuf,
    pub config_overrides: Vec<String>,
}

impl AdapterInvocation {
    pub fn new(workspace_path: impl Into<PathBuf>, profile: LaunchProfile) -> Self {
        Self {
            adapter_bin: PathBuf::from(ADAPTER_BIN),
            workspace_path: workspace_path.into(),
            agent_bin: PathBuf::from(AGENT_BIN),
            config_overrides: profile
                .config_overrides()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.adapter_bin
    }

    /// Arguments after the program name. The `--` separator keeps the agent
    /// command opaque to the adapter's own flag parsing.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--workspace-path".to_string(),
            self.workspace_path.display().to_string(),
            "--".to_string(),
            self.agent_bin.display().to_string(),
        ];
        for value in &self.config_overrides {
            args.push("-c".to_string());
            args.push(value.clone());
        }
        args
    }
}

impl std::fmt::Display for AdapterInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program().display())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Fully constructed hand-off: the adapter invocation plus the variables
/// the downstream process tree receives on top of the environment it
/// inherits. The bootstrap never mutates its own ambient environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterLaunch {
    pub invocation: AdapterInvocation,
    pub env_exports: Vec<(String, String)>,
}

impl AdapterLaunch {
    /// Export names only, safe to log (values may hold the secret).
    pub fn export_names(&self) -> Vec<&str> {
        self.env_exports.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation_argv() {
        let invocation = AdapterInvocation::new("/workspace", LaunchProfile::Minimal);

        assert_eq!(invocation.program(), Path::new("acp2rt"));
        assert_eq!(
            invocation.args(),
            vec![
                "--workspace-path",
                "/workspace",
                "--",
                "codex-acp",
                "-c",
                r#"model_provider="openai""#,
            ]
        );
    }

    #[test]
    fn test_autonomous_appends_exactly_the_two_policy_overrides() {
        let minimal = AdapterInvocation::new("/workspace", LaunchProfile::Minimal);
        let autonomous = AdapterInvocation::new("/workspace", LaunchProfile::Autonomous);

        let extra: Vec<_> = autonomous.args()[minimal.args().len()..].to_vec();
        assert_eq!(
            extra,
            vec![
                "-c",
                r#"approval_policy="never""#,
                "-c",
                r#"sandbox_mode="danger-full-access""#,
            ]
        );

        // The minimal profile never carries the policy overrides.
        let rendered = minimal.to_string();
        assert!(!rendered.contains("approval_policy"));
        assert!(!rendered.contains("sandbox_mode"));
    }

    #[test]
    fn test_display_renders_full_command_line() {
        let invocation = AdapterInvocation::new("/workspace", LaunchProfile::Minimal);

        assert_eq!(
            invocation.to_string(),
            r#"acp2rt --workspace-path /workspace -- codex-acp -c model_provider="openai""#
        );
    }

    #[test]
    fn test_export_names_hide_values() {
        let launch = AdapterLaunch {
            invocation: AdapterInvocation::new("/workspace", LaunchProfile::Minimal),
            env_exports: vec![("OPENAI_API_KEY".to_string(), "sk-secret".to_string())],
        };

        assert_eq!(launch.export_names(), vec!["OPENAI_API_KEY"]);
    }
}
