//! Workspace resolution
//!
//! Works out the directory the toolchain runs in. Resolution order:
//!
//! | Source | Used when |
//! |--------|-----------|
//! | explicit path | given on the command line or by the caller |
//! | `WORKSPACE` | set by the CI server for the running build |
//! | `JENKINS_HOME/workspace/JOB_NAME` | both variables set |
//! | current directory | fallback |

use std::env;
use std::path::{Path, PathBuf};

/// Resolves the working directory for a step run
#[derive(Debug, Clone, Default)]
pub struct WorkspaceResolver {
    workspace: Option<PathBuf>,
    jenkins_home: Option<PathBuf>,
    job_name: Option<String>,
    cwd: PathBuf,
}

impl WorkspaceResolver {
    /// Creates a resolver from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            workspace: non_empty_var("WORKSPACE").map(PathBuf::from),
            jenkins_home: non_empty_var("JENKINS_HOME").map(PathBuf::from),
            job_name: non_empty_var("JOB_NAME"),
            cwd: env::current_dir().unwrap_or_default(),
        }
    }

    /// Creates a resolver that only knows the current directory
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Sets the build workspace
    #[must_use]
    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Sets the CI home directory and job name
    #[must_use]
    pub fn with_job(mut self, jenkins_home: impl Into<PathBuf>, job_name: impl Into<String>) -> Self {
        self.jenkins_home = Some(jenkins_home.into());
        self.job_name = Some(job_name.into());
        self
    }

    /// Resolves the working directory
    ///
    /// Relative explicit paths are taken relative to the current directory.
    #[must_use]
    pub fn resolve(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return self.cwd.join(path);
        }
        if let Some(workspace) = &self.workspace {
            return workspace.clone();
        }
        if let (Some(home), Some(job)) = (&self.jenkins_home, &self.job_name) {
            return home.join("workspace").join(job);
        }
        self.cwd.clone()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let resolver = WorkspaceResolver::new("/home/ci")
            .with_workspace("/var/ws")
            .with_job("/var/jenkins", "beam");
        assert_eq!(
            resolver.resolve(Some(Path::new("/srv/pipeline"))),
            PathBuf::from("/srv/pipeline")
        );
    }

    #[test]
    fn test_relative_explicit_path_joins_cwd() {
        let resolver = WorkspaceResolver::new("/home/ci");
        assert_eq!(
            resolver.resolve(Some(Path::new("pipeline"))),
            PathBuf::from("/home/ci/pipeline")
        );
    }

    #[test]
    fn test_workspace_before_job_dir() {
        let resolver = WorkspaceResolver::new("/home/ci")
            .with_workspace("/var/ws")
            .with_job("/var/jenkins", "beam");
        assert_eq!(resolver.resolve(None), PathBuf::from("/var/ws"));
    }

    #[test]
    fn test_job_dir_under_jenkins_home() {
        let resolver = WorkspaceResolver::new("/home/ci").with_job("/var/jenkins", "beam");
        assert_eq!(
            resolver.resolve(None),
            PathBuf::from("/var/jenkins/workspace/beam")
        );
    }

    #[test]
    fn test_falls_back_to_cwd() {
        let resolver = WorkspaceResolver::new("/home/ci");
        assert_eq!(resolver.resolve(None), PathBuf::from("/home/ci"));
    }
}
