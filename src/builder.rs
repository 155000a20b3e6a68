// src/builder.rs

//! Build orchestration
//!
//! Thin wrapper over a third-party library's configure/build/install
//! sequence. The orchestrator knows nothing about the build tool beyond
//! its three-step contract; steps run strictly in order and the first
//! non-success aborts the run with a step-specific error.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Three-step contract expected from the underlying build tool
pub trait BuildSteps {
    /// Prepare the build for the given install prefix and libdir
    fn configure(&mut self, prefix: &Path, libdir: &Path) -> Result<()>;

    /// Compile the configured source tree
    fn build(&mut self) -> Result<()>;

    /// Install the built artifacts under the configured prefix
    fn install(&mut self) -> Result<()>;
}

/// Run configure, build, install in order, aborting at the first failure
pub fn run_build(steps: &mut dyn BuildSteps, prefix: &Path, libdir: &Path) -> Result<()> {
    info!("Configuring with prefix {} and libdir {}", prefix.display(), libdir.display());
    steps.configure(prefix, libdir)?;

    info!("Building");
    steps.build()?;

    info!("Installing");
    steps.install()?;

    info!("Build sequence complete");
    Ok(())
}

/// Standard configure/make/install sequence run in a source directory
pub struct ConfigureMakeInstall {
    source_dir: PathBuf,
}

impl ConfigureMakeInstall {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    fn run_step(&self, step: &str, command: &mut Command) -> Result<()> {
        let status = command
            .current_dir(&self.source_dir)
            .status()
            .map_err(|e| Error::BuildStep {
                step: step.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::BuildStep {
                step: step.to_string(),
                reason: format!("exited with {}", status),
            });
        }

        Ok(())
    }
}

impl BuildSteps for ConfigureMakeInstall {
    fn configure(&mut self, prefix: &Path, libdir: &Path) -> Result<()> {
        self.run_step(
            "configure",
            Command::new("./configure")
                .arg(format!("--prefix={}", prefix.display()))
                .arg(format!("--libdir={}", libdir.display())),
        )
    }

    fn build(&mut self) -> Result<()> {
        self.run_step("build", &mut Command::new("make"))
    }

    fn install(&mut self) -> Result<()> {
        self.run_step("install", Command::new("make").arg("install"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records step order and fails at a chosen step
    struct RecordingSteps {
        ran: Vec<&'static str>,
        fail_at: Option<&'static str>,
    }

    impl RecordingSteps {
        fn new(fail_at: Option<&'static str>) -> Self {
            Self {
                ran: Vec::new(),
                fail_at,
            }
        }

        fn step(&mut self, name: &'static str) -> Result<()> {
            self.ran.push(name);
            if self.fail_at == Some(name) {
                return Err(Error::BuildStep {
                    step: name.to_string(),
                    reason: "simulated failure".to_string(),
                });
            }
            Ok(())
        }
    }

    impl BuildSteps for RecordingSteps {
        fn configure(&mut self, _prefix: &Path, _libdir: &Path) -> Result<()> {
            self.step("configure")
        }

        fn build(&mut self) -> Result<()> {
            self.step("build")
        }

        fn install(&mut self) -> Result<()> {
            self.step("install")
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let mut steps = RecordingSteps::new(None);
        run_build(&mut steps, Path::new("/opt/pkg"), Path::new("/opt/pkg/lib")).unwrap();
        assert_eq!(steps.ran, vec!["configure", "build", "install"]);
    }

    #[test]
    fn test_configure_failure_runs_nothing_else() {
        let mut steps = RecordingSteps::new(Some("configure"));
        let result = run_build(&mut steps, Path::new("/p"), Path::new("/l"));

        assert!(matches!(result, Err(Error::BuildStep { .. })));
        assert_eq!(steps.ran, vec!["configure"]);
    }

    #[test]
    fn test_build_failure_skips_install() {
        let mut steps = RecordingSteps::new(Some("build"));
        let result = run_build(&mut steps, Path::new("/p"), Path::new("/l"));

        assert!(result.is_err());
        assert_eq!(steps.ran, vec!["configure", "build"]);
    }

    #[test]
    fn test_missing_source_dir_is_a_step_failure() {
        let mut steps = ConfigureMakeInstall::new("/nonexistent/source/tree");
        let result = steps.build();

        match result {
            Err(Error::BuildStep { step, .. }) => assert_eq!(step, "build"),
            other => panic!("expected BuildStep error, got {:?}", other),
        }
    }
}
