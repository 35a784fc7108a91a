//! Test environment builder for isolated pap runs.
//!
//! Every external tool pap starts (rsync, ssh, composer, git, ...) is
//! replaced by a stub script on `PATH` that appends its command line to a
//! log file and exits with a configurable code.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Tools replaced by logging stubs
pub const STUBBED_TOOLS: &[&str] = &[
    "rsync", "ssh", "composer", "npm", "grunt", "bundle", "xdg-open", "open",
];

/// Result of running a pap CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    pub fn assert_exit(&self, code: i32) -> &Self {
        assert_eq!(
            self.exit_code,
            code,
            "unexpected exit code, output:\n{}",
            self.combined_output()
        );
        self
    }

    pub fn assert_output_contains(&self, needle: &str) -> &Self {
        assert!(
            self.combined_output().contains(needle),
            "expected output to contain {needle:?}, got:\n{}",
            self.combined_output()
        );
        self
    }
}

/// Isolated project directory plus a `bin/` of stubs
pub struct TestEnv {
    pub project_root: TempDir,
    bin_dir: TempDir,
    branch: String,
    failing: Vec<(String, i32)>,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    /// Project directory with a trailing slash, as used for `repository-path`
    pub fn repo(&self) -> String {
        format!("{}/", self.project_root.path().display())
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn tool_log(&self) -> PathBuf {
        self.bin_dir.path().join("calls.log")
    }

    /// Every stubbed tool invocation, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.tool_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn calls_of(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix) || c == tool)
            .collect()
    }

    pub fn lock(&self) -> Option<String> {
        fs::read_to_string(self.project_path(".lock")).ok()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let path = format!(
            "{}:{}",
            self.bin_dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pap"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("PATH", path)
            .env("PAP_TOOL_LOG", self.tool_log())
            .env("PAP_TEST_BRANCH", &self.branch)
            .env("PAP_REPOSITORY_PATH", self.repo())
            .env("NO_COLOR", "1")
            .env_remove("PAP_LOG");
        for (tool, code) in &self.failing {
            let var = format!("PAP_FAIL_{}", tool.to_uppercase().replace('-', "_"));
            cmd.env(var, code.to_string());
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("failed to execute pap"))
    }

    /// Run without the repository path override (git decides)
    pub fn run_without_repository(&self, args: &[&str]) -> TestResult {
        let path = format!(
            "{}:{}",
            self.bin_dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let output = Command::new(env!("CARGO_BIN_EXE_pap"))
            .current_dir(self.project_root.path())
            .args(args)
            .env("PATH", path)
            .env("PAP_TOOL_LOG", self.tool_log())
            .env("PAP_TEST_TOPLEVEL_FAILS", "1")
            .env_remove("PAP_REPOSITORY_PATH")
            .output()
            .expect("failed to execute pap");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

#[derive(Default)]
pub struct TestEnvBuilder {
    common: Option<String>,
    local: Option<String>,
    lock: Option<String>,
    branch: Option<String>,
    failing: Vec<(String, i32)>,
}

impl TestEnvBuilder {
    pub fn common(mut self, yaml: &str) -> Self {
        self.common = Some(yaml.to_string());
        self
    }

    pub fn local(mut self, yaml: &str) -> Self {
        self.local = Some(yaml.to_string());
        self
    }

    pub fn lock(mut self, line: &str) -> Self {
        self.lock = Some(line.to_string());
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    /// Make a stubbed tool exit with `code`
    pub fn failing(mut self, tool: &str, code: i32) -> Self {
        self.failing.push((tool.to_string(), code));
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: tempfile::tempdir().unwrap(),
            bin_dir: tempfile::tempdir().unwrap(),
            branch: self.branch.unwrap_or_else(|| "main".to_string()),
            failing: self.failing,
        };

        for tool in STUBBED_TOOLS {
            write_stub(env.bin_dir.path(), tool);
        }
        write_git_stub(env.bin_dir.path());

        if let Some(common) = self.common {
            env.write("build.common.properties.yml", &common);
        }
        if let Some(local) = self.local {
            env.write("build.local.properties.yml", &local);
        }
        if let Some(lock) = self.lock {
            env.write(".lock", &lock);
        }
        env
    }
}

fn write_executable(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

fn write_stub(dir: &Path, tool: &str) {
    let var = format!("PAP_FAIL_{}", tool.to_uppercase().replace('-', "_"));
    let script = format!(
        "#!/bin/sh\necho \"{tool} $*\" >> \"$PAP_TOOL_LOG\"\nexit ${{{var}:-0}}\n"
    );
    write_executable(&dir.join(tool), &script);
}

fn write_git_stub(dir: &Path) {
    let script = r#"#!/bin/sh
case "$*" in
  *--abbrev-ref*) echo "${PAP_TEST_BRANCH:-main}" ;;
  *--show-toplevel*)
    if [ -n "$PAP_TEST_TOPLEVEL_FAILS" ]; then exit 128; fi
    pwd ;;
  *) exit 1 ;;
esac
"#;
    write_executable(&dir.join("git"), script);
}
