//! In-memory port implementations shared by the application tests

use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::domain::entities::{LockRecord, LockState};
use crate::domain::ports::{
    AlwaysDecline, CommandSpec, Confirm, FixedBranch, FixedClock, HttpProbe, LockError,
    LockRepository, MessageLevel, ProbeError, ProcessError, ProcessOutput, ProcessRunner,
    RemoteTarget, TaskEvent, TaskEventSink,
};

use super::context::{Ports, TaskContext};

pub const NOW: i64 = 1_700_000_000;
pub const REPO: &str = "/srv/app/";

/// One recorded process invocation
#[derive(Debug, Clone)]
pub struct Call {
    pub spec: CommandSpec,
    pub remote: Option<RemoteTarget>,
}

impl Call {
    pub fn line(&self) -> String {
        self.spec.display_line()
    }
}

/// Records every invocation; commands containing a registered needle exit
/// with the registered code, everything else succeeds.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(String, i32)>>,
    unstartable: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn fail_on(&self, needle: &str, code: i32) {
        self.failures.lock().unwrap().push((needle.to_string(), code));
    }

    pub fn cannot_start(&self, program: &str) {
        self.unstartable.lock().unwrap().push(program.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(Call::line).collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }

    fn record(
        &self,
        spec: &CommandSpec,
        remote: Option<&RemoteTarget>,
    ) -> Result<ProcessOutput, ProcessError> {
        self.calls.lock().unwrap().push(Call {
            spec: spec.clone(),
            remote: remote.cloned(),
        });
        if self.unstartable.lock().unwrap().iter().any(|p| p == spec.program()) {
            return Err(ProcessError {
                program: spec.program().to_string(),
                message: "No such file or directory".to_string(),
            });
        }
        let line = spec.to_string();
        let code = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0);
        Ok(ProcessOutput::exit(code))
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        self.record(spec, None)
    }

    fn run_remote(
        &self,
        remote: &RemoteTarget,
        spec: &CommandSpec,
    ) -> Result<ProcessOutput, ProcessError> {
        self.record(spec, Some(remote))
    }
}

/// Lock repository backed by memory
pub struct FakeLocks {
    state: Mutex<LockState>,
    saves: Mutex<Vec<LockRecord>>,
}

impl FakeLocks {
    pub fn new(state: LockState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn saves(&self) -> Vec<LockRecord> {
        self.saves.lock().unwrap().clone()
    }
}

impl LockRepository for FakeLocks {
    fn load(&self) -> LockState {
        self.state.lock().unwrap().clone()
    }

    fn save(&self, record: &LockRecord) -> Result<(), LockError> {
        self.saves.lock().unwrap().push(record.clone());
        *self.state.lock().unwrap() = LockState::Present(record.clone());
        Ok(())
    }
}

/// HTTP probe answering with a fixed result
pub struct FakeHttp {
    answer: Result<u16, ProbeError>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn status(code: u16) -> Self {
        let answer = if code < 400 {
            Ok(code)
        } else {
            Err(ProbeError::Status(code))
        };
        Self {
            answer,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            answer: Err(ProbeError::Transport("connection refused".to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpProbe for FakeHttp {
    fn get(&self, url: &str) -> Result<u16, ProbeError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.answer.clone()
    }
}

/// Collects every event
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TaskEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self, level: MessageLevel) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TaskEvent::Message { level: l, text } if l == level => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.events().iter().any(|e| match e {
            TaskEvent::Message { text, .. } => text.contains(needle),
            _ => false,
        })
    }
}

impl TaskEventSink for RecordingSink {
    fn on_event(&self, event: TaskEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Test rig: a context over fakes plus handles to inspect them
pub struct Rig {
    pub runner: Arc<FakeRunner>,
    pub locks: Arc<FakeLocks>,
    pub http: Arc<FakeHttp>,
    pub sink: Arc<RecordingSink>,
    pub ctx: TaskContext,
}

pub struct RigBuilder {
    yaml: String,
    lock: LockState,
    branch: String,
    http: FakeHttp,
    confirm: Arc<dyn Confirm>,
    runner: FakeRunner,
}

impl RigBuilder {
    pub fn lock(mut self, state: LockState) -> Self {
        self.lock = state;
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    pub fn http(mut self, http: FakeHttp) -> Self {
        self.http = http;
        self
    }

    pub fn confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Arc::new(confirm);
        self
    }

    pub fn fail_on(self, needle: &str, code: i32) -> Self {
        self.runner.fail_on(needle, code);
        self
    }

    pub fn build(self) -> Rig {
        let config = Config::from_yaml(&self.yaml, REPO).unwrap();
        let runner = Arc::new(self.runner);
        let locks = Arc::new(FakeLocks::new(self.lock));
        let http = Arc::new(self.http);
        let sink = Arc::new(RecordingSink::default());
        let ports = Ports {
            runner: runner.clone(),
            confirm: self.confirm,
            locks: locks.clone(),
            http: http.clone(),
            branch: Arc::new(FixedBranch(self.branch)),
            clock: Arc::new(FixedClock(NOW)),
            events: sink.clone(),
        };
        Rig {
            runner,
            locks,
            http,
            sink,
            ctx: TaskContext::new(config, ports),
        }
    }
}

pub fn rig(yaml: &str) -> RigBuilder {
    RigBuilder {
        yaml: yaml.to_string(),
        lock: LockState::Absent,
        branch: "main".to_string(),
        http: FakeHttp::status(200),
        confirm: Arc::new(AlwaysDecline),
        runner: FakeRunner::default(),
    }
}

/// A project exercising most settings
pub const PROJECT: &str = r#"
settings:
  lint:
    scripts: [vendor/bin/phpcs]
    fix:
      scripts: [vendor/bin/phpcbf]
  test:
    unit:
      scripts: [vendor/bin/phpunit]
    integration:
      scripts: [vendor/bin/behat]
  assets:
    scripts: [npm run build]
  composer:
    phar: composer.phar
    working-directory: app/
  prepare-sync-paths:
    - source: web/
      target: build/web/
      exclude: [node_modules]
  sync-paths:
    - source: build/web/
      target: web/
    - source: app/
      target: app/
      exclude: [.env]
stages:
  local:
    working-directory: /var/www/local/
    origin: http://localhost
  live:
    host: example.com
    user: deploy
    port: 2222
    working-directory: /var/www/live/
    origin: https://example.com
    rsync:
      options: -az --no-perms
    lock-branches: [main]
    test:
      deny-groups: [destructive]
"#;
