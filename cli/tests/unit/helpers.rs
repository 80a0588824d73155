//! Shared test helpers: a scripted `CommandRunner`, a scripted selector and
//! simctl listing builders.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use simdrive_cli::application::ports::{
    CommandRunner, ProgressReporter, SelectOption, TargetSelector,
};
use simdrive_cli::domain::{AppLayout, AppSpec, BootPolicy};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── simctl listings ──────────────────────────────────────────────────────────

/// One simulator in a scripted listing: `(udid, name, state)`.
pub type Sim<'a> = (&'a str, &'a str, &'a str);

/// Render a `simctl list devices --json` document for the given iOS runtimes.
pub fn listing(runtimes: &[(&str, &[Sim<'_>])]) -> String {
    let mut devices = serde_json::Map::new();
    for (version, sims) in runtimes {
        let key = format!(
            "com.apple.CoreSimulator.SimRuntime.iOS-{}",
            version.replace('.', "-")
        );
        let entries: Vec<serde_json::Value> = sims
            .iter()
            .map(|(udid, name, state)| {
                serde_json::json!({
                    "udid": udid,
                    "name": name,
                    "state": state,
                    "isAvailable": true,
                })
            })
            .collect();
        devices.insert(key, serde_json::Value::Array(entries));
    }
    serde_json::json!({ "devices": devices }).to_string()
}

/// Single runtime `13.0` holding one simulator in `state`.
pub fn single_device(state: &str) -> String {
    listing(&[("13.0", &[("UDID-1", "iPhone 11", state)])])
}

// ── Scripted runner ──────────────────────────────────────────────────────────

/// Answers every command from per-action overrides first. Without one,
/// `simctl list` is served from a queue of listings (the last one repeats)
/// and anything else succeeds with empty output.
///
/// Actions are keyed as `"simctl <verb>"`, `"open"` or `"xcodebuild"`.
pub struct ScriptedRunner {
    listings: Mutex<VecDeque<String>>,
    overrides: Mutex<HashMap<String, Output>>,
    unspawnable: Mutex<Vec<String>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new(listing: impl Into<String>) -> Self {
        Self::with_listings(vec![listing.into()])
    }

    /// Successive `simctl list` answers, e.g. to simulate a boot in progress.
    pub fn with_listings(listings: Vec<String>) -> Self {
        Self {
            listings: Mutex::new(listings.into()),
            overrides: Mutex::new(HashMap::new()),
            unspawnable: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the output for one action.
    pub fn on(self, action: &str, output: Output) -> Self {
        self.overrides
            .lock()
            .expect("lock")
            .insert(action.to_string(), output);
        self
    }

    /// Make spawning the given action fail outright.
    pub fn unspawnable(self, action: &str) -> Self {
        self.unspawnable
            .lock()
            .expect("lock")
            .push(action.to_string());
        self
    }

    /// Full argv (program first) of every command, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock").clone()
    }

    /// Action keys of every non-listing command, in order.
    pub fn actions(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|argv| action_key(argv))
            .filter(|key| key != "simctl list")
            .collect()
    }

    /// How many times the catalog was queried.
    pub fn list_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|argv| action_key(argv) == "simctl list")
            .count()
    }

    /// Argv of the first command with this action key.
    pub fn call_for(&self, action: &str) -> Option<Vec<String>> {
        self.calls()
            .into_iter()
            .find(|argv| action_key(argv) == action)
    }

    fn record(&self, program: &str, args: &[&str]) -> String {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|a| (*a).to_string()));
        let key = action_key(&argv);
        self.calls.lock().expect("lock").push(argv);
        key
    }

    fn respond(&self, key: &str) -> Result<Output> {
        if self.unspawnable.lock().expect("lock").iter().any(|a| a == key) {
            anyhow::bail!("failed to spawn {key}: No such file or directory");
        }
        if let Some(output) = self.overrides.lock().expect("lock").get(key) {
            return Ok(output.clone());
        }
        if key != "simctl list" {
            return Ok(ok_output(b""));
        }
        let mut queue = self.listings.lock().expect("lock");
        let body = if queue.len() > 1 {
            queue.pop_front().unwrap_or_default()
        } else {
            queue.front().cloned().unwrap_or_default()
        };
        Ok(ok_output(body.as_bytes()))
    }
}

fn action_key(argv: &[String]) -> String {
    match argv.first().map(String::as_str) {
        Some("xcrun") => format!(
            "simctl {}",
            argv.get(2).map(String::as_str).unwrap_or_default()
        ),
        Some(program) => program.to_string(),
        None => String::new(),
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let key = self.record(program, args);
        self.respond(&key)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        let key = self.record(program, args);
        self.respond(&key)
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        let key = self.record(program, args);
        self.respond(&key).map(|output| output.status)
    }
}

// ── Scripted selector ────────────────────────────────────────────────────────

/// Answers prompts from a queue of keys and records what it was offered.
pub struct ScriptedSelector {
    answers: RefCell<VecDeque<String>>,
    offered: RefCell<Vec<(String, Vec<SelectOption>)>>,
    calls: Cell<usize>,
}

impl ScriptedSelector {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| (*a).to_string()).collect()),
            offered: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    /// A selector that must never be consulted.
    pub fn silent() -> Self {
        Self::answering(&[])
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.offered.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn offered(&self) -> Vec<(String, Vec<SelectOption>)> {
        self.offered.borrow().clone()
    }
}

impl TargetSelector for ScriptedSelector {
    fn select_one(&self, prompt: &str, options: &[SelectOption]) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.offered
            .borrow_mut()
            .push((prompt.to_string(), options.to_vec()));
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {prompt}"))
    }
}

/// Always picks the first option offered, counting prompts.
pub struct FirstOptionSelector {
    pub calls: Cell<usize>,
}

impl FirstOptionSelector {
    pub fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl TargetSelector for FirstOptionSelector {
    fn select_one(&self, _prompt: &str, options: &[SelectOption]) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        options
            .first()
            .map(|o| o.key.clone())
            .ok_or_else(|| anyhow::anyhow!("no options"))
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

/// Records every progress message.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.messages.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.messages.borrow_mut().push(format!("success: {message}"));
    }
}

// ── App fixtures ─────────────────────────────────────────────────────────────

pub fn first_app() -> AppSpec {
    AppSpec {
        formal_name: "First App".to_string(),
        name: "first_app".to_string(),
        bundle: "com.example".to_string(),
    }
}

pub fn first_app_layout() -> AppLayout {
    AppLayout::new(std::path::Path::new("iOS"), &first_app())
}

/// Millisecond polling so wait loops finish quickly.
pub fn fast_policy(timeout: Option<Duration>) -> BootPolicy {
    BootPolicy {
        poll_interval: Duration::from_millis(1),
        timeout,
    }
}
