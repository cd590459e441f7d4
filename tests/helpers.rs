//! Shared test backends for the integration scenarios.

#![allow(dead_code)]

use async_trait::async_trait;
use mailsmith::backend::{BackendError, StageBackend};
use mailsmith::core::CLEAN_OUTPUT_DIRECTIVE;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Everything one backend call received.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub role: String,
    pub instruction: String,
    pub reference: Option<String>,
}

/// Scripted backend that replays canned responses in call order and
/// records every invocation for later assertions.
pub struct MockBackend {
    responses: Vec<String>,
    fail_at: Option<usize>,
    calls: AtomicUsize,
    invocations: Mutex<Vec<Invocation>>,
}

impl MockBackend {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: responses.into_iter().map(String::from).collect(),
            fail_at: None,
            calls: AtomicUsize::new(0),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Fail the nth call (zero-based) with an injected backend error.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StageBackend for MockBackend {
    async fn invoke(
        &self,
        role: &str,
        instruction: &str,
        reference: Option<&str>,
    ) -> Result<String, BackendError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.invocations.lock().unwrap().push(Invocation {
            role: role.to_string(),
            instruction: instruction.to_string(),
            reference: reference.map(String::from),
        });

        if self.fail_at == Some(index) {
            return Err(BackendError::Api("injected failure".to_string()));
        }

        // Wrap around so repeat runs over the same pipeline replay the
        // same script.
        Ok(self.responses[index % self.responses.len()].clone())
    }
}

/// Backend that emits fenced markdown unless the instruction carries the
/// plain-text output directive. Exercises that the contract reaches the
/// stages that produce reader-facing text.
pub struct MarkerProbe;

#[async_trait]
impl StageBackend for MarkerProbe {
    async fn invoke(
        &self,
        _role: &str,
        instruction: &str,
        _reference: Option<&str>,
    ) -> Result<String, BackendError> {
        if instruction.contains(CLEAN_OUTPUT_DIRECTIVE) {
            Ok("Dear Jordan,\n\nI am writing to apply.\n\nBest regards".to_string())
        } else {
            Ok("```\ninternal notes\n```".to_string())
        }
    }
}

/// A plausible five-stage script, one response per stage.
pub fn stage_script() -> Vec<&'static str> {
    vec![
        "Acme builds warehouse robotics and raised a Series C in March.",
        "Acme values hands-on prototyping and ships ML models to the edge.",
        "Candidate's Rust and embedded ML work matches Acme's edge stack.",
        "Dear Jordan,\n\nI would love to intern at Acme.\n\nBest regards",
        "Dear Jordan,\n\nI would love to intern at Acme.\n\nBest regards\nTest Candidate",
    ]
}

pub fn write_resume(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("resume.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Test Candidate").unwrap();
    writeln!(file, "Skills: Rust, Python, embedded ML").unwrap();
    path
}
