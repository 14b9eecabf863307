use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::ai::classifier::Classifier;
use crate::ai::prompts::ClassifierPrompt;

/// What a [`ScriptedClassifier`] does when called.
#[derive(Clone, Debug)]
pub enum Script {
    Reply(String),
    Fail(String),
    Hang(Duration),
}

/// In-memory classifier that replays a fixed script and counts calls.
pub struct ScriptedClassifier {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn classify(&self, _prompt: &ClassifierPrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(err) => Err(anyhow!(err.clone())),
            Script::Hang(d) => {
                tokio::time::sleep(*d).await;
                Err(anyhow!("classifier hung"))
            }
        }
    }
}
