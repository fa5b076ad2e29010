//! Callback registration surface for streaming chat.
//!
//! One canonical shape: handlers are registered by name through method
//! chaining. Per-event handlers (`on_token`, `on_contexts`, `on_qg_job`) may
//! fire repeatedly; terminal handlers (`on_complete`, `on_error`) are
//! consumed on first use so exactly one of the two can ever fire.
//! `on_followup_questions` is cloned into each poller task and fires at most
//! once per announced job, at an arbitrary time relative to stream
//! completion.

use super::types::Context;
use crate::errors::AskForgeError;
use std::sync::Arc;

type TokenHandler = Box<dyn FnMut(&str) + Send>;
type ContextsHandler = Box<dyn FnMut(Vec<Context>) + Send>;
type QgJobHandler = Box<dyn FnMut(&str, &str) + Send>;
type CompleteHandler = Box<dyn FnOnce() + Send>;
type ErrorHandler = Box<dyn FnOnce(AskForgeError) + Send>;
type FollowupHandler = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// Registered handlers for one streaming chat invocation.
///
/// Every handler is optional; unregistered events are silently dropped.
#[derive(Default)]
pub struct ChatCallbacks {
    token: Option<TokenHandler>,
    contexts: Option<ContextsHandler>,
    qg_job: Option<QgJobHandler>,
    complete: Option<CompleteHandler>,
    error: Option<ErrorHandler>,
    followup_questions: Option<FollowupHandler>,
}

impl ChatCallbacks {
    /// Create an empty callback set
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per incremental answer fragment
    pub fn on_token(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.token = Some(Box::new(f));
        self
    }

    /// Called when the retrieved evidence snippets arrive
    pub fn on_contexts(mut self, f: impl FnMut(Vec<Context>) + Send + 'static) -> Self {
        self.contexts = Some(Box::new(f));
        self
    }

    /// Called when a follow-up-question job is announced, with
    /// `(job_id, poll_url)`
    pub fn on_qg_job(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.qg_job = Some(Box::new(f));
        self
    }

    /// Called exactly once on normal completion
    pub fn on_complete(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    /// Called exactly once on terminal failure
    pub fn on_error(mut self, f: impl FnOnce(AskForgeError) + Send + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Called with the resolved follow-up questions of each announced job,
    /// possibly after the main stream has already completed
    pub fn on_followup_questions(
        mut self,
        f: impl Fn(Vec<String>) + Send + Sync + 'static,
    ) -> Self {
        self.followup_questions = Some(Arc::new(f));
        self
    }

    pub(crate) fn emit_token(&mut self, content: &str) {
        if let Some(f) = self.token.as_mut() {
            f(content);
        }
    }

    pub(crate) fn emit_contexts(&mut self, contexts: Vec<Context>) {
        if let Some(f) = self.contexts.as_mut() {
            f(contexts);
        }
    }

    pub(crate) fn emit_qg_job(&mut self, job_id: &str, poll_url: &str) {
        if let Some(f) = self.qg_job.as_mut() {
            f(job_id, poll_url);
        }
    }

    /// Fire the completion handler. Consumes it, so a second terminal
    /// outcome is a no-op.
    pub(crate) fn finish_ok(&mut self) {
        // Drop the error handler too: the terminal outcome is decided.
        self.error.take();
        if let Some(f) = self.complete.take() {
            f();
        }
    }

    /// Fire the error handler. Consumes it, so a second terminal outcome
    /// is a no-op.
    pub(crate) fn finish_err(&mut self, error: AskForgeError) {
        self.complete.take();
        if let Some(f) = self.error.take() {
            f(error);
        }
    }

    /// Handler clone for delivery from one poller task. Each announced job
    /// gets its own clone, so every job can deliver.
    pub(crate) fn followup_handler(&self) -> Option<FollowupHandler> {
        self.followup_questions.clone()
    }
}

impl std::fmt::Debug for ChatCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCallbacks")
            .field("token", &self.token.is_some())
            .field("contexts", &self.contexts.is_some())
            .field("qg_job", &self.qg_job.is_some())
            .field("complete", &self.complete.is_some())
            .field("error", &self.error.is_some())
            .field("followup_questions", &self.followup_questions.is_some())
            .finish()
    }
}
