//! Terminal-free runtime for scripted action streams.
//!
//! Each action goes through the same reducer as the dashboard. Effects run
//! inline and to completion, in order, before the next action is read.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use rdash_core::auth::AdminAuthority;
use rdash_core::review::MockReviewClient;
use tokio_util::sync::CancellationToken;

use super::handlers;
use crate::dashboard::{self, DashboardState};
use crate::effects::UiEffect;
use crate::events::UiEvent;

pub struct HeadlessRuntime {
    pub state: DashboardState,
    authority: AdminAuthority,
    client: MockReviewClient,
    /// Actions rejected as unknown or malformed.
    pub skipped: usize,
}

impl HeadlessRuntime {
    pub fn new(authority: AdminAuthority, client: MockReviewClient) -> Self {
        Self {
            state: DashboardState::default(),
            authority,
            client,
            skipped: 0,
        }
    }

    /// Applies one raw action and runs everything it triggers.
    pub async fn dispatch(&mut self, value: serde_json::Value) {
        let Some(effects) = dashboard::dispatch_raw(&mut self.state, value) else {
            self.skipped += 1;
            return;
        };
        self.run_effects(effects).await;
    }

    async fn run_effects(&mut self, effects: Vec<UiEffect>) {
        let mut queue: VecDeque<UiEffect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                UiEffect::VerifyAdmin { password, .. } => {
                    match handlers::verify_admin(&self.authority, &password).await {
                        UiEvent::AdminVerified(verdict) => {
                            dashboard::apply_admin_verdict(&mut self.state, verdict)
                        }
                        _ => vec![],
                    }
                }
                UiEffect::StartReview { request, .. } => {
                    let cancel = CancellationToken::new();
                    if let UiEvent::ReviewFinished(result) =
                        handlers::run_review(&self.client, &request, &cancel).await
                    {
                        dashboard::apply_review_result(&mut self.state, result);
                    }
                    vec![]
                }
                UiEffect::SubmitRequest { form } => {
                    tracing::info!(project = %form.project_name, "request submitted");
                    vec![]
                }
                UiEffect::Notify { message } => {
                    tracing::info!(%message, "notice");
                    vec![]
                }
                UiEffect::Quit | UiEffect::CancelTask { .. } | UiEffect::CopyToClipboard { .. } => {
                    vec![]
                }
            };
            queue.extend(follow_up);
        }
    }

    /// Runs a JSON-lines script: one action per line. Blank lines and lines
    /// starting with `#` are ignored.
    ///
    /// # Errors
    /// Returns an error naming the line number for lines that are not JSON.
    pub async fn run_script(&mut self, script: &str) -> Result<()> {
        for (index, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(line)
                .with_context(|| format!("line {}: not valid JSON", index + 1))?;
            self.dispatch(value).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rdash_core::auth::hash_password;
    use rdash_core::seed;
    use serde_json::json;

    use super::*;
    use crate::tabs::Tab;

    fn runtime() -> HeadlessRuntime {
        HeadlessRuntime::new(
            AdminAuthority::new(hash_password("demodemo")),
            MockReviewClient::new(Duration::ZERO, seed::rng_from(Some(4))),
        )
    }

    #[tokio::test]
    async fn test_login_script_reaches_admin_tabs() {
        let mut rt = runtime();
        rt.run_script(
            r#"
            # sign in
            {"type": "TOGGLE_ADMIN_MODAL"}
            {"type": "SET_ADMIN_PASSWORD", "payload": "demodemo"}
            {"type": "LOGIN"}
            "#,
        )
        .await
        .unwrap();
        assert!(rt.state.is_admin);
        assert!(!rt.state.show_admin_modal);
        assert_eq!(rt.state.selected_tab, Tab::RequestManagement);
        assert!(rt.state.admin_password.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_user_role() {
        let mut rt = runtime();
        rt.dispatch(json!({"type": "SET_ADMIN_PASSWORD", "payload": "guess"}))
            .await;
        rt.dispatch(json!({"type": "LOGIN"})).await;
        assert!(!rt.state.is_admin);
        assert_eq!(rt.state.admin_error, "Incorrect password.");
        assert!(!rt.state.authenticating);
    }

    #[tokio::test]
    async fn test_unknown_actions_are_counted() {
        let mut rt = runtime();
        rt.dispatch(json!({"type": "LAUNCH_ROCKET"})).await;
        rt.dispatch(json!({"type": "SET_PROMPT", "payload": 5})).await;
        rt.dispatch(json!({"type": "SET_PROMPT", "payload": "ok"})).await;
        assert_eq!(rt.skipped, 2);
        assert_eq!(rt.state.prompt, "ok");
    }

    #[tokio::test]
    async fn test_bad_json_names_line() {
        let mut rt = runtime();
        let err = rt
            .run_script("{\"type\": \"TOGGLE_REFERENCE\"}\nnot json\n")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(rt.state.show_reference);
    }
}
