//! Shared dashboard store.
//!
//! `DashboardState` holds every value more than one panel reads: the role,
//! the selected tab, the admin modal, the prompt-test fields, the request
//! draft and the token editor. [`reduce`] is the only function that writes
//! it. Asynchronous results (admin verdicts, review outcomes) come back as
//! events and are folded in by [`apply_admin_verdict`] and
//! [`apply_review_result`].

use rdash_core::auth::{AdminGrant, AuthError};
use rdash_core::request::{RequestForm, RequestFormPatch};
use rdash_core::review::ReviewError;
use rdash_core::token::{Token, TokenDraft, TokenDraftPatch};
use serde::{Deserialize, Serialize};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::tabs::{self, Tab};

pub const SUBMITTED_MESSAGE: &str =
    "Request submitted. An administrator will review it shortly.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub is_admin: bool,
    /// An admin verification is in flight.
    pub authenticating: bool,
    pub admin_session: Option<AdminGrant>,
    pub selected_tab: Tab,
    pub admin_password: String,
    pub admin_error: String,
    pub show_admin_modal: bool,
    pub prompt: String,
    pub pull_request_url: String,
    pub review_result: String,
    pub error: String,
    pub show_reference: bool,
    pub request_form: RequestForm,
    pub editing_token: Option<Token>,
    pub show_side_panel: bool,
    pub token_form: TokenDraft,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            is_admin: false,
            authenticating: false,
            admin_session: None,
            selected_tab: tabs::first_tab(false),
            admin_password: String::new(),
            admin_error: String::new(),
            show_admin_modal: false,
            prompt: String::new(),
            pull_request_url: String::new(),
            review_result: String::new(),
            error: String::new(),
            show_reference: false,
            request_form: RequestForm::default(),
            editing_token: None,
            show_side_panel: false,
            token_form: TokenDraft::default(),
        }
    }
}

impl DashboardState {
    /// The panel to render, if the selected tab belongs to the current role.
    pub fn content(&self) -> Option<Tab> {
        tabs::resolve_content(self.is_admin, self.selected_tab)
    }
}

/// Everything that can change the shared store.
///
/// Wire form: `{"type": "SET_PROMPT", "payload": "..."}`. Toggles and
/// commands carry no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetAdmin(bool),
    SetAdminPassword(String),
    SetPrompt(String),
    SetPullRequestUrl(String),
    SetReviewResult(String),
    SetError(String),
    ToggleReference,
    UpdateRequestForm(RequestFormPatch),
    SetSelectedTab(Tab),
    SetEditingToken(Option<Token>),
    ToggleSidePanel,
    UpdateForm(TokenDraftPatch),
    ToggleAdminModal,
    SetAdminError(String),
    /// Submit `admin_password` to the admin authority.
    Login,
    LeaveAdmin,
    SubmitRequestForm,
}

impl Action {
    /// Parses a raw action. Unknown types and malformed payloads yield `None`.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Applies `action` to `state`, returning the effects it requests.
pub fn reduce(state: &mut DashboardState, action: Action) -> Vec<UiEffect> {
    match action {
        Action::SetAdmin(is_admin) => state.is_admin = is_admin,
        Action::SetAdminPassword(password) => state.admin_password = password,
        Action::SetPrompt(prompt) => state.prompt = prompt,
        Action::SetPullRequestUrl(url) => state.pull_request_url = url,
        Action::SetReviewResult(result) => state.review_result = result,
        Action::SetError(error) => state.error = error,
        Action::ToggleReference => state.show_reference = !state.show_reference,
        Action::UpdateRequestForm(patch) => state.request_form.apply(patch),
        Action::SetSelectedTab(tab) => return select_tab(state, tab),
        Action::SetEditingToken(token) => state.editing_token = token,
        Action::ToggleSidePanel => state.show_side_panel = !state.show_side_panel,
        Action::UpdateForm(patch) => state.token_form.apply(patch),
        Action::ToggleAdminModal => state.show_admin_modal = !state.show_admin_modal,
        Action::SetAdminError(error) => state.admin_error = error,
        Action::Login => {
            if state.authenticating {
                return vec![];
            }
            state.authenticating = true;
            return vec![UiEffect::VerifyAdmin {
                task: None,
                password: state.admin_password.clone(),
            }];
        }
        Action::LeaveAdmin => {
            state.is_admin = false;
            state.admin_session = None;
            return select_tab(state, tabs::first_tab(false));
        }
        Action::SubmitRequestForm => {
            let form = std::mem::take(&mut state.request_form);
            return vec![
                UiEffect::SubmitRequest { form },
                UiEffect::Notify {
                    message: SUBMITTED_MESSAGE.to_string(),
                },
            ];
        }
    }
    vec![]
}

/// Parses and applies a raw action. Returns `None` when it was skipped.
pub fn dispatch_raw(state: &mut DashboardState, value: serde_json::Value) -> Option<Vec<UiEffect>> {
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<missing>")
        .to_string();
    match Action::from_value(value) {
        Some(action) => Some(reduce(state, action)),
        None => {
            tracing::warn!(action = %kind, "skipping unknown or malformed action");
            None
        }
    }
}

/// Folds the admin authority's answer into the store.
pub fn apply_admin_verdict(
    state: &mut DashboardState,
    verdict: Result<AdminGrant, AuthError>,
) -> Vec<UiEffect> {
    state.authenticating = false;
    match verdict {
        Ok(grant) => {
            state.is_admin = true;
            state.admin_session = Some(grant);
            state.show_admin_modal = false;
            state.admin_password.clear();
            state.admin_error.clear();
            select_tab(state, tabs::first_tab(true))
        }
        Err(err) => {
            state.admin_error = err.to_string();
            vec![]
        }
    }
}

/// Folds a finished review into the store. Cancelled reviews leave no trace.
pub fn apply_review_result(state: &mut DashboardState, result: Result<String, ReviewError>) {
    match result {
        Ok(text) => state.review_result = text,
        Err(ReviewError::Cancelled) => {}
        Err(err) => state.error = err.to_string(),
    }
}

/// Moves to `tab`; leaving the prompt-test tab cancels its review.
fn select_tab(state: &mut DashboardState, tab: Tab) -> Vec<UiEffect> {
    let leaving_review = state.selected_tab == Tab::PromptTest && tab != Tab::PromptTest;
    state.selected_tab = tab;
    if leaving_review {
        vec![UiEffect::CancelTask {
            kind: TaskKind::Review,
            token: None,
        }]
    } else {
        vec![]
    }
}
