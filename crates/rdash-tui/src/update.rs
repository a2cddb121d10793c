//! Dashboard reducer (update function).
//!
//! The runtime calls `update(app, event)` and executes the returned effects.
//! Shared-store changes go through [`dashboard::reduce`]; panel data changes
//! go through panel methods and overlay mutations. Effects that only touch
//! local state (`SubmitRequest`, `Notify`) are settled here. Task effects get
//! their id and cancellation token here and are tracked from that moment on,
//! before the runtime has spawned anything.

use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskKind, TaskStarted};
use crate::dashboard::{self, Action};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::PanelContext;
use crate::overlays::{Overlay, OverlayRequest, OverlayTransition, OverlayUpdate, admin_login};
use crate::state::{AppState, Toast, TuiState};
use crate::tabs;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            if app.tui.toast.as_ref().is_some_and(Toast::is_expired) {
                app.tui.toast = None;
            }
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Action(action) => dashboard::reduce(&mut app.tui.dashboard, action),
        UiEvent::AdminVerified(verdict) => {
            dashboard::apply_admin_verdict(&mut app.tui.dashboard, verdict)
        }
        UiEvent::ReviewFinished(result) => {
            dashboard::apply_review_result(&mut app.tui.dashboard, result);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if !app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                return vec![];
            }
            return update(app, *completed.result);
        }
        UiEvent::ClipboardCopied(result) => {
            app.tui.toast = Some(match result {
                Ok(()) => Toast::info("Prompt copied to clipboard"),
                Err(err) => Toast::error(format!("Copy failed: {err}")),
            });
            vec![]
        }
    };
    settle_effects(&mut app.tui, effects)
}

/// Applies local effects and prepares the rest for the runtime.
fn settle_effects(tui: &mut TuiState, effects: Vec<UiEffect>) -> Vec<UiEffect> {
    let mut out = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            UiEffect::SubmitRequest { form } => {
                tui.panels.record_submission(&form, Utc::now());
            }
            UiEffect::Notify { message } => tui.toast = Some(Toast::info(message)),
            UiEffect::VerifyAdmin { task: None, password } => out.push(UiEffect::VerifyAdmin {
                task: Some(track(tui, TaskKind::AdminLogin, None)),
                password,
            }),
            UiEffect::StartReview { task: None, request } => out.push(UiEffect::StartReview {
                task: Some(track(tui, TaskKind::Review, Some(CancellationToken::new()))),
                request,
            }),
            UiEffect::CancelTask { kind, token: None } => {
                let state = tui.tasks.state_mut(kind);
                if !state.is_running() {
                    continue;
                }
                // Forget the task so its completion is dropped as stale.
                let token = state.abandon();
                if kind == TaskKind::AdminLogin {
                    tui.dashboard.authenticating = false;
                }
                out.push(UiEffect::CancelTask { kind, token });
            }
            other => out.push(other),
        }
    }
    out
}

/// Assigns the next id and makes it the active task of `kind`.
fn track(tui: &mut TuiState, kind: TaskKind, cancel: Option<CancellationToken>) -> TaskStarted {
    let started = TaskStarted {
        id: tui.task_seq.next_id(),
        cancel,
    };
    tui.tasks.state_mut(kind).on_started(&started);
    started
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        return apply_overlay_update(app, update);
    }

    if app.tui.dashboard.show_admin_modal {
        let actions = admin_login::handle_key(&app.tui.dashboard, key);
        return reduce_all(&mut app.tui, actions);
    }

    if let Some(effects) = handle_global_key(&mut app.tui, key) {
        return effects;
    }

    let Some(tab) = app.tui.dashboard.content() else {
        return vec![];
    };
    let tui = &mut app.tui;
    let ctx = PanelContext {
        dashboard: &tui.dashboard,
        tasks: &tui.tasks,
        spinner_frame: tui.spinner_frame,
    };
    let update = tui.panels.handle_key(tab, &ctx, key);

    let mut effects = reduce_all(tui, update.actions);
    effects.extend(update.effects);
    if let Some(request) = update.overlay {
        open_overlay(app, request);
    }
    effects
}

/// Role and tab switching. Returns `None` when the key is not global.
fn handle_global_key(tui: &mut TuiState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let visible = tabs::visible_tabs(tui.dashboard.is_admin);

    let index = match key.code {
        KeyCode::Char('a') if ctrl => {
            let action = if tui.dashboard.is_admin {
                Action::LeaveAdmin
            } else {
                Action::ToggleAdminModal
            };
            return Some(reduce_all(tui, vec![action]));
        }
        KeyCode::F(n @ 1..=4) => usize::from(n - 1),
        KeyCode::Char(c @ '1'..='4') if alt => c as usize - '1' as usize,
        KeyCode::Right | KeyCode::Left if ctrl => {
            let current = visible
                .iter()
                .position(|t| *t == tui.dashboard.selected_tab)
                .unwrap_or(0);
            let len = visible.len();
            if key.code == KeyCode::Right {
                (current + 1) % len
            } else {
                (current + len - 1) % len
            }
        }
        _ => return None,
    };
    let tab = visible.get(index)?;
    Some(reduce_all(tui, vec![Action::SetSelectedTab(*tab)]))
}

fn reduce_all(tui: &mut TuiState, actions: Vec<Action>) -> Vec<UiEffect> {
    actions
        .into_iter()
        .flat_map(|action| dashboard::reduce(&mut tui.dashboard, action))
        .collect()
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    let now = Utc::now();
    for mutation in update.mutations {
        app.tui.panels.apply_mutation(mutation, now);
    }
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
        OverlayTransition::Open(request) => open_overlay(app, request),
    }
    update.effects
}

fn open_overlay(app: &mut AppState, request: OverlayRequest) {
    app.overlay = Some(Overlay::open(request));
}
