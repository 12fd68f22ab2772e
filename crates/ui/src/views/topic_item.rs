use dioxus::prelude::*;

use study_core::model::{SessionDraft, Topic, total_minutes};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_session_items;

/// A single topic row: completion toggle, delete-with-confirm, and an
/// expandable study panel for logging sessions and reading history.
///
/// History is lazy. Nothing is fetched until the panel is first expanded,
/// so the total-minutes label reads over whatever has actually been loaded.
#[component]
pub fn TopicItem(topic: ReadOnlySignal<Topic>, on_changed: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let topic_service = ctx.topic_service();
    let session_service = ctx.session_service();

    let mut show_study_form = use_signal(|| false);
    let mut show_sessions = use_signal(|| false);
    let mut minutes = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut save_error = use_signal(|| None::<&'static str>);
    let mut confirm_delete = use_signal(|| false);

    let topic_service_for_delete = topic_service.clone();
    let session_service_for_resource = session_service.clone();
    let mut sessions = use_resource(move || {
        let sessions = session_service_for_resource.clone();
        let expanded = show_sessions();
        let topic_id = topic().id();
        async move {
            if !expanded {
                return Ok(Vec::new());
            }
            sessions
                .list_sessions(topic_id)
                .await
                .map_err(|err| ViewError::log("load study sessions", &err))
        }
    });

    let current = topic();
    let item_class = if current.is_completed() {
        "topic-item completed"
    } else {
        "topic-item"
    };

    rsx! {
        div { class: "{item_class}",
            div { class: "topic-header",
                div { class: "topic-title-section",
                    input {
                        r#type: "checkbox",
                        class: "topic-checkbox",
                        checked: current.is_completed(),
                        onchange: move |_| {
                            let topics = topic_service.clone();
                            spawn(async move {
                                match topics.toggle_completed(&topic()).await {
                                    Ok(()) => on_changed.call(()),
                                    // The checkbox keeps showing the last loaded
                                    // row; only the log records the failure.
                                    Err(err) => {
                                        tracing::error!(%err, "failed to toggle topic completion");
                                    }
                                }
                            });
                        },
                    }
                    span { class: "topic-title", "{current.title()}" }
                    if current.is_completed() {
                        span { class: "completed-badge", "Done" }
                    }
                }
                button {
                    class: "delete-topic-btn",
                    r#type: "button",
                    title: "Delete",
                    onclick: move |_| confirm_delete.set(true),
                    "✕"
                }
            }

            div { class: "topic-actions",
                button {
                    class: "action-btn study-btn",
                    r#type: "button",
                    onclick: move |_| {
                        let open = show_study_form();
                        show_study_form.set(!open);
                    },
                    if show_study_form() { "Cancel" } else { "+ Log Study" }
                }
                button {
                    class: "action-btn sessions-btn",
                    r#type: "button",
                    onclick: move |_| {
                        let open = show_sessions();
                        show_sessions.set(!open);
                    },
                    if show_sessions() { "Hide History" } else { "Show History" }
                }
            }

            if show_study_form() {
                div { class: "study-form",
                    div { class: "form-field",
                        label { "Minutes" }
                        input {
                            r#type: "number",
                            min: "1",
                            placeholder: "30",
                            value: "{minutes()}",
                            disabled: saving(),
                            oninput: move |evt| minutes.set(evt.value()),
                        }
                    }
                    div { class: "form-field",
                        label { "Notes (optional)" }
                        textarea {
                            rows: "2",
                            placeholder: "What did you study or learn...",
                            value: "{notes()}",
                            disabled: saving(),
                            oninput: move |evt| notes.set(evt.value()),
                        }
                    }
                    if let Some(message) = save_error() {
                        p { class: "form-error", "{message}" }
                    }
                    button {
                        class: "btn btn-primary submit-study-btn",
                        r#type: "button",
                        disabled: saving(),
                        onclick: move |_| {
                            // A parse failure or zero minutes is a silent no-op.
                            let Ok(parsed) = minutes().trim().parse::<u32>() else {
                                return;
                            };
                            let Ok(draft) = SessionDraft::new(parsed, notes()) else {
                                return;
                            };
                            let sessions_service = session_service.clone();
                            spawn(async move {
                                saving.set(true);
                                match sessions_service.log_session(topic().id(), draft).await {
                                    Ok(_) => {
                                        minutes.set(String::new());
                                        notes.set(String::new());
                                        save_error.set(None);
                                        show_study_form.set(false);
                                        // A closed history panel is not refreshed;
                                        // the new session shows on the next expand.
                                        if show_sessions() {
                                            sessions.restart();
                                        }
                                    }
                                    Err(err) => {
                                        tracing::error!(%err, "failed to log study session");
                                        save_error.set(Some("Could not save the study session."));
                                    }
                                }
                                saving.set(false);
                            });
                        },
                        if saving() { "Saving..." } else { "Save Session" }
                    }
                }
            }

            if show_sessions() {
                div { class: "sessions-section",
                    match view_state_from_resource(sessions) {
                        ViewState::Idle | ViewState::Loading => rsx! {
                            p { class: "no-sessions", "Loading history..." }
                        },
                        ViewState::Error(err) => rsx! {
                            p { class: "no-sessions", "{err.message()}" }
                        },
                        ViewState::Ready(history) => {
                            let total = total_minutes(&history);
                            let items = map_session_items(&history);
                            rsx! {
                                h4 {
                                    "Study History"
                                    if total > 0 {
                                        span { class: "total-time", " - Total: {total} minutes" }
                                    }
                                }
                                if items.is_empty() {
                                    p { class: "no-sessions", "No study sessions logged yet." }
                                } else {
                                    div { class: "sessions-list",
                                        for item in items {
                                            div { class: "session-item", key: "{item.id}",
                                                div { class: "session-info",
                                                    span { class: "session-duration", "{item.duration_label}" }
                                                    span { class: "session-date", "{item.studied_at_str}" }
                                                }
                                                if let Some(note) = item.notes.as_deref() {
                                                    p { class: "session-notes", "{note}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if confirm_delete() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| confirm_delete.set(false),
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Delete \"{current.title()}\"?" }
                        p { class: "modal-body", "Its study history goes with it." }
                        div { class: "modal-actions",
                            button {
                                class: "btn modal-cancel",
                                r#type: "button",
                                onclick: move |_| confirm_delete.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn modal-confirm",
                                r#type: "button",
                                onclick: move |_| {
                                    confirm_delete.set(false);
                                    let topics = topic_service_for_delete.clone();
                                    spawn(async move {
                                        match topics.delete_topic(topic().id()).await {
                                            Ok(()) => on_changed.call(()),
                                            // Log only; the row stays until a reload.
                                            Err(err) => {
                                                tracing::error!(%err, "failed to delete topic");
                                            }
                                        }
                                    });
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}
