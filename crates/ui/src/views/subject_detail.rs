use dioxus::prelude::*;

use study_core::model::{Progress, Subject, Topic};

use crate::context::AppContext;
use crate::views::{
    TopicForm, TopicList, ViewError, ViewState, view_state_from_resource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeleteState {
    Idle,
    Deleting,
    Error(ViewError),
}

/// Detail pane for the selected subject: loads its topics, derives the
/// progress bar, hosts the topic form/list, and offers subject deletion
/// behind a confirm modal.
#[component]
pub fn SubjectDetail(subject: ReadOnlySignal<Subject>, on_deleted: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let subject_service = ctx.subject_service();
    let topic_service = ctx.topic_service();

    let mut topics = use_resource(move || {
        let topics = topic_service.clone();
        // Reading the subject signal keys the resource to the selection;
        // switching subjects reloads the collection.
        let subject_id = subject().id();
        async move {
            topics
                .list_topics(subject_id)
                .await
                .map_err(|err| ViewError::log("load topics", &err))
        }
    });

    let mut show_delete = use_signal(|| false);
    let mut delete_state = use_signal(|| DeleteState::Idle);

    let state = view_state_from_resource(topics);
    let loaded: Vec<Topic> = match &state {
        ViewState::Ready(data) => data.clone(),
        _ => Vec::new(),
    };
    let progress = Progress::of_topics(&loaded);
    let percent = progress.percent();
    let current = subject();

    rsx! {
        div { class: "subject-detail",
            div { class: "subject-header",
                div {
                    h1 { "{current.title()}" }
                    if let Some(description) = current.description() {
                        p { class: "subject-description", "{description}" }
                    }
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| {
                        delete_state.set(DeleteState::Idle);
                        show_delete.set(true);
                    },
                    "Delete Subject"
                }
            }

            div { class: "progress-section",
                div { class: "progress-info",
                    span { "Progress: {progress.completed()} of {progress.total()} topics completed" }
                    span { class: "progress-percentage", "{percent}%" }
                }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {percent}%" }
                }
            }

            TopicForm {
                subject_id: current.id(),
                on_created: move |_| topics.restart(),
            }

            match state {
                ViewState::Idle => rsx! {
                    p { class: "loading-topics", "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "loading-topics", "Loading topics..." }
                },
                ViewState::Ready(data) => rsx! {
                    TopicList {
                        topics: data,
                        on_changed: move |_| topics.restart(),
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "loading-topics", "{err.message()}" }
                },
            }

            if show_delete() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| show_delete.set(false),
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Delete \"{current.title()}\"?" }
                        p { class: "modal-body",
                            "This removes the subject along with all of its topics and study history."
                        }
                        if let DeleteState::Error(err) = delete_state() {
                            p { class: "modal-error", "{err.message()}" }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn modal-cancel",
                                r#type: "button",
                                onclick: move |_| show_delete.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn modal-confirm",
                                r#type: "button",
                                disabled: delete_state() == DeleteState::Deleting,
                                onclick: move |_| {
                                    let subjects = subject_service.clone();
                                    spawn(async move {
                                        delete_state.set(DeleteState::Deleting);
                                        match subjects.delete_subject(subject().id()).await {
                                            Ok(()) => {
                                                delete_state.set(DeleteState::Idle);
                                                show_delete.set(false);
                                                on_deleted.call(());
                                            }
                                            Err(err) => {
                                                // Selection and list stay stale on failure.
                                                delete_state.set(DeleteState::Error(
                                                    ViewError::log("delete subject", &err),
                                                ));
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
