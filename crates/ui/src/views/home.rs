use dioxus::prelude::*;

use study_core::model::Subject;

use crate::context::AppContext;
use crate::views::{
    SubjectDetail, SubjectForm, SubjectList, ViewError, ViewState, view_state_from_resource,
};

/// Root coordinator: owns the subject collection resource and the selection
/// signal, and wires create/delete callbacks back to full reloads.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let subject_service = ctx.subject_service();
    let mut selected = use_signal(|| None::<Subject>);

    let mut subjects = use_resource(move || {
        let subjects = subject_service.clone();
        async move {
            subjects
                .list_subjects()
                .await
                .map_err(|err| ViewError::log("load subjects", &err))
        }
    });

    let state = view_state_from_resource(subjects);

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Study Tracker" }
                p { "Organize your studies and track your progress" }
            }

            div { class: "app-content",
                aside { class: "sidebar",
                    SubjectForm { on_created: move |_| subjects.restart() }
                    match state {
                        ViewState::Idle => rsx! {
                            p { class: "loading", "Idle" }
                        },
                        ViewState::Loading => rsx! {
                            p { class: "loading", "Loading..." }
                        },
                        ViewState::Ready(data) => rsx! {
                            SubjectList {
                                subjects: data,
                                selected_id: selected().map(|subject| subject.id()),
                                on_select: move |subject| selected.set(Some(subject)),
                            }
                        },
                        ViewState::Error(err) => rsx! {
                            p { class: "loading", "{err.message()}" }
                        },
                    }
                }

                main { class: "main-content",
                    if let Some(subject) = selected() {
                        SubjectDetail {
                            subject,
                            on_deleted: move |_| {
                                selected.set(None);
                                subjects.restart();
                            },
                        }
                    } else {
                        div { class: "empty-state",
                            h2 { "Welcome!" }
                            p { "Select a subject on the left to get started, or create a new one to study." }
                        }
                    }
                }
            }
        }
    }
}
