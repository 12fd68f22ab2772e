use dioxus::prelude::*;

use study_core::model::{Subject, SubjectId};

/// Renders the subject collection, highlighting the active selection.
/// Selecting is purely local state; no store call happens here.
#[component]
pub fn SubjectList(
    subjects: Vec<Subject>,
    selected_id: Option<SubjectId>,
    on_select: Callback<Subject>,
) -> Element {
    if subjects.is_empty() {
        return rsx! {
            div { class: "subject-list subject-list-empty",
                p { "No subjects yet." }
                p { "Create your first subject above!" }
            }
        };
    }

    rsx! {
        div { class: "subject-list",
            h2 { "My Subjects" }
            div { class: "subject-items",
                for subject in subjects {
                    SubjectCard {
                        key: "{subject.id()}",
                        active: selected_id == Some(subject.id()),
                        subject: subject.clone(),
                        on_select,
                    }
                }
            }
        }
    }
}

#[component]
fn SubjectCard(subject: Subject, active: bool, on_select: Callback<Subject>) -> Element {
    let class = if active {
        "subject-item active"
    } else {
        "subject-item"
    };
    let selection = subject.clone();

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_select.call(selection.clone()),
            h3 { "{subject.title()}" }
            if let Some(description) = subject.description() {
                p { "{description}" }
            }
        }
    }
}
