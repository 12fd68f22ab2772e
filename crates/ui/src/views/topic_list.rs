use dioxus::prelude::*;

use study_core::model::Topic;

use crate::views::TopicItem;

/// Renders a subject's topics, delegating per-item behavior to `TopicItem`.
#[component]
pub fn TopicList(topics: Vec<Topic>, on_changed: Callback<()>) -> Element {
    if topics.is_empty() {
        return rsx! {
            div { class: "topic-list-empty",
                p { "No topics added yet." }
                p { "Add topics to start organizing your studies!" }
            }
        };
    }

    let count = topics.len();

    rsx! {
        div { class: "topic-list",
            h3 { "Topics ({count})" }
            div { class: "topic-items",
                for topic in topics {
                    TopicItem {
                        key: "{topic.id()}",
                        topic: topic.clone(),
                        on_changed,
                    }
                }
            }
        }
    }
}
