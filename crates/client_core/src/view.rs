use std::sync::Arc;

use tokio::sync::watch;

pub const TODO_LIST_ELEMENT_ID: &str = "todo-list";

/// The render target. Holds the latest list markup and publishes each
/// replacement to subscribers.
#[derive(Clone)]
pub struct ListContainer {
    contents: Arc<watch::Sender<String>>,
}

impl ListContainer {
    pub fn new() -> Self {
        let (contents, _) = watch::channel(String::new());
        Self {
            contents: Arc::new(contents),
        }
    }

    /// Replaces the contents wholesale. Subscribers are only woken when the
    /// markup actually differs from what they last saw.
    pub fn replace(&self, markup: String) -> bool {
        self.contents.send_if_modified(|current| {
            if *current == markup {
                false
            } else {
                *current = markup;
                true
            }
        })
    }

    pub fn snapshot(&self) -> String {
        self.contents.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.contents.subscribe()
    }
}

impl Default for ListContainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_notifies_subscribers_only_on_change() {
        let list = ListContainer::new();
        let mut rx = list.subscribe();

        assert!(list.replace("<li>a</li>".into()));
        rx.changed().await.expect("changed");
        assert_eq!(*rx.borrow_and_update(), "<li>a</li>");

        assert!(!list.replace("<li>a</li>".into()));
        assert!(!rx.has_changed().expect("sender alive"));
        assert_eq!(list.snapshot(), "<li>a</li>");
    }
}
