//! In-memory task list. Nothing here outlives the process.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::forms::{FormError, TodoForm};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub user_name: String,
    pub completed: bool,
}

/// Ordered list of todos, oldest first.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<Todo>,
    last_id: i64,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids come from the wall clock in milliseconds but never repeat or go
    /// backwards, even for several adds within the same millisecond.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Validates the form and appends a new, uncompleted todo.
    ///
    /// Title and user name are stored trimmed.
    pub fn add(
        &mut self,
        form: &TodoForm,
    ) -> Result<&Todo, Vec<FormError>> {
        form.validate()?;
        debug!(user_name = %form.user_name, title = %form.title, "todo form submitted");

        let todo = Todo {
            id: self.next_id(),
            title: form.title.trim().to_string(),
            user_name: form.user_name.trim().to_string(),
            completed: false,
        };
        info!(id = todo.id, "todo added");
        self.items.push(todo);

        Ok(&self.items[self.items.len() - 1])
    }

    /// Flips the completed flag. Returns `false` if no todo has that id.
    pub fn toggle(
        &mut self,
        id: i64,
    ) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                debug!(id, completed = todo.completed, "todo toggled");
                true
            }
            None => false,
        }
    }

    /// Deletes one todo. Returns `false` if no todo has that id.
    pub fn remove(
        &mut self,
        id: i64,
    ) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(id, "todo removed");
        }
        removed
    }

    pub fn get(
        &self,
        id: i64,
    ) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn list_with(titles: &[&str]) -> (TodoList, Vec<i64>) {
        let mut list = TodoList::new();
        let ids = titles
            .iter()
            .map(|t| list.add(&TodoForm::new("taro", *t)).unwrap().id)
            .collect();
        (list, ids)
    }

    #[test]
    fn add_appends_uncompleted_todo() {
        let mut list = TodoList::new();

        let todo = list.add(&TodoForm::new(" taro ", " buy milk ")).unwrap().clone();

        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.user_name, "taro");
        assert!(!todo.completed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_rejects_invalid_form_without_mutating() {
        let mut list = TodoList::new();

        let result = list.add(&TodoForm::new("", "title"));

        assert!(result.is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn ids_strictly_increase() {
        let (_, ids) = list_with(&["a", "b", "c", "d"]);

        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids: {ids:?}");
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (mut list, ids) = list_with(&["a"]);

        assert!(list.toggle(ids[0]));
        assert_eq!(list.completed_count(), 1);
        assert!(list.toggle(ids[0]));
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn toggle_unknown_id_returns_false() {
        let (mut list, _) = list_with(&["a"]);

        assert!(!list.toggle(-1));
    }

    #[test]
    fn remove_deletes_only_target() {
        let (mut list, ids) = list_with(&["a", "b", "c"]);

        assert!(list.remove(ids[1]));

        let titles: Vec<_> = list.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(!list.remove(ids[1]));
    }

    #[test]
    fn completed_count_tracks_toggles() {
        let (mut list, ids) = list_with(&["a", "b", "c"]);

        list.toggle(ids[0]);
        list.toggle(ids[2]);

        assert_eq!(list.completed_count(), 2);
        assert_eq!(list.len(), 3);
        assert!(list.get(ids[1]).is_some_and(|t| !t.completed));
    }
}
