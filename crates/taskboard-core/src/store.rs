use std::collections::BTreeMap;

use taskboard_shared::TaskDto;

/// The last fetched task list, indexed by
/// id while keeping server order.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct TaskStore {
  order: Vec<u64>,
  by_id: BTreeMap<u64, TaskDto>
}

impl TaskStore {
  /// Later duplicates of an id replace
  /// the earlier entry in place.
  pub fn from_snapshot(
    tasks: Vec<TaskDto>
  ) -> Self {
    let mut store = Self::default();
    for task in tasks {
      if !store.by_id.contains_key(&task.id)
      {
        store.order.push(task.id);
      }
      store.by_id.insert(task.id, task);
    }
    store
  }

  pub fn get(
    &self,
    id: u64
  ) -> Option<&TaskDto> {
    self.by_id.get(&id)
  }

  pub fn contains(
    &self,
    id: u64
  ) -> bool {
    self.by_id.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &TaskDto> {
    self
      .order
      .iter()
      .filter_map(|id| self.by_id.get(id))
  }
}

#[cfg(test)]
mod tests {
  use taskboard_shared::TaskStatus;

  use super::*;

  fn task(
    id: u64,
    name: &str
  ) -> TaskDto {
    TaskDto {
      id,
      name: name.to_string(),
      assignee: None,
      status: TaskStatus::Todo,
      due_date: None,
      priority: None,
      custom_fields: BTreeMap::new(),
      days: None
    }
  }

  #[test]
  fn keeps_server_order_and_indexes_by_id(
  ) {
    let store = TaskStore::from_snapshot(
      vec![
        task(9, "later"),
        task(2, "earlier"),
        task(9, "replaced"),
      ]
    );

    let names: Vec<&str> = store
      .iter()
      .map(|task| task.name.as_str())
      .collect();
    assert_eq!(
      names,
      vec!["replaced", "earlier"]
    );
    assert_eq!(store.len(), 2);
    assert!(store.contains(2));
    assert!(store.get(5).is_none());
  }
}
