use chrono::{TimeZone, Utc};
use trackmate_core::{
    project, CoreConfig, DragSession, Filter, ListState, ManualClock, MemoryStorage, TaskId,
    TaskStore,
};

fn seeded_store<'a>(
    storage: &'a MemoryStorage,
    clock: &'a ManualClock,
    count: usize,
) -> TaskStore<&'a MemoryStorage, &'a ManualClock> {
    let mut store = TaskStore::load(storage, clock, &CoreConfig::default());
    for index in (0..count).rev() {
        store.create(&format!("Task {index:02}")).unwrap();
    }
    store
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap())
}

#[test]
fn pending_filter_returns_only_pending_in_order() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let mut store = seeded_store(&storage, &clock, 5);
    for position in [0, 2, 4] {
        let id = store.tasks()[position].id.clone();
        store.toggle(&id).unwrap();
    }

    let page = project(store.tasks(), Filter::Pending, 1, 5);
    let titles: Vec<_> = page.items.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["Task 01", "Task 03"]);

    let completed = project(store.tasks(), Filter::Completed, 1, 5);
    assert_eq!(completed.filtered_count, 3);
}

#[test]
fn page_is_clamped_after_deletes_shrink_the_list() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let mut store = seeded_store(&storage, &clock, 12);
    let page_size = CoreConfig::default().page_size();

    let mut state = ListState::new(Filter::All);
    state.set_page(3);
    let page = state.refresh(store.tasks(), page_size);
    assert_eq!(page.total_pages, 3);
    let titles: Vec<_> = page.items.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["Task 10", "Task 11"]);

    for _ in 0..2 {
        let id = store.tasks()[0].id.clone();
        store.delete(&id).unwrap();
    }
    state.set_page(4);
    let page = state.refresh(store.tasks(), page_size);
    assert_eq!(state.page, 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn drag_and_drop_reorders_through_the_store() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let mut store = seeded_store(&storage, &clock, 4);
    let ids: Vec<TaskId> = store.tasks().iter().map(|task| task.id.clone()).collect();

    let mut session = DragSession::new();
    session.begin_drag(ids[0].clone());
    assert!(session.complete_drag(&mut store, &ids[2]).unwrap());
    assert_eq!(session.dragging(), None);

    let order: Vec<_> = store.tasks().iter().map(|task| task.id.clone()).collect();
    assert_eq!(order, [ids[1].clone(), ids[2].clone(), ids[0].clone(), ids[3].clone()]);

    session.begin_drag(ids[1].clone());
    assert!(!session.complete_drag(&mut store, &ids[1]).unwrap());
    assert!(!session.complete_drag(&mut store, &ids[3]).unwrap());
}

#[test]
fn delete_zone_requires_confirmation() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let mut store = seeded_store(&storage, &clock, 2);
    let doomed = store.tasks()[1].id.clone();

    let mut session = DragSession::new();
    session.begin_drag(doomed.clone());
    let pending = session.drop_on_delete_zone().unwrap();
    assert_eq!(store.len(), 2);

    assert!(pending.clone().confirm(&mut store).unwrap());
    assert!(store.get(&doomed).is_none());
    assert!(!pending.confirm(&mut store).unwrap());
}
