//! Tests for the storage-boundary invariants of the catalog stores.

use texture_core::{Error, SortBy};

use crate::test_fixtures::TestProfile;

#[tokio::test]
async fn test_duplicate_subject_rejected_case_insensitively() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    let original = binder.create_subject("Calculus").await.unwrap();

    for name in ["Calculus", "calculus", "CALCULUS"] {
        match binder.create_subject(name).await {
            Err(Error::SubjectAlreadyExists(existing)) => assert_eq!(existing, "Calculus"),
            other => panic!("expected SubjectAlreadyExists, got {:?}", other),
        }
    }

    // the failed attempts must not have touched the original row
    let fetched = binder
        .get_subject("Calculus", Default::default())
        .await
        .unwrap();
    assert_eq!(fetched.id, original.id);
    assert_eq!(fetched.datetime_modified, original.datetime_modified);
}

#[tokio::test]
async fn test_invalid_names_rejected_at_storage_boundary() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    assert!(matches!(
        binder.create_subject(":all:").await,
        Err(Error::InvalidSubjectName { .. })
    ));
    assert!(matches!(
        binder.create_subject("Maths & Stuff").await,
        Err(Error::InvalidSubjectName { .. })
    ));
    assert!(matches!(
        binder.create_subject("1234").await,
        Err(Error::InvalidSubjectName { .. })
    ));

    binder.create_subject("Calculus").await.unwrap();
    assert!(matches!(
        binder.create_note("Calculus", "main", false).await,
        Err(Error::InvalidNoteTitle { .. })
    ));
    assert!(matches!(
        binder.create_note("Calculus", &"x".repeat(300), false).await,
        Err(Error::InvalidNoteTitle { .. })
    ));
}

#[tokio::test]
async fn test_note_title_unique_per_subject_not_globally() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    binder.create_subject("Subject A").await.unwrap();
    binder.create_subject("Subject B").await.unwrap();

    // same title under two different subjects coexists
    binder.create_note("Subject A", "Intro", false).await.unwrap();
    binder.create_note("Subject B", "Intro", false).await.unwrap();

    // twice under the same subject fails
    match binder.create_note("Subject A", "Intro", false).await {
        Err(Error::NoteAlreadyExists { subject, title }) => {
            assert_eq!(subject, "Subject A");
            assert_eq!(title, "Intro");
        }
        other => panic!("expected NoteAlreadyExists, got {:?}", other),
    }
}

#[tokio::test]
async fn test_subject_delete_cascades_to_notes() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    binder.create_subject("Calculus").await.unwrap();
    let note = binder.create_note("Calculus", "Limits", false).await.unwrap();

    binder.remove_subject("Calculus", true).await.unwrap();

    // the note row went with its subject, not just the file
    match binder.get_note_by_id(note.id, Default::default()).await {
        Err(Error::NoteIdNotFound(id)) => assert_eq!(id, note.id),
        other => panic!("expected NoteIdNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_list_subjects_sort_orders() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    binder.create_subject("banana").await.unwrap();
    binder.create_subject("Apple").await.unwrap();
    binder.create_subject("cherry").await.unwrap();

    let by_name = binder
        .list_subjects(SortBy::Name, Default::default())
        .await
        .unwrap();
    let names: Vec<_> = by_name.found.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Apple", "banana", "cherry"]);

    let by_id = binder
        .list_subjects(SortBy::Id, Default::default())
        .await
        .unwrap();
    let ids: Vec<_> = by_id.found.iter().map(|s| s.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    // timestamps share a second here, so id is the tiebreak and the order
    // must still be deterministic
    let by_date = binder
        .list_subjects(SortBy::Date, Default::default())
        .await
        .unwrap();
    assert_eq!(by_date.found.len(), 3);
}

#[tokio::test]
async fn test_list_notes_sorted_by_title() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    binder.create_subject("Calculus").await.unwrap();
    for title in ["Series", "Limits", "Derivatives"] {
        binder.create_note("Calculus", title, false).await.unwrap();
    }

    let listing = binder
        .list_notes("Calculus", SortBy::Name, Default::default())
        .await
        .unwrap();
    let titles: Vec<_> = listing.found.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Derivatives", "Limits", "Series"]);
    assert!(listing.is_clean());
}

#[tokio::test]
async fn test_subject_name_trimmed_like_lookup() {
    let fixture = TestProfile::new().await;
    let binder = &fixture.binder;

    let subject = binder.create_subject("  Calculus -").await.unwrap();
    assert_eq!(subject.name, "Calculus");

    // lookups apply the same trim
    let fetched = binder
        .get_subject(" Calculus ", Default::default())
        .await
        .unwrap();
    assert_eq!(fetched.id, subject.id);

    // not-found errors report the name with the same trim applied
    match binder.get_subject(" Topology -", Default::default()).await {
        Err(Error::SubjectNotFound(name)) => assert_eq!(name, "Topology"),
        other => panic!("expected SubjectNotFound, got {:?}", other),
    }
}
